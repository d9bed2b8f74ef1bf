//! Proto ↔ domain conversion helpers

use chrono::{DateTime, Utc};
use domain_tasks::{Task, TaskError};
use tonic::Status;

/// Wire timestamps are unix epoch seconds, UTC
pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> i64 {
    dt.timestamp()
}

pub fn task_to_proto(task: Task) -> rpc::tasks::Task {
    rpc::tasks::Task {
        id: task.id,
        name: task.name,
        description: task.description,
        created_at: datetime_to_timestamp(task.created_at),
        updated_at: datetime_to_timestamp(task.updated_at),
    }
}

/// Map domain errors onto gRPC status codes
pub fn error_to_status(err: TaskError) -> Status {
    match err {
        TaskError::NotFound(id) => Status::not_found(format!("Task {} not found", id)),
        TaskError::Validation(msg) => Status::invalid_argument(msg),
        TaskError::Database(msg) => Status::internal(msg),
    }
}
