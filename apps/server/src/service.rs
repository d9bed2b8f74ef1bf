//! gRPC service implementation for tasks.TasksService

use std::sync::Arc;

use domain_tasks::{InputTask, TaskRepository, TaskService};
use rpc::tasks::{
    FetchAllRequest, FetchAllResponse, StoreRequest, StoreResponse,
    tasks_service_server::TasksService as TasksServiceRpc,
};
use tonic::{Request, Response, Status};

use crate::conversions::{error_to_status, task_to_proto};

pub struct TasksServiceImpl<R>
where
    R: TaskRepository + 'static,
{
    service: Arc<TaskService<R>>,
}

impl<R> TasksServiceImpl<R>
where
    R: TaskRepository + 'static,
{
    pub fn new(service: TaskService<R>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

#[tonic::async_trait]
impl<R> TasksServiceRpc for TasksServiceImpl<R>
where
    R: TaskRepository + 'static,
{
    async fn store(
        &self,
        request: Request<StoreRequest>,
    ) -> Result<Response<StoreResponse>, Status> {
        let req = request.into_inner();

        let input = InputTask {
            name: req.name,
            description: req.description,
        };

        let task = self.service.store(input).await.map_err(error_to_status)?;

        tracing::info!(task_id = task.id, "Stored task via gRPC");
        Ok(Response::new(StoreResponse {
            task: Some(task_to_proto(task)),
        }))
    }

    async fn fetch_all(
        &self,
        _request: Request<FetchAllRequest>,
    ) -> Result<Response<FetchAllResponse>, Status> {
        let tasks = self.service.fetch_all().await.map_err(error_to_status)?;

        Ok(Response::new(FetchAllResponse {
            tasks: tasks.into_iter().map(task_to_proto).collect(),
        }))
    }
}
