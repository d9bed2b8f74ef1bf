mod http;

use axum::{Router, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{InputTask, Task};
use crate::repository::TaskRepository;
use crate::service::TaskService;

/// OpenAPI documentation for the Tasks API
#[derive(OpenApi)]
#[openapi(
    paths(
        http::list_tasks,
        http::get_task,
        http::create_task,
        http::update_task,
        http::delete_task,
    ),
    components(
        schemas(Task, InputTask)
    ),
    tags(
        (name = "tasks", description = "Task CRUD operations")
    )
)]
pub struct ApiDoc;

/// Create the router binding the task HTTP surface
pub fn router<R: TaskRepository + 'static>(service: TaskService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(http::list_tasks).post(http::create_task))
        .route(
            "/{id}",
            get(http::get_task)
                .put(http::update_task)
                .delete(http::delete_task),
        )
        .with_state(shared_service)
}
