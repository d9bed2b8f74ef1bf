use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{TaskError, TaskResult};
use crate::models::{InputTask, Task};
use crate::repository::TaskRepository;

/// Use-case layer between transport handlers and the repository
///
/// Pure pass-through: each operation maps the DTO and delegates to exactly
/// one repository call.
pub struct TaskService<R: TaskRepository> {
    repository: Arc<R>,
}

// Manual impl: cloning shares the repository, which need not be Clone itself
impl<R: TaskRepository> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Persist a new task
    #[instrument(skip(self, input), fields(task_name = %input.name))]
    pub async fn store(&self, input: InputTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        self.repository.insert(input).await
    }

    /// Fetch every task
    pub async fn fetch_all(&self) -> TaskResult<Vec<Task>> {
        self.repository.list_all().await
    }

    /// Fetch a task by id
    #[instrument(skip(self))]
    pub async fn fetch_by_id(&self, id: i32) -> TaskResult<Task> {
        self.repository
            .fetch_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))
    }

    /// Overwrite a task's name and description
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: InputTask) -> TaskResult<Task> {
        input
            .validate()
            .map_err(|e| TaskError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a task; deleting an unknown id is an error
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> TaskResult<()> {
        let deleted = self.repository.delete(id).await?;

        if !deleted {
            return Err(TaskError::NotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryTaskRepository, MockTaskRepository};

    fn input(name: &str, description: &str) -> InputTask {
        InputTask {
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    fn service() -> TaskService<InMemoryTaskRepository> {
        TaskService::new(InMemoryTaskRepository::new())
    }

    #[tokio::test]
    async fn test_store_then_fetch_by_id_roundtrip() {
        let service = service();

        let created = service.store(input("Buy milk", "2%  ")).await.unwrap();
        let fetched = service.fetch_by_id(created.id).await.unwrap();

        assert_eq!(fetched.name, "Buy milk");
        assert_eq!(fetched.description, "2%  ");
        assert_eq!(fetched.id, created.id);
    }

    #[tokio::test]
    async fn test_store_assigns_distinct_ids() {
        let service = service();

        let a = service.store(input("a", "")).await.unwrap();
        let b = service.store(input("b", "")).await.unwrap();

        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_store_rejects_empty_name() {
        let service = service();

        let err = service.store(input("", "desc")).await.unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
    }

    #[tokio::test]
    async fn test_fetch_by_id_unknown_is_not_found() {
        let service = service();

        let err = service.fetch_by_id(12345).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(12345)));
    }

    #[tokio::test]
    async fn test_fetch_all_returns_every_stored_task() {
        let service = service();

        for i in 0..5 {
            service
                .store(input(&format!("task-{}", i), &format!("desc-{}", i)))
                .await
                .unwrap();
        }

        let tasks = service.fetch_all().await.unwrap();
        assert_eq!(tasks.len(), 5);
        for (i, task) in tasks.iter().enumerate() {
            assert_eq!(task.name, format!("task-{}", i));
            assert_eq!(task.description, format!("desc-{}", i));
        }
    }

    #[tokio::test]
    async fn test_fetch_all_empty_store_is_empty_vec() {
        let service = service();
        assert!(service.fetch_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_then_fetch_reflects_new_fields() {
        let service = service();

        let created = service.store(input("before", "old")).await.unwrap();
        service.update(created.id, input("after", "new")).await.unwrap();

        let fetched = service.fetch_by_id(created.id).await.unwrap();
        assert_eq!(fetched.name, "after");
        assert_eq!(fetched.description, "new");
        // Timestamps are store-managed, not client-settable
        assert_eq!(fetched.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let service = service();

        let err = service.update(777, input("x", "y")).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(777)));
    }

    #[tokio::test]
    async fn test_delete_then_fetch_is_not_found() {
        let service = service();

        let created = service.store(input("doomed", "")).await.unwrap();
        service.delete(created.id).await.unwrap();

        let err = service.fetch_by_id(created.id).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let service = service();

        let err = service.delete(404).await.unwrap_err();
        assert!(matches!(err, TaskError::NotFound(404)));
    }

    #[tokio::test]
    async fn test_add_then_find_lists_the_task() {
        // CLI `add` followed by `find` goes through these two operations
        let service = service();

        service.store(input("Buy milk", "2%  ")).await.unwrap();

        let tasks = service.fetch_all().await.unwrap();
        assert!(
            tasks
                .iter()
                .any(|t| t.name == "Buy milk" && t.description == "2%  ")
        );
    }

    #[tokio::test]
    async fn test_store_propagates_repository_error() {
        let mut repo = MockTaskRepository::new();
        repo.expect_insert()
            .returning(|_| Err(TaskError::Database("connection refused".to_string())));

        let service = TaskService::new(repo);
        let err = service.store(input("task", "desc")).await.unwrap_err();
        assert!(matches!(err, TaskError::Database(_)));
    }
}
