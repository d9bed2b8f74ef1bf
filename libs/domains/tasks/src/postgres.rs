use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::ActiveValue::Set;
use sea_orm::DatabaseConnection;

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{InputTask, Task},
    repository::TaskRepository,
};

/// PostgreSQL-backed TaskRepository
pub struct PgTaskRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn insert(&self, input: InputTask) -> TaskResult<Task> {
        let active_model: entity::ActiveModel = input.into();

        // Id and timestamps come back from the store via RETURNING
        let model = self.base.insert(active_model).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn list_all(&self) -> TaskResult<Vec<Task>> {
        let models = self.base.find_all().await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn fetch_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let model = self.base.find_by_id(id).await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, id: i32, input: InputTask) -> TaskResult<Task> {
        let model = self
            .base
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        let mut task: Task = model.into();
        task.apply_input(input);

        let active_model = entity::ActiveModel {
            id: Set(task.id),
            name: Set(task.name.clone()),
            description: Set(task.description.clone()),
            created_at: Set(task.created_at.into()),
            updated_at: Set(task.updated_at.into()),
        };

        let updated_model = self.base.update(active_model).await?;

        tracing::info!(task_id = id, "Updated task");
        Ok(updated_model.into())
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        let rows_affected = self.base.delete_by_id(id).await?;

        if rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i32, name: &str, description: &str) -> entity::Model {
        let now = chrono::Utc::now();
        entity::Model {
            id,
            name: name.to_string(),
            description: description.to_string(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_fetch_by_id_maps_row_to_task() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Buy milk", "2%")]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let task = repo.fetch_by_id(1).await.unwrap().unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(task.name, "Buy milk");
        assert_eq!(task.description, "2%");
    }

    #[tokio::test]
    async fn test_fetch_by_id_missing_row_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert!(repo.fetch_by_id(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_all_maps_every_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "a", ""), model(2, "b", "")]])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let tasks = repo.list_all().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].name, "a");
        assert_eq!(tasks[1].name, "b");
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgTaskRepository::new(db);

        let err = repo
            .update(
                7,
                InputTask {
                    name: "x".to_string(),
                    description: "y".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, TaskError::NotFound(7)));
    }
}
