use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};
use tokio::sync::RwLock;

use crate::error::{TaskError, TaskResult};
use crate::models::{InputTask, Task};

/// Repository trait for Task persistence
///
/// Defines the data access interface for tasks. `PgTaskRepository` is the
/// production implementation; `InMemoryTaskRepository` backs tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a new task; the store assigns id and timestamps
    async fn insert(&self, input: InputTask) -> TaskResult<Task>;

    /// Fetch every task, store-default ordering
    async fn list_all(&self) -> TaskResult<Vec<Task>>;

    /// Fetch a task by id
    async fn fetch_by_id(&self, id: i32) -> TaskResult<Option<Task>>;

    /// Overwrite name/description of an existing task
    async fn update(&self, id: i32, input: InputTask) -> TaskResult<Task>;

    /// Delete a task by id, reporting whether a row was removed
    async fn delete(&self, id: i32) -> TaskResult<bool>;
}

/// In-memory implementation of TaskRepository (for development/testing)
#[derive(Debug)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<i32, Task>>>,
    next_id: AtomicI32,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(RwLock::new(HashMap::new())),
            next_id: AtomicI32::new(1),
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, input: InputTask) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;

        let now = Utc::now();
        let task = Task {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        tasks.insert(task.id, task.clone());

        tracing::info!(task_id = task.id, "Created task");
        Ok(task)
    }

    async fn list_all(&self) -> TaskResult<Vec<Task>> {
        let tasks = self.tasks.read().await;

        // Insertion order, like a serial-keyed table scan
        let mut result: Vec<Task> = tasks.values().cloned().collect();
        result.sort_by_key(|t| t.id);

        Ok(result)
    }

    async fn fetch_by_id(&self, id: i32) -> TaskResult<Option<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn update(&self, id: i32, input: InputTask) -> TaskResult<Task> {
        let mut tasks = self.tasks.write().await;

        let task = tasks.get_mut(&id).ok_or(TaskError::NotFound(id))?;
        task.apply_input(input);

        tracing::info!(task_id = id, "Updated task");
        Ok(task.clone())
    }

    async fn delete(&self, id: i32) -> TaskResult<bool> {
        let mut tasks = self.tasks.write().await;

        if tasks.remove(&id).is_some() {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
