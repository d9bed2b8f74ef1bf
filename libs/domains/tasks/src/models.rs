use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Task entity - represents one persisted to-do item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Task {
    /// Unique identifier, store-assigned and immutable
    pub id: i32,
    /// Task name
    pub name: String,
    /// Task description
    pub description: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO carrying the client-settable subset of Task, used for create and update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct InputTask {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Task {
    /// Overwrite the client-settable fields and refresh updated_at
    pub fn apply_input(&mut self, input: InputTask) {
        self.name = input.name;
        self.description = input.description;
        self.updated_at = Utc::now();
    }
}
