use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo item
/// This is the root entity of the todo feature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Internal immutable identifier
    pub id: String,

    /// Short label, never blank once validated
    pub title: String,

    /// Free-form detail text, may be empty
    pub description: String,

    /// Whether the item has been checked off
    pub is_completed: bool,

    /// Creation timestamp, set once
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Create a new Todo entity
    /// This is the only way to construct one with a fresh identity
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        // Persisted as epoch milliseconds, so drop sub-millisecond precision
        // up front to keep stored and in-memory timestamps identical.
        let created_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);

        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: description.into(),
            is_completed: false,
            created_at,
        }
    }
}
