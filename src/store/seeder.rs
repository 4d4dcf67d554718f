// src/store/seeder.rs
//
// Database seeder for first-run sample data

use std::sync::Arc;

use chrono::Utc;

use super::todo_store::TodoStore;
use super::types::TodoRecord;
use crate::error::AppResult;

const DAY_MS: i64 = 86_400_000;

/// Populates the store with sample todos on first run.
pub struct TodoSeeder {
    store: Arc<dyn TodoStore>,
}

impl TodoSeeder {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Seed the store with sample todos if it holds none.
    ///
    /// Returns whether seeding happened. Safe to call on every startup.
    pub async fn seed_if_empty(&self) -> AppResult<bool> {
        let existing = self.store.count_completed().await? + self.store.count_pending().await?;
        if existing > 0 {
            log::debug!("todo store already holds {} rows, skipping seed", existing);
            return Ok(false);
        }

        let samples = sample_todos();
        log::info!("seeding {} sample todos", samples.len());
        self.store.insert_many(samples).await?;
        Ok(true)
    }
}

/// Fixed sample set: three finished setup steps, two still open.
/// Timestamps are staggered one day apart so the newest sorts first.
fn sample_todos() -> Vec<TodoRecord> {
    let now = Utc::now().timestamp_millis();

    vec![
        TodoRecord {
            id: "1".to_string(),
            title: "Create the database schema".to_string(),
            description: "Define the todos table and version tracking".to_string(),
            is_completed: true,
            created_at: now - DAY_MS * 4,
        },
        TodoRecord {
            id: "2".to_string(),
            title: "Wire up the connection pool".to_string(),
            description: "Share one pool across the whole store".to_string(),
            is_completed: true,
            created_at: now - DAY_MS * 3,
        },
        TodoRecord {
            id: "3".to_string(),
            title: "Add live list updates".to_string(),
            description: "Re-emit the full list whenever a row changes".to_string(),
            is_completed: true,
            created_at: now - DAY_MS * 2,
        },
        TodoRecord {
            id: "4".to_string(),
            title: "Write integration tests".to_string(),
            description: "Cover the store and repository end to end".to_string(),
            is_completed: false,
            created_at: now - DAY_MS,
        },
        TodoRecord {
            id: "5".to_string(),
            title: "Polish the command line output".to_string(),
            description: "Show pending and completed counts with the list".to_string(),
            is_completed: false,
            created_at: now,
        },
    ]
}
