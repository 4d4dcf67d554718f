// src/store/todo_store.rs
//
// Todo persistence - row-level CRUD plus a live change feed
//
// RULES:
// - Writes signal watchers only when a row actually changed
// - Blocking SQLite work stays on the blocking thread pool
// - Absence is data (Ok(None)), not an error

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use tokio::sync::broadcast;

use super::types::{StoreChange, TodoRecord};
use super::watch::TodoRecordWatch;
use crate::db::ConnectionPool;
use crate::error::{AppError, AppResult};

/// Buffered change signals per watcher before it lags and re-queries
const CHANGE_CHANNEL_CAPACITY: usize = 32;

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Live query over the whole table, newest first.
    /// Each call is an independent subscription.
    fn observe_all(&self) -> TodoRecordWatch;

    async fn get_by_id(&self, id: &str) -> AppResult<Option<TodoRecord>>;

    /// Upsert: an existing id is fully replaced.
    async fn insert(&self, record: TodoRecord) -> AppResult<()>;

    /// Upsert a batch inside one transaction. Fires a single change signal.
    async fn insert_many(&self, records: Vec<TodoRecord>) -> AppResult<()>;

    /// Replace the row matching `record.id`. Missing id is a no-op.
    async fn update(&self, record: TodoRecord) -> AppResult<()>;

    /// Remove one row. Missing id is a no-op.
    async fn delete_by_id(&self, id: &str) -> AppResult<()>;

    async fn delete_all(&self) -> AppResult<()>;

    async fn count_completed(&self) -> AppResult<i64>;

    async fn count_pending(&self) -> AppResult<i64>;
}

pub struct SqliteTodoStore {
    pool: Arc<ConnectionPool>,
    changes: broadcast::Sender<StoreChange>,
}

impl SqliteTodoStore {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { pool, changes }
    }

    /// Run blocking SQLite work off the async runtime
    async fn with_conn<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await
        .map_err(|e| AppError::Task(e.to_string()))?
    }

    fn notify(&self, change: StoreChange) {
        log::debug!("todo store change: {:?}", change);
        // No receivers is fine; the signal only matters to active watchers
        let _ = self.changes.send(change);
    }

    /// Map database row to TodoRecord - returns rusqlite::Error for query_map compatibility
    fn row_to_record(row: &Row) -> Result<TodoRecord, rusqlite::Error> {
        Ok(TodoRecord {
            id: row.get("id")?,
            title: row.get("title")?,
            description: row.get("description")?,
            is_completed: row.get("is_completed")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Full table snapshot, newest first; ties broken by id for a stable order
pub(crate) fn query_all(conn: &Connection) -> AppResult<Vec<TodoRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, description, is_completed, created_at
         FROM todos
         ORDER BY created_at DESC, id ASC",
    )?;

    let records: Vec<TodoRecord> = stmt
        .query_map([], SqliteTodoStore::row_to_record)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(records)
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    fn observe_all(&self) -> TodoRecordWatch {
        TodoRecordWatch::new(Arc::clone(&self.pool), self.changes.subscribe())
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<TodoRecord>> {
        let id = id.to_string();
        self.with_conn(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, description, is_completed, created_at
                 FROM todos WHERE id = ?1",
            )?;

            match stmt.query_row(params![id], SqliteTodoStore::row_to_record) {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(AppError::Database(e)),
            }
        })
        .await
    }

    async fn insert(&self, record: TodoRecord) -> AppResult<()> {
        let changed = self
            .with_conn(move |conn| {
                let changed = conn.execute(
                    "INSERT OR REPLACE INTO todos (id, title, description, is_completed, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        record.id,
                        record.title,
                        record.description,
                        record.is_completed,
                        record.created_at,
                    ],
                )?;
                Ok(changed)
            })
            .await?;

        if changed > 0 {
            self.notify(StoreChange::Inserted);
        }
        Ok(())
    }

    async fn insert_many(&self, records: Vec<TodoRecord>) -> AppResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT OR REPLACE INTO todos (id, title, description, is_completed, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                )?;
                for record in &records {
                    stmt.execute(params![
                        record.id,
                        record.title,
                        record.description,
                        record.is_completed,
                        record.created_at,
                    ])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await?;

        self.notify(StoreChange::BatchInserted);
        Ok(())
    }

    async fn update(&self, record: TodoRecord) -> AppResult<()> {
        let changed = self
            .with_conn(move |conn| {
                let changed = conn.execute(
                    "UPDATE todos
                     SET title = ?2, description = ?3, is_completed = ?4, created_at = ?5
                     WHERE id = ?1",
                    params![
                        record.id,
                        record.title,
                        record.description,
                        record.is_completed,
                        record.created_at,
                    ],
                )?;
                Ok(changed)
            })
            .await?;

        if changed > 0 {
            self.notify(StoreChange::Updated);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> AppResult<()> {
        let id = id.to_string();
        let changed = self
            .with_conn(move |conn| {
                let changed = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
                Ok(changed)
            })
            .await?;

        if changed > 0 {
            self.notify(StoreChange::Deleted);
        }
        Ok(())
    }

    async fn delete_all(&self) -> AppResult<()> {
        let changed = self
            .with_conn(|conn| {
                let changed = conn.execute("DELETE FROM todos", [])?;
                Ok(changed)
            })
            .await?;

        if changed > 0 {
            self.notify(StoreChange::Cleared);
        }
        Ok(())
    }

    async fn count_completed(&self) -> AppResult<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM todos WHERE is_completed = 1",
                [],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
    }

    async fn count_pending(&self) -> AppResult<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row(
                "SELECT COUNT(*) FROM todos WHERE is_completed = 0",
                [],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
    }
}
