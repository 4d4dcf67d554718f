// src/store/watch.rs
//
// Live query over the todos table
//
// RULES:
// - The first poll returns the current snapshot
// - Later polls wait for a change signal, then re-query
// - Signals that pile up between two polls collapse into one re-query
// - A lagged watcher re-queries once; snapshots are rebuilt, never replayed

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};

use super::todo_store::query_all;
use super::types::{StoreChange, TodoRecord};
use crate::db::ConnectionPool;
use crate::error::{AppError, AppResult};

/// A subscription to the full todo row set.
///
/// Never completes on its own; drop it to unsubscribe. Signals arriving
/// between two polls conflate into a single re-query.
pub struct TodoRecordWatch {
    pool: Arc<ConnectionPool>,
    changes: broadcast::Receiver<StoreChange>,
    primed: bool,
}

impl TodoRecordWatch {
    pub(crate) fn new(pool: Arc<ConnectionPool>, changes: broadcast::Receiver<StoreChange>) -> Self {
        Self {
            pool,
            changes,
            primed: false,
        }
    }

    /// The current row set, newest first.
    ///
    /// The first call queries immediately; every later call waits for a
    /// change signal first.
    pub async fn next(&mut self) -> AppResult<Vec<TodoRecord>> {
        if self.primed {
            match self.changes.recv().await {
                Ok(change) => {
                    log::debug!("todo watch woken by {:?}", change);
                }
                Err(RecvError::Lagged(skipped)) => {
                    log::debug!("todo watch lagged by {} signals, re-querying", skipped);
                }
                Err(RecvError::Closed) => {
                    return Err(AppError::Other(
                        "todo store change feed closed".to_string(),
                    ));
                }
            }
            self.drain_pending();
        }
        self.primed = true;
        self.snapshot().await
    }

    /// Collapse signals that piled up behind the one just received; the
    /// following re-query covers them all.
    fn drain_pending(&mut self) {
        loop {
            match self.changes.try_recv() {
                Ok(change) => log::debug!("todo watch conflating {:?}", change),
                Err(TryRecvError::Lagged(skipped)) => {
                    log::debug!("todo watch lagged by {} signals while conflating", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    async fn snapshot(&self) -> AppResult<Vec<TodoRecord>> {
        let pool = Arc::clone(&self.pool);
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            query_all(&conn)
        })
        .await
        .map_err(|e| AppError::Task(e.to_string()))?
    }
}
