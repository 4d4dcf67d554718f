// src/application/todo_list.rs
//
// Todo list state holder - publishes UI-ready snapshots
//
// CRITICAL RULES:
// - Runs the observation in a background task
// - Exactly one Loading -> terminal transition per reload
// - A stream fault leaves the last good list in place; retry() starts over
// - Does NOT talk to the store directly, only through the repository

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::Todo;
use crate::outcome::Outcome;
use crate::repository::TodoRepository;

/// Snapshot of the todo list screen state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TodoListState {
    pub is_loading: bool,
    pub todos: Vec<Todo>,
    pub error: Option<String>,
}

impl TodoListState {
    /// Fold one observed outcome into the snapshot.
    ///
    /// An Error keeps the current list so the screen can show stale data
    /// next to the message; Empty clears it.
    pub fn apply(&mut self, outcome: Outcome<Vec<Todo>>) {
        match outcome {
            Outcome::Loading => {
                self.is_loading = true;
                self.error = None;
            }
            Outcome::Success { data } => {
                self.is_loading = false;
                self.todos = data;
                self.error = None;
            }
            Outcome::Empty { .. } => {
                self.is_loading = false;
                self.todos = Vec::new();
                self.error = None;
            }
            Outcome::Error { message, .. } => {
                self.is_loading = false;
                self.error = Some(message);
            }
        }
    }

    pub fn completed_count(&self) -> usize {
        self.todos.iter().filter(|t| t.is_completed).count()
    }

    pub fn pending_count(&self) -> usize {
        self.todos.iter().filter(|t| !t.is_completed).count()
    }
}

/// Drives the todo list: observes the repository and publishes state.
///
/// State flows through a watch channel, so consumers always see the latest
/// snapshot and may miss intermediate ones.
pub struct TodoListModel {
    repository: Arc<dyn TodoRepository>,
    state_tx: watch::Sender<TodoListState>,
    observe_task: Mutex<Option<JoinHandle<()>>>,
    generation: Arc<AtomicU64>,
}

impl TodoListModel {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        let (state_tx, _) = watch::channel(TodoListState::default());
        Self {
            repository,
            state_tx,
            observe_task: Mutex::new(None),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<TodoListState> {
        self.state_tx.subscribe()
    }

    pub fn current(&self) -> TodoListState {
        self.state_tx.borrow().clone()
    }

    /// Start (or restart) observing the todo list.
    ///
    /// The previous observation task is superseded: its generation goes
    /// stale so it stops publishing, and it is aborted.
    pub fn load(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let repository = Arc::clone(&self.repository);
        let state_tx = self.state_tx.clone();
        let live_generation = Arc::clone(&self.generation);

        let task = tokio::spawn(async move {
            let mut outcomes = repository.observe();
            while let Some(outcome) = outcomes.next().await {
                // Stale-check and publish as one step under the channel lock
                let published = state_tx.send_if_modified(|state| {
                    if live_generation.load(Ordering::SeqCst) != generation {
                        return false;
                    }
                    state.apply(outcome);
                    true
                });
                if !published {
                    break;
                }
            }
        });

        let mut handle = self.observe_task.lock().unwrap();
        if let Some(previous) = handle.replace(task) {
            previous.abort();
        }
    }

    /// Re-run the observation after a fault.
    pub fn retry(&self) {
        log::info!("retrying todo observation");
        self.load();
    }

    pub fn clear_error(&self) {
        self.state_tx.send_modify(|state| state.error = None);
    }

    pub async fn add(&self, title: &str, description: &str) {
        match self.repository.add(title, description).await {
            Outcome::Success { .. } => self.load(),
            Outcome::Error { message, .. } => self.publish_error(message),
            // Single-shot operations never produce Loading or Empty
            Outcome::Loading | Outcome::Empty { .. } => {}
        }
    }

    pub async fn update(&self, todo: Todo) {
        match self.repository.update(todo).await {
            Outcome::Success { .. } => self.load(),
            Outcome::Error { message, .. } => self.publish_error(message),
            Outcome::Loading | Outcome::Empty { .. } => {}
        }
    }

    pub async fn delete(&self, id: &str) {
        match self.repository.delete(id).await {
            Outcome::Success { .. } => self.load(),
            Outcome::Error { message, .. } => self.publish_error(message),
            Outcome::Loading | Outcome::Empty { .. } => {}
        }
    }

    pub async fn toggle_completion(&self, id: &str) {
        match self.repository.toggle_completion(id).await {
            Outcome::Success { .. } => self.load(),
            Outcome::Error { message, .. } => self.publish_error(message),
            Outcome::Loading | Outcome::Empty { .. } => {}
        }
    }

    fn publish_error(&self, message: String) {
        self.state_tx
            .send_modify(|state| state.error = Some(message));
    }
}

impl Drop for TodoListModel {
    fn drop(&mut self) {
        let mut handle = self.observe_task.lock().unwrap();
        if let Some(task) = handle.take() {
            task.abort();
        }
    }
}
