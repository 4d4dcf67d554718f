// src/repository/todo_repository.rs
//
// Todo repository - validation, mapping and outcome wrapping
//
// RULES:
// - Every result crosses this boundary as an Outcome, never an AppError
// - Blank titles are rejected here, before the store is touched
// - Absence is an error only for toggle_completion

use std::sync::Arc;

use async_trait::async_trait;

use super::mapper::{domain_to_record, record_to_domain};
use crate::domain::{validate_title, validate_todo, Todo};
use crate::outcome::Outcome;
use crate::store::{TodoRecordWatch, TodoStore};

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Subscribe to the todo list. Emits one Loading, then Success per
    /// change; a fault produces one terminal Error and ends the stream.
    fn observe(&self) -> TodoOutcomes;

    /// Validate, build and persist a new todo from trimmed input.
    async fn add(&self, title: &str, description: &str) -> Outcome<Todo>;

    /// Validate and replace an existing todo.
    async fn update(&self, todo: Todo) -> Outcome<Todo>;

    /// Remove a todo. Succeeds whether or not the id exists.
    async fn delete(&self, id: &str) -> Outcome<()>;

    /// Flip completion of one todo. Missing id is "Todo not found".
    async fn toggle_completion(&self, id: &str) -> Outcome<Todo>;
}

pub struct LocalTodoRepository {
    store: Arc<dyn TodoStore>,
}

impl LocalTodoRepository {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl TodoRepository for LocalTodoRepository {
    fn observe(&self) -> TodoOutcomes {
        TodoOutcomes::new(self.store.observe_all())
    }

    async fn add(&self, title: &str, description: &str) -> Outcome<Todo> {
        // 1. Validate before touching the store
        if let Err(err) = validate_title(title) {
            return Outcome::error(err.to_string());
        }

        // 2. Build the entity from trimmed input
        let todo = Todo::new(title.trim(), description.trim());

        // 3. Persist and report
        match self.store.insert(domain_to_record(&todo)).await {
            Ok(()) => Outcome::success(todo),
            Err(e) => {
                log::warn!("failed to add todo: {}", e);
                Outcome::error(e.to_string())
            }
        }
    }

    async fn update(&self, todo: Todo) -> Outcome<Todo> {
        if let Err(err) = validate_todo(&todo) {
            return Outcome::error(err.to_string());
        }

        match self.store.update(domain_to_record(&todo)).await {
            Ok(()) => Outcome::success(todo),
            Err(e) => {
                log::warn!("failed to update todo {}: {}", todo.id, e);
                Outcome::error(e.to_string())
            }
        }
    }

    async fn delete(&self, id: &str) -> Outcome<()> {
        match self.store.delete_by_id(id).await {
            Ok(()) => Outcome::success(()),
            Err(e) => {
                log::warn!("failed to delete todo {}: {}", id, e);
                Outcome::error(e.to_string())
            }
        }
    }

    async fn toggle_completion(&self, id: &str) -> Outcome<Todo> {
        // 1. Read the current row
        let record = match self.store.get_by_id(id).await {
            Ok(Some(record)) => record,
            Ok(None) => return Outcome::error("Todo not found"),
            Err(e) => {
                log::warn!("failed to load todo {}: {}", id, e);
                return Outcome::error(e.to_string());
            }
        };

        // 2. Flip completion on the domain entity
        let mut todo = match record_to_domain(&record) {
            Ok(todo) => todo,
            Err(e) => return Outcome::error(e.to_string()),
        };
        todo.is_completed = !todo.is_completed;

        // 3. Persist the flipped state
        match self.store.update(domain_to_record(&todo)).await {
            Ok(()) => Outcome::success(todo),
            Err(e) => {
                log::warn!("failed to toggle todo {}: {}", id, e);
                Outcome::error(e.to_string())
            }
        }
    }
}

/// Subscription to the todo list as a sequence of outcomes.
///
/// The first poll yields Loading without touching the store. After a fault
/// is reported the subscription is over and `next` returns `None`; callers
/// decide whether to resubscribe.
pub struct TodoOutcomes {
    watch: Option<TodoRecordWatch>,
    loading_pending: bool,
}

impl TodoOutcomes {
    fn new(watch: TodoRecordWatch) -> Self {
        Self {
            watch: Some(watch),
            loading_pending: true,
        }
    }

    pub async fn next(&mut self) -> Option<Outcome<Vec<Todo>>> {
        if self.loading_pending {
            self.loading_pending = false;
            return Some(Outcome::loading());
        }

        let watch = self.watch.as_mut()?;
        match watch.next().await {
            Ok(records) => {
                let mut todos = Vec::with_capacity(records.len());
                for record in &records {
                    match record_to_domain(record) {
                        Ok(todo) => todos.push(todo),
                        Err(e) => {
                            log::error!("todo row {} failed to map: {}", record.id, e);
                            self.watch = None;
                            return Some(Outcome::error(e.to_string()));
                        }
                    }
                }
                Some(Outcome::success(todos))
            }
            Err(e) => {
                log::error!("todo observation failed: {}", e);
                self.watch = None;
                Some(Outcome::error(e.to_string()))
            }
        }
    }
}
