// src/application/state.rs

use std::sync::Arc;

use crate::application::TodoListModel;
use crate::repository::TodoRepository;
use crate::store::TodoStore;

/// Application state shared across the binary's command handlers.
/// All fields are Arc-wrapped for thread-safe sharing.
/// Wiring happens in main.rs and the pieces are passed here.
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
    pub repository: Arc<dyn TodoRepository>,
    pub todo_list: Arc<TodoListModel>,
}
