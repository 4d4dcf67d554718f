// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - This layer sits ABOVE the store and repository
// - It holds UI-facing state and drives reloads
// - It never talks to SQLite directly

pub mod state;
pub mod todo_list;

pub use state::AppState;
pub use todo_list::{TodoListModel, TodoListState};
