// src/store/mod.rs
//
// Todo store - row-level persistence over SQLite
//
// Provides:
// - The TodoStore trait and its SQLite implementation
// - The live query watch
// - First-run seeding

pub mod seeder;
pub mod todo_store;
pub mod types;
pub mod watch;

pub use seeder::TodoSeeder;
pub use todo_store::{SqliteTodoStore, TodoStore};
pub use types::{StoreChange, TodoRecord};
pub use watch::TodoRecordWatch;
