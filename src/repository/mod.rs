// src/repository/mod.rs
//
// Repository layer - the upward-facing todo API
//
// Provides:
// - The TodoRepository trait and its local implementation
// - Row <-> domain mapping

pub mod mapper;
pub mod todo_repository;

pub use mapper::{domain_to_record, record_to_domain};
pub use todo_repository::{LocalTodoRepository, TodoOutcomes, TodoRepository};
