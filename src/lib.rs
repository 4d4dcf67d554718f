// src/lib.rs
// TaskHub - Local-first todo core with live queries
//
// Architecture:
// - Domain-centric: entities and invariants live in domain
// - Outcome-driven: results cross layer boundaries as an Outcome
// - Explicit: no implicit behavior, no magic
// - Local-first: user data stays in the embedded database

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod outcome;
pub mod repository;
pub mod store;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{validate_title, validate_todo, DomainError, Todo};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Outcome
// ============================================================================

pub use outcome::Outcome;

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{
    create_connection_pool, create_pool_at, initialize_database, verify_database_integrity,
    ConnectionPool,
};

// ============================================================================
// PUBLIC API - Store
// ============================================================================

pub use store::{SqliteTodoStore, StoreChange, TodoRecord, TodoRecordWatch, TodoSeeder, TodoStore};

// ============================================================================
// PUBLIC API - Repository
// ============================================================================

pub use repository::{
    domain_to_record, record_to_domain, LocalTodoRepository, TodoOutcomes, TodoRepository,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, TodoListModel, TodoListState};
