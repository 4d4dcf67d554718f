// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod todo;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use todo::{validate_title, validate_todo, Todo};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
///
/// Display carries the bare rule text so it can surface to users unchanged.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
