use super::entity::Todo;
use crate::domain::{DomainError, DomainResult};

/// Validates all Todo invariants
/// These are the absolute rules that must hold for a Todo to be valid
pub fn validate_todo(todo: &Todo) -> DomainResult<()> {
    validate_title(&todo.title)?;
    Ok(())
}

/// Title cannot be blank
pub fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the Todo domain:
///
/// 1. Identity is immutable once assigned
/// 2. Title is never blank
/// 3. Description may be empty
/// 4. Created timestamp never changes
/// 5. Completion is the only state that flips over a Todo's lifetime
