// src/repository/mapper.rs
//
// Row <-> domain mapping for todos

use chrono::DateTime;

use crate::domain::{DomainError, Todo};
use crate::error::AppResult;
use crate::store::TodoRecord;

/// Map a stored row to the domain entity.
///
/// Fails when `created_at` does not fit a chrono timestamp; a corrupt row
/// must surface as a fault, not a silently substituted date.
pub fn record_to_domain(record: &TodoRecord) -> AppResult<Todo> {
    let created_at = DateTime::from_timestamp_millis(record.created_at).ok_or_else(|| {
        DomainError::InvariantViolation(format!(
            "invalid created_at {} for todo {}",
            record.created_at, record.id
        ))
    })?;

    Ok(Todo {
        id: record.id.clone(),
        title: record.title.clone(),
        description: record.description.clone(),
        is_completed: record.is_completed,
        created_at,
    })
}

/// Map a domain entity to its row shape. Infallible.
pub fn domain_to_record(todo: &Todo) -> TodoRecord {
    TodoRecord {
        id: todo.id.clone(),
        title: todo.title.clone(),
        description: todo.description.clone(),
        is_completed: todo.is_completed,
        created_at: todo.created_at.timestamp_millis(),
    }
}
