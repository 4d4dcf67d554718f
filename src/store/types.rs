// src/store/types.rs
//
// Row-level types for the todos table

/// One row of the todos table
///
/// `created_at` holds epoch milliseconds, matching the column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
    pub created_at: i64,
}

/// What kind of write just happened
///
/// Carried on the change feed for diagnostics. Watchers re-query the full
/// table regardless of the variant, so a dropped signal loses nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreChange {
    Inserted,
    BatchInserted,
    Updated,
    Deleted,
    Cleared,
}
