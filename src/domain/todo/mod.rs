pub mod entity;
pub mod invariants;

pub use entity::Todo;
pub use invariants::{validate_title, validate_todo};
