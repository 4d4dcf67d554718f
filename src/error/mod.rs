// src/error/mod.rs
//
// Error module
//
// Provides the application-level error type and result alias.

pub mod types;

pub use types::{AppError, AppResult};
