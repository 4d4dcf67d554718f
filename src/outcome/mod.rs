// src/outcome/mod.rs
//
// Outcome module
//
// Provides the four-state wrapper shared by every asynchronous operation.

pub mod types;

pub use types::Outcome;
