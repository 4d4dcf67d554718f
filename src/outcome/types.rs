// src/outcome/types.rs
//
// Outcome - the state of an asynchronous operation
//
// RULES:
// - Streams emit exactly one Loading before any terminal state
// - Single-shot operations produce Success or Error only
// - Error may carry partial data alongside its message

use serde::{Deserialize, Serialize};

/// The state of an asynchronous operation as seen by its consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome<T> {
    /// The operation is still running
    Loading,

    /// The operation completed with data
    Success { data: T },

    /// The operation completed but there is nothing to show
    Empty { title: String, message: String },

    /// The operation failed, optionally with partial data
    Error { message: String, data: Option<T> },
}

impl<T> Outcome<T> {
    pub fn loading() -> Self {
        Outcome::Loading
    }

    pub fn success(data: T) -> Self {
        Outcome::Success { data }
    }

    pub fn empty(title: impl Into<String>, message: impl Into<String>) -> Self {
        Outcome::Empty {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Outcome::Error {
            message: message.into(),
            data: None,
        }
    }

    pub fn error_with(message: impl Into<String>, data: T) -> Self {
        Outcome::Error {
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Outcome::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Error { .. })
    }

    /// Data carried by this outcome, from Success or a partial Error.
    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success { data } => Some(data),
            Outcome::Error { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Outcome::Success { data } => Some(data),
            Outcome::Error { data, .. } => data,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_match_predicates() {
        assert!(Outcome::<i32>::loading().is_loading());
        assert!(Outcome::success(7).is_success());
        assert!(Outcome::<i32>::empty("Nothing here", "Add an item to get started").is_empty());
        assert!(Outcome::<i32>::error("boom").is_error());
    }

    #[test]
    fn test_data_from_success() {
        let outcome = Outcome::success(vec![1, 2, 3]);
        assert_eq!(outcome.data(), Some(&vec![1, 2, 3]));
        assert_eq!(outcome.into_data(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_data_from_partial_error() {
        let outcome = Outcome::error_with("stale", 42);
        assert!(outcome.is_error());
        assert_eq!(outcome.data(), Some(&42));
    }

    #[test]
    fn test_loading_and_empty_carry_no_data() {
        assert_eq!(Outcome::<i32>::loading().data(), None);
        assert_eq!(Outcome::<i32>::empty("t", "m").into_data(), None);
    }

    #[test]
    fn test_error_message_is_preserved() {
        match Outcome::<()>::error("Title cannot be empty") {
            Outcome::Error { message, data } => {
                assert_eq!(message, "Title cannot be empty");
                assert!(data.is_none());
            }
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn test_serializes_with_snake_case_variants() {
        let json = serde_json::to_string(&Outcome::success(1)).unwrap();
        assert_eq!(json, r#"{"success":{"data":1}}"#);

        let json = serde_json::to_string(&Outcome::<i32>::loading()).unwrap();
        assert_eq!(json, r#""loading""#);
    }
}
