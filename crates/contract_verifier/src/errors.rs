//! Error types for contract verification.
//!
//! Every deviation from an expected contract is reported as one of these
//! errors. None of them is retried or recovered from: a verification error
//! fails the check that produced it.

use serde_json::Value;
use std::fmt;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// The request a verification step was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateAlbum,
    ReadAlbum,
    PartialUpdate,
    FullReplace,
    DeleteAlbum,
    ReadDeletedAlbum,
    Cleanup,
    ReadCollection,
    CreatePost,
    ListPosts,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::CreateAlbum => "create album",
            Operation::ReadAlbum => "read album",
            Operation::PartialUpdate => "partial update (PATCH)",
            Operation::FullReplace => "full replace (PUT)",
            Operation::DeleteAlbum => "delete album",
            Operation::ReadDeletedAlbum => "read deleted album",
            Operation::Cleanup => "cleanup",
            Operation::ReadCollection => "read collection",
            Operation::CreatePost => "create post",
            Operation::ListPosts => "list posts",
        };
        f.write_str(name)
    }
}

/// One field whose observed value differs from the expected projection.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMismatch {
    pub field: String,
    pub expected: Value,
    /// `None` when the record does not contain the field at all.
    pub actual: Option<Value>,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.actual {
            Some(actual) => write!(
                f,
                "'{}' expected {} but found {}",
                self.field, self.expected, actual
            ),
            None => write!(
                f,
                "'{}' expected {} but the field is missing",
                self.field, self.expected
            ),
        }
    }
}

fn join_mismatches(mismatches: &[FieldMismatch]) -> String {
    mismatches
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors raised when a service response breaks its contract.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request itself failed (bad URL, connection failure, timeout, or an
    /// unparseable body).
    #[error("HTTP request failed: {0}")]
    Client(#[from] api_client::Error),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation was attempted from a lifecycle state that does not allow it.
    #[error("Cannot {operation} album {album_id} in state {state}")]
    InvalidTransition {
        album_id: String,
        state: crate::LifecycleState,
        operation: Operation,
    },

    /// The response took longer than the allowed budget.
    #[error("GET {path} took {elapsed_ms}ms, budget is {budget_ms}ms")]
    LatencyExceeded {
        path: String,
        elapsed_ms: u128,
        budget_ms: u128,
    },

    /// A response body was not JSON, or not the kind of JSON value expected.
    #[error("{operation}: expected {expected} but received {body}")]
    MalformedBody {
        operation: Operation,
        expected: &'static str,
        body: String,
    },

    /// A required field was absent from a response body.
    #[error("{operation}: response is missing field '{field}'")]
    MissingField { operation: Operation, field: String },

    /// No element of a collection had the expected field value.
    #[error("GET {path}: no element has '{field}' equal to {value}")]
    NoMatchingElement {
        path: String,
        field: String,
        value: Value,
    },

    /// The fetched record does not match the expected projection.
    #[error("Album {album_id} does not match expected state: {}", join_mismatches(.mismatches))]
    StateMismatch {
        album_id: String,
        mismatches: Vec<FieldMismatch>,
    },

    /// A response body did not have the exact expected shape.
    #[error("{operation}: expected body {expected} but received {actual}")]
    UnexpectedBody {
        operation: Operation,
        expected: Value,
        actual: Value,
    },

    /// The response status code differs from the contract.
    #[error("{operation}: expected status {expected} but received {actual} (body: {body})")]
    UnexpectedStatus {
        operation: Operation,
        expected: u16,
        actual: u16,
        body: String,
    },

    /// A single response field had the wrong value.
    #[error("{operation}: expected '{field}' to be {expected} but received {actual}")]
    UnexpectedValue {
        operation: Operation,
        field: String,
        expected: Value,
        actual: Value,
    },
}
