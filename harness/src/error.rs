//! Error types for the harness.
//!
//! # Design
//! Both variants are recoverable by construction: `run_test` folds them into
//! a failed `TestResult` with a message, and the run always continues to the
//! next test case. Nothing in the harness treats a single failed call as
//! fatal.

use std::fmt;

/// Errors surfaced while preparing or executing a single HTTP call.
#[derive(Debug)]
pub enum HarnessError {
    /// The call never produced a response: connection refused, DNS failure,
    /// or the 10-second timeout elapsed.
    Transport(String),

    /// The request payload could not be encoded to JSON or form data.
    InvalidBody(String),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarnessError::Transport(msg) => write!(f, "network error: {msg}"),
            HarnessError::InvalidBody(msg) => write!(f, "invalid request body: {msg}"),
        }
    }
}

impl std::error::Error for HarnessError {}
