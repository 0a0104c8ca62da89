//! Error types for contactbook
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for contactbook operations
///
/// Record parsing and file access errors come from the store; the rest
/// are raised by configuration loading and the CLI handlers.
#[derive(Error, Debug)]
pub enum ContactBookError {
    /// A stored line could not be turned back into a contact
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// The collection, backup or side file could not be read or written
    #[error("File unavailable")]
    FileUnavailable(#[from] std::io::Error),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A contact with the same name and phone is already stored
    #[error("Duplicate contact: {0}")]
    DuplicateContact(String),

    /// No stored contact carries the requested id
    #[error("No contact with id {0}")]
    ContactNotFound(i64),

    /// The collection already holds the largest possible id
    #[error("No free id after {0}; pass --id explicitly")]
    NoFreeId(i64),
}

/// Result type alias for contactbook operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
