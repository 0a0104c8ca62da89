//! Test utilities for contactbook
//!
//! This module provides common test utilities including temporary directory
//! management, test file creation, and sample contacts.

use crate::contact::Contact;
use crate::error::ContactBookError;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary directory for testing
///
/// The directory is removed when the returned `TempDir` is dropped.
pub fn temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temporary directory")
}

/// Create a test file with the given content and return its path
///
/// # Panics
///
/// Panics if file creation or writing fails
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

/// A fully populated contact whose fields contain no separators
///
/// Everything except `id` and `first_name` is fixed, so two calls with
/// the same arguments compare equal.
pub fn sample_contact(id: i64, first_name: &str) -> Contact {
    Contact::new(id, first_name, "Lee")
        .with_phone("5551234567")
        .with_email(format!("{}@example.com", first_name.to_lowercase()))
        .with_address("1 Main St", "Oslo", "Norway")
        .with_labels(vec!["friends".to_string()])
        .with_notes("sample")
        .with_birthday("1990-04-01")
}

/// Assert that an error is a `ContactBookError` whose message contains `expected`
///
/// # Panics
///
/// Panics if the result is Ok, the error has another type, or the message
/// doesn't contain the expected text
pub fn assert_error_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, expected: &str) {
    match result {
        Ok(value) => panic!("Expected error containing '{}', got Ok({:?})", expected, value),
        Err(e) => {
            let inner = e
                .downcast_ref::<ContactBookError>()
                .unwrap_or_else(|| panic!("Expected ContactBookError, got: {:#}", e));
            assert!(
                inner.to_string().contains(expected),
                "Error '{}' does not contain '{}'",
                inner,
                expected
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
    }

    #[test]
    fn test_create_test_file() {
        let dir = temp_dir();
        let path = create_test_file(&dir, "test.txt", "content");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "content");
    }

    #[test]
    fn test_sample_contact_is_deterministic() {
        assert_eq!(sample_contact(3, "Ann"), sample_contact(3, "Ann"));
        assert!(!sample_contact(3, "Ann").has_unsafe_separators());
    }

    #[test]
    fn test_assert_error_contains_matches() {
        let result: anyhow::Result<()> =
            Err(ContactBookError::MalformedRecord("bad id".to_string()).into());
        assert_error_contains(result, "bad id");
    }

    #[test]
    #[should_panic(expected = "Expected error")]
    fn test_assert_error_contains_panics_on_ok() {
        assert_error_contains(Ok(1), "anything");
    }
}
