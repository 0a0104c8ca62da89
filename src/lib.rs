//! contactbook - personal contact book library
//!
//! This library provides the record format and collection store behind the
//! `contactbook` CLI.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `contact`: The contact record, its line format and query predicate
//! - `storage`: Whole-file load/save, CRUD by id, backup/restore, undo, and
//!   in-memory queries (`storage::query`)
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Command handlers, terminal rendering and the interactive shell
//!
//! # Example
//!
//! ```no_run
//! use contactbook::storage::{query, FileStorage};
//! use contactbook::Contact;
//!
//! fn main() -> anyhow::Result<()> {
//!     let storage = FileStorage::new("contacts.txt");
//!     storage.add(Contact::new(1, "Ann", "Lee").with_phone("5551234567"))?;
//!
//!     let contacts = storage.load()?;
//!     let matches = query::search(&contacts, "ann");
//!     assert_eq!(matches.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod contact;
pub mod error;
pub mod storage;

// Re-export commonly used types
pub use config::Config;
pub use contact::Contact;
pub use error::{ContactBookError, Result};
pub use storage::FileStorage;

#[cfg(test)]
pub mod test_utils;
