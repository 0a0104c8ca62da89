//! Command-line interface definition for contactbook
//!
//! This module defines the CLI structure using clap's derive API. The same
//! [`Commands`] enum drives both one-shot invocations and the interactive
//! shell.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// contactbook - personal contact book manager
///
/// Stores contacts one per line in a flat file and offers search, filter,
/// favorites, backup/restore and undo of the last delete.
#[derive(Parser, Debug, Clone)]
#[command(name = "contactbook")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Collection file to operate on (overrides config and environment)
    #[arg(short = 'f', long)]
    pub data_file: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// One line typed into the interactive shell
///
/// Parsed without a binary name, so `search ann` is a complete input.
#[derive(Parser, Debug, Clone)]
#[command(name = "contactbook", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for contactbook
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a new contact
    Add(AddArgs),

    /// List all contacts
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Sort before printing (file order otherwise)
        #[arg(short, long, value_enum)]
        sort: Option<SortKey>,
    },

    /// Show every field of one contact
    Show {
        /// Contact id
        id: i64,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Change fields of an existing contact
    Update(UpdateArgs),

    /// Delete a contact (restorable with `undo`)
    Delete {
        /// Contact id
        id: i64,
    },

    /// Restore the most recently deleted contact
    Undo,

    /// Search names, phone numbers and emails (case-insensitive)
    Search {
        /// Text to look for
        query: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Find contacts whose phone number contains the given digits
    Phone {
        /// Phone number fragment
        number: String,
    },

    /// Filter by label and/or country (exact match)
    Filter {
        /// Label the contact must carry
        #[arg(short, long, required_unless_present = "country")]
        label: Option<String>,

        /// Country the contact must live in
        #[arg(short, long)]
        country: Option<String>,

        /// Only favorites
        #[arg(long)]
        favorites: bool,
    },

    /// Mark a contact as favorite
    Favorite {
        /// Contact id
        id: i64,
    },

    /// Remove the favorite mark from a contact
    Unfavorite {
        /// Contact id
        id: i64,
    },

    /// List favorite contacts
    Favorites,

    /// Show totals and per-label counts
    Stats,

    /// List contacts whose birthday is on the given day
    Birthdays {
        /// Day as MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Write all contacts to a file with a header row
    Export {
        /// Destination file
        path: PathBuf,
    },

    /// Read contacts from an exported file into the collection
    Import {
        /// File written by `export` (the header row is optional)
        path: PathBuf,

        /// Replace the collection instead of appending (the old one is backed up first)
        #[arg(long)]
        replace: bool,
    },

    /// Copy the collection file to the backup location
    Backup {
        /// Backup file (defaults to the configured one)
        path: Option<PathBuf>,
    },

    /// Overwrite the collection file with a backup
    Restore {
        /// Backup file (defaults to the configured one)
        path: Option<PathBuf>,
    },

    /// Start an interactive shell
    Shell,
}

/// Sort order for `list`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// First name, ascending
    Name,
    /// Birthday, ascending; contacts without one last
    Date,
}

/// Arguments of the `add` command
#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// First name
    pub first_name: String,

    /// Last name
    #[arg(default_value = "")]
    pub last_name: String,

    /// Explicit id (defaults to one past the largest stored id)
    #[arg(long)]
    pub id: Option<i64>,

    /// Add even if a contact with the same name and phone exists
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub details: ContactDetails,
}

/// Arguments of the `update` command
#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Id of the contact to change
    pub id: i64,

    /// New first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// New last name
    #[arg(long)]
    pub last_name: Option<String>,

    #[command(flatten)]
    pub details: ContactDetails,
}

/// Optional contact fields shared by `add` and `update`
#[derive(Args, Debug, Clone, Default)]
pub struct ContactDetails {
    /// Phone number (10+ digits)
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Email address
    #[arg(short, long)]
    pub email: Option<String>,

    /// Street address
    #[arg(long)]
    pub address: Option<String>,

    /// City
    #[arg(long)]
    pub city: Option<String>,

    /// Country
    #[arg(long)]
    pub country: Option<String>,

    /// Label (repeatable); on update, replaces all labels
    #[arg(short, long = "label")]
    pub labels: Vec<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,

    /// Birthday, YYYY-MM-DD by convention
    #[arg(short, long)]
    pub birthday: Option<String>,

    /// Path to a profile image
    #[arg(long)]
    pub image: Option<String>,

    /// Mark as favorite
    #[arg(long)]
    pub favorite: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
