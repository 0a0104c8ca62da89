//! Configuration management for contactbook
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{ContactBookError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for contactbook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Locations of the collection, backup and undo side files
    #[serde(default)]
    pub storage: StorageConfig,
    /// Terminal output settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// File locations used by the collection store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Collection file, one contact per line
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Target of `backup` and source of `restore`
    #[serde(default = "default_backup_file")]
    pub backup_file: PathBuf,

    /// Side file holding the most recently deleted contact
    #[serde(default = "default_undo_file")]
    pub undo_file: PathBuf,
}

/// Directory holding the default files
///
/// Falls back to the working directory when no home directory is known.
fn default_data_dir() -> PathBuf {
    ProjectDirs::from("com", "contactbook", "contactbook")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_data_file() -> PathBuf {
    default_data_dir().join("contacts.txt")
}

fn default_backup_file() -> PathBuf {
    default_data_dir().join("contacts_backup.txt")
}

fn default_undo_file() -> PathBuf {
    default_data_dir().join("last_deleted.txt")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            backup_file: default_backup_file(),
            undo_file: default_undo_file(),
        }
    }
}

/// Terminal output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Colorize table headers and status messages
    #[serde(default = "default_color")]
    pub color: bool,

    /// Truncate long cells in list tables to this many characters
    #[serde(default = "default_max_column_width")]
    pub max_column_width: usize,
}

fn default_color() -> bool {
    true
}

fn default_max_column_width() -> usize {
    30
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            max_column_width: default_max_column_width(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error: defaults are used, with a warning
    /// only when the path was given explicitly.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else if cli.config.is_some() {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        } else {
            tracing::debug!("No config file at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ContactBookError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| ContactBookError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(data_file) = std::env::var("CONTACTBOOK_DATA_FILE") {
            tracing::debug!(data_file = %data_file, "Env override: CONTACTBOOK_DATA_FILE");
            self.storage.data_file = PathBuf::from(data_file);
        }

        if let Ok(backup_file) = std::env::var("CONTACTBOOK_BACKUP_FILE") {
            tracing::debug!(backup_file = %backup_file, "Env override: CONTACTBOOK_BACKUP_FILE");
            self.storage.backup_file = PathBuf::from(backup_file);
        }

        if let Ok(undo_file) = std::env::var("CONTACTBOOK_UNDO_FILE") {
            tracing::debug!(undo_file = %undo_file, "Env override: CONTACTBOOK_UNDO_FILE");
            self.storage.undo_file = PathBuf::from(undo_file);
        }

        if let Ok(color) = std::env::var("CONTACTBOOK_COLOR") {
            match color.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.display.color = true,
                "0" | "false" | "no" => self.display.color = false,
                _ => tracing::warn!("Invalid CONTACTBOOK_COLOR: {}", color),
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if cli.verbose {
            tracing::debug!("Verbose mode enabled");
        }

        if let Some(data_file) = &cli.data_file {
            self.storage.data_file = data_file.clone();
        }

        if cli.no_color {
            self.display.color = false;
        }
    }

    /// Validate the configuration
    ///
    /// The three storage files must be set and pairwise distinct.
    pub fn validate(&self) -> Result<()> {
        let storage = &self.storage;
        let named = [
            ("storage.data_file", &storage.data_file),
            ("storage.backup_file", &storage.backup_file),
            ("storage.undo_file", &storage.undo_file),
        ];

        for (name, path) in &named {
            if path.as_os_str().is_empty() {
                return Err(ContactBookError::Config(format!("{} cannot be empty", name)).into());
            }
        }

        if storage.backup_file == storage.data_file {
            return Err(ContactBookError::Config(
                "storage.backup_file must differ from storage.data_file".to_string(),
            )
            .into());
        }

        if storage.undo_file == storage.data_file || storage.undo_file == storage.backup_file {
            return Err(ContactBookError::Config(
                "storage.undo_file must differ from the data and backup files".to_string(),
            )
            .into());
        }

        if self.display.max_column_width < 4 {
            return Err(ContactBookError::Config(
                "display.max_column_width must be at least 4".to_string(),
            )
            .into());
        }

        Ok(())
    }
}
