/*!
Command handlers for the CLI

Each handler follows the same cycle as the store itself: load the whole
collection, work on it in memory, and save it back when something changed.

- `contacts`: add, show, update, delete/undo, favorites
- `queries`: list, search, filter, stats, birthdays
- `backup`: export, import, backup, restore
- `render`: tables and detail views
- `shell`: interactive loop over the same commands
*/

use crate::cli::Commands;
use crate::config::Config;
use crate::error::Result;
use crate::storage::FileStorage;
use anyhow::Context;
use std::path::Path;

pub mod backup;
pub mod contacts;
pub mod queries;
pub mod render;
pub mod shell;

/// Run one parsed command against the configured collection
pub fn execute(config: &Config, command: Commands) -> Result<()> {
    let storage = FileStorage::new(&config.storage.data_file);
    let width = config.display.max_column_width;

    match command {
        Commands::Add(args) => contacts::add(&storage, args),
        Commands::List { json, sort } => queries::list(&storage, sort, json, width),
        Commands::Show { id, json } => contacts::show(&storage, id, json),
        Commands::Update(args) => contacts::update(&storage, args),
        Commands::Delete { id } => contacts::delete(&storage, id, &config.storage.undo_file),
        Commands::Undo => contacts::undo(&storage, &config.storage.undo_file).map(|_| ()),
        Commands::Search { query, json } => queries::search(&storage, &query, json, width),
        Commands::Phone { number } => queries::phone(&storage, &number, width),
        Commands::Filter {
            label,
            country,
            favorites,
        } => queries::filter(
            &storage,
            label.as_deref(),
            country.as_deref(),
            favorites,
            width,
        ),
        Commands::Favorite { id } => contacts::set_favorite(&storage, id, true),
        Commands::Unfavorite { id } => contacts::set_favorite(&storage, id, false),
        Commands::Favorites => queries::favorites(&storage, width),
        Commands::Stats => queries::stats(&storage),
        Commands::Birthdays { date } => queries::birthdays(&storage, date, width),
        Commands::Export { path } => backup::export(&storage, &path),
        Commands::Import { path, replace } => {
            backup::import(&storage, &path, replace, &config.storage.backup_file).map(|_| ())
        }
        Commands::Backup { path } => {
            let path = path.unwrap_or_else(|| config.storage.backup_file.clone());
            backup::backup(&storage, &path)
        }
        Commands::Restore { path } => {
            let path = path.unwrap_or_else(|| config.storage.backup_file.clone());
            backup::restore(&storage, &path)
        }
        Commands::Shell => shell::run_shell(config),
    }
}

/// Create the directories that will hold the configured files
pub fn prepare_storage_dirs(config: &Config) -> Result<()> {
    for path in [
        &config.storage.data_file,
        &config.storage.backup_file,
        &config.storage.undo_file,
    ] {
        ensure_parent_dir(path)?;
    }
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}
