//! Export, import, backup and restore handlers

use crate::error::Result;
use crate::storage::{query, FileStorage};
use colored::Colorize;
use std::path::Path;

pub fn export(storage: &FileStorage, path: &Path) -> Result<()> {
    let contacts = storage.load()?;
    FileStorage::export_csv(&contacts, path)?;
    println!(
        "{}",
        format!("Exported {} contact(s) to {}", contacts.len(), path.display()).green()
    );
    Ok(())
}

/// Bring the contacts of an exported file into the collection
///
/// Contacts that already exist (same first name, last name and phone) are
/// skipped. With `replace` the current collection file is copied to
/// `backup_path` and the imported contacts become the whole collection.
/// Returns the number of contacts added.
pub fn import(
    storage: &FileStorage,
    path: &Path,
    replace: bool,
    backup_path: &Path,
) -> Result<usize> {
    let incoming = FileStorage::import_csv(path)?;

    let mut contacts = if replace {
        if storage.path().exists() {
            storage.backup_to(backup_path)?;
            println!(
                "{}",
                format!("Previous collection saved to {}", backup_path.display()).yellow()
            );
        }
        Vec::new()
    } else {
        storage.load()?
    };

    let mut added = 0;
    let mut skipped = 0;
    for contact in incoming {
        if query::contact_exists(&contacts, &contact) {
            tracing::debug!(id = contact.id, "Skipping duplicate on import");
            skipped += 1;
            continue;
        }
        contacts.push(contact);
        added += 1;
    }

    storage.save(&contacts)?;
    println!(
        "{}",
        format!("Imported {} contact(s) from {}", added, path.display()).green()
    );
    if skipped > 0 {
        println!("{}", format!("Skipped {} duplicate(s)", skipped).yellow());
    }
    Ok(added)
}

pub fn backup(storage: &FileStorage, path: &Path) -> Result<()> {
    storage.backup_to(path)?;
    println!("{}", format!("Backed up to {}", path.display()).green());
    Ok(())
}

/// Overwrite the collection with `path`, checking first that it parses
pub fn restore(storage: &FileStorage, path: &Path) -> Result<()> {
    let restored = FileStorage::new(path).load()?;
    storage.restore_from(path)?;
    println!(
        "{}",
        format!(
            "Restored {} contact(s) from {}",
            restored.len(),
            path.display()
        )
        .green()
    );
    Ok(())
}
