//! Flat-file persistence for the contact collection
//!
//! Every mutating operation loads the whole file, changes the collection in
//! memory and overwrites the whole file. There is no locking: two processes
//! writing the same file at once will lose or corrupt data. Multi-process use
//! is unsupported; call [`FileStorage::backup_to`] before risky operations.

use crate::contact::Contact;
use crate::error::{ContactBookError, Result};
use anyhow::Context;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod query;

/// Header written by [`FileStorage::export_csv`]; never parsed on load
pub const EXPORT_HEADER: &str =
    "ID,FirstName,LastName,Phone,Email,Address,City,Country,Birthday,Favorite,Labels,Notes,ProfileImage";

/// Storage backend for the contact collection
///
/// Holds nothing but the path of the collection file; the file is the
/// single source of truth between operations.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Create a storage handle for the given collection file
    ///
    /// The file is not touched until the first operation. A missing file
    /// reads as an empty collection.
    ///
    /// # Examples
    ///
    /// ```
    /// use contactbook::storage::FileStorage;
    ///
    /// let storage = FileStorage::new("/tmp/contacts.txt");
    /// assert_eq!(storage.path().to_str(), Some("/tmp/contacts.txt"));
    /// ```
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every contact in file order
    ///
    /// Blank lines are skipped. A missing file yields an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or if any
    /// line is malformed.
    pub fn load(&self) -> Result<Vec<Contact>> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "Collection file missing, starting empty");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)
            .map_err(read_error)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let contacts = parse_lines(&self.path, &contents, false)?;

        tracing::debug!(path = %self.path.display(), count = contacts.len(), "Loaded contacts");
        Ok(contacts)
    }

    /// Overwrite the file with one line per contact, in order
    pub fn save(&self, contacts: &[Contact]) -> Result<()> {
        write_lines(&self.path, None, contacts)?;
        tracing::debug!(path = %self.path.display(), count = contacts.len(), "Saved contacts");
        Ok(())
    }

    /// Append a contact; duplicate ids are not rejected
    pub fn add(&self, contact: Contact) -> Result<()> {
        let mut contacts = self.load()?;
        contacts.push(contact);
        self.save(&contacts)
    }

    /// Remove every contact with the given id
    ///
    /// Returns the number of removed contacts. An absent id is a no-op.
    pub fn delete(&self, id: i64) -> Result<usize> {
        let mut contacts = self.load()?;
        let before = contacts.len();
        contacts.retain(|c| c.id != id);
        let removed = before - contacts.len();
        self.save(&contacts)?;
        Ok(removed)
    }

    /// Replace the first contact with the same id, keeping its position
    ///
    /// Returns `false` if no contact has that id; the file is still
    /// rewritten unchanged in that case.
    pub fn update(&self, updated: Contact) -> Result<bool> {
        let mut contacts = self.load()?;
        let found = match contacts.iter_mut().find(|c| c.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        };
        self.save(&contacts)?;
        Ok(found)
    }

    /// Write `contacts` to `path` with a human-readable header line
    pub fn export_csv<P: AsRef<Path>>(contacts: &[Contact], path: P) -> Result<()> {
        write_lines(path.as_ref(), Some(EXPORT_HEADER), contacts)?;
        tracing::info!(path = %path.as_ref().display(), count = contacts.len(), "Exported contacts");
        Ok(())
    }

    /// Read back contacts written by [`FileStorage::export_csv`]
    ///
    /// A leading [`EXPORT_HEADER`] line is skipped, so a plain collection
    /// file imports as well. The collection file itself is not touched.
    ///
    /// # Errors
    ///
    /// Unlike [`FileStorage::load`], a missing file is an error.
    pub fn import_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Contact>> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(read_error)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let contacts = parse_lines(path, &contents, true)?;
        tracing::info!(path = %path.display(), count = contacts.len(), "Imported contacts");
        Ok(contacts)
    }

    /// Byte-for-byte copy of `source` to `backup`
    pub fn backup<P: AsRef<Path>, Q: AsRef<Path>>(source: P, backup: Q) -> Result<()> {
        copy_file(source.as_ref(), backup.as_ref())
    }

    /// Byte-for-byte copy of `backup` over `target`
    pub fn restore<P: AsRef<Path>, Q: AsRef<Path>>(backup: P, target: Q) -> Result<()> {
        copy_file(backup.as_ref(), target.as_ref())
    }

    /// Copy this collection file to `backup`
    pub fn backup_to<P: AsRef<Path>>(&self, backup: P) -> Result<()> {
        Self::backup(&self.path, backup)
    }

    /// Overwrite this collection file with the contents of `backup`
    pub fn restore_from<P: AsRef<Path>>(&self, backup: P) -> Result<()> {
        Self::restore(backup, &self.path)
    }

    /// First half of the undo protocol: stash a contact before deleting it
    ///
    /// Writes the first contact with `id` to `side_file`, replacing whatever
    /// was stashed before. [`FileStorage::delete`] never does this on its
    /// own, so callers that want [`FileStorage::undo_last_delete`] to work
    /// must call this first. Returns the stashed contact, or `None` (leaving
    /// the side file untouched) if the id is absent.
    pub fn capture_for_undo<P: AsRef<Path>>(
        &self,
        id: i64,
        side_file: P,
    ) -> Result<Option<Contact>> {
        let side_file = side_file.as_ref();
        let Some(contact) = self.load()?.into_iter().find(|c| c.id == id) else {
            return Ok(None);
        };

        write_lines(side_file, None, std::slice::from_ref(&contact))?;
        tracing::debug!(id, side_file = %side_file.display(), "Captured contact for undo");
        Ok(Some(contact))
    }

    /// Whether `side_file` holds a contact for [`FileStorage::undo_last_delete`]
    pub fn has_pending_undo<P: AsRef<Path>>(&self, side_file: P) -> Result<bool> {
        let side_file = side_file.as_ref();
        if !side_file.exists() {
            return Ok(false);
        }
        let contents = fs::read_to_string(side_file)
            .map_err(read_error)
            .with_context(|| format!("Failed to read {}", side_file.display()))?;
        Ok(contents.lines().next().is_some_and(|l| !l.trim().is_empty()))
    }

    /// Second half of the undo protocol: re-add the stashed contact
    ///
    /// Reads the first line of `side_file`, appends that contact to the
    /// collection and empties the side file. If the side file is missing or
    /// empty nothing changes and `Contact::default()` is returned.
    pub fn undo_last_delete<P: AsRef<Path>>(&self, side_file: P) -> Result<Contact> {
        let side_file = side_file.as_ref();
        if !side_file.exists() {
            tracing::debug!(side_file = %side_file.display(), "No undo side file");
            return Ok(Contact::default());
        }

        let contents = fs::read_to_string(side_file)
            .map_err(read_error)
            .with_context(|| format!("Failed to read {}", side_file.display()))?;
        let Some(line) = contents.lines().next().filter(|l| !l.trim().is_empty()) else {
            tracing::debug!(side_file = %side_file.display(), "Undo side file is empty");
            return Ok(Contact::default());
        };

        let contact = Contact::from_line(line)
            .with_context(|| format!("{}:1", side_file.display()))?;
        self.add(contact.clone())?;

        fs::write(side_file, "")
            .map_err(ContactBookError::FileUnavailable)
            .with_context(|| format!("Failed to clear {}", side_file.display()))?;
        tracing::info!(id = contact.id, "Restored last deleted contact");
        Ok(contact)
    }
}

/// Parse non-blank lines, tagging failures with `path:line`
fn parse_lines(path: &Path, contents: &str, skip_header: bool) -> Result<Vec<Contact>> {
    let mut contacts = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if skip_header && index == 0 && line.trim_end_matches('\r') == EXPORT_HEADER {
            continue;
        }
        let contact = Contact::from_line(line)
            .with_context(|| format!("{}:{}", path.display(), index + 1))?;
        contacts.push(contact);
    }
    Ok(contacts)
}

/// Undecodable text is bad data; every other read failure is an access problem
fn read_error(err: std::io::Error) -> ContactBookError {
    if err.kind() == std::io::ErrorKind::InvalidData {
        ContactBookError::MalformedRecord(err.to_string())
    } else {
        ContactBookError::FileUnavailable(err)
    }
}

/// Truncate `path` and write an optional header plus one line per contact
fn write_lines(path: &Path, header: Option<&str>, contacts: &[Contact]) -> Result<()> {
    let mut out = String::new();
    if let Some(header) = header {
        out.push_str(header);
        out.push('\n');
    }
    for contact in contacts {
        if contact.has_unsafe_separators() {
            tracing::warn!(
                id = contact.id,
                "Contact contains a separator character; it will not reload cleanly"
            );
        }
        out.push_str(&contact.to_line());
        out.push('\n');
    }

    let mut file = fs::File::create(path)
        .map_err(ContactBookError::FileUnavailable)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    file.write_all(out.as_bytes())
        .map_err(ContactBookError::FileUnavailable)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let bytes = fs::copy(from, to)
        .map_err(ContactBookError::FileUnavailable)
        .with_context(|| format!("Failed to copy {} to {}", from.display(), to.display()))?;
    tracing::info!(from = %from.display(), to = %to.display(), bytes, "Copied collection file");
    Ok(())
}
