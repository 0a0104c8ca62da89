//! Handlers that create or change single contacts

use crate::cli::{AddArgs, ContactDetails, UpdateArgs};
use crate::commands::render;
use crate::contact::Contact;
use crate::error::{ContactBookError, Result};
use crate::storage::{query, FileStorage};
use colored::Colorize;
use std::path::Path;

/// Copy every set field of `details` onto `contact`
///
/// Labels are replaced only when at least one was given; the favorite flag
/// is only ever raised here.
pub fn apply_details(contact: &mut Contact, details: ContactDetails) {
    let ContactDetails {
        phone,
        email,
        address,
        city,
        country,
        labels,
        notes,
        birthday,
        image,
        favorite,
    } = details;

    if let Some(phone) = phone {
        contact.phone = phone;
    }
    if let Some(email) = email {
        contact.email = email;
    }
    if let Some(address) = address {
        contact.address = address;
    }
    if let Some(city) = city {
        contact.city = city;
    }
    if let Some(country) = country {
        contact.country = country;
    }
    if !labels.is_empty() {
        contact.labels = labels;
    }
    if let Some(notes) = notes {
        contact.notes = notes;
    }
    if let Some(birthday) = birthday {
        contact.birthday = birthday;
    }
    if let Some(image) = image {
        contact.profile_image_path = image;
    }
    if favorite {
        contact.is_favorite = true;
    }
}

/// Refuse contacts that would not survive a save/load cycle
fn ensure_storable(contact: &Contact) -> Result<()> {
    if contact.has_unsafe_separators() {
        return Err(ContactBookError::MalformedRecord(format!(
            "fields of '{}' may not contain commas or newlines, and labels may not contain '|'",
            contact.full_name()
        ))
        .into());
    }
    Ok(())
}

fn warn_on_invalid_fields(contact: &Contact) {
    if !contact.phone.is_empty() && !contact.is_valid_phone() {
        println!(
            "{}",
            format!("Warning: phone '{}' is not 10+ digits", contact.phone).yellow()
        );
    }
    if !contact.email.is_empty() && !contact.is_valid_email() {
        println!(
            "{}",
            format!("Warning: email '{}' looks invalid", contact.email).yellow()
        );
    }
}

fn next_free_id(contacts: &[Contact]) -> Result<i64> {
    query::next_id(contacts).ok_or_else(|| {
        let max = contacts.iter().map(|c| c.id).max().unwrap_or(i64::MAX);
        ContactBookError::NoFreeId(max).into()
    })
}

/// Build a contact from `args` and append it to the collection
pub fn add(storage: &FileStorage, args: AddArgs) -> Result<()> {
    tracing::info!("Adding contact");
    let contacts = storage.load()?;
    let id = match args.id {
        Some(id) => id,
        None => next_free_id(&contacts)?,
    };

    let mut contact = Contact::new(id, args.first_name, args.last_name);
    apply_details(&mut contact, args.details);
    ensure_storable(&contact)?;
    warn_on_invalid_fields(&contact);

    if query::contact_exists(&contacts, &contact) {
        if !args.force {
            return Err(ContactBookError::DuplicateContact(format!(
                "{} ({}); use --force to add anyway",
                contact.full_name(),
                contact.phone
            ))
            .into());
        }
        tracing::warn!(id, "Adding duplicate contact on request");
    }
    if contacts.iter().any(|c| c.id == id) {
        println!(
            "{}",
            format!("Warning: id {} is already in use", id).yellow()
        );
    }

    let name = contact.full_name();
    storage.add(contact)?;
    println!("{}", format!("Added {} with id {}", name, id).green());
    Ok(())
}

pub fn show(storage: &FileStorage, id: i64, json: bool) -> Result<()> {
    let contact = storage
        .load()?
        .into_iter()
        .find(|c| c.id == id)
        .ok_or(ContactBookError::ContactNotFound(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&contact)?);
    } else {
        println!("{}", render::contact_detail(&contact));
    }
    Ok(())
}

/// Change the given fields of an existing contact and refresh its timestamp
pub fn update(storage: &FileStorage, args: UpdateArgs) -> Result<()> {
    tracing::info!(id = args.id, "Updating contact");
    let mut contact = storage
        .load()?
        .into_iter()
        .find(|c| c.id == args.id)
        .ok_or(ContactBookError::ContactNotFound(args.id))?;

    if let Some(first_name) = args.first_name {
        contact.first_name = first_name;
    }
    if let Some(last_name) = args.last_name {
        contact.last_name = last_name;
    }
    apply_details(&mut contact, args.details);
    ensure_storable(&contact)?;
    warn_on_invalid_fields(&contact);
    contact.touch();

    storage.update(contact)?;
    println!("{}", format!("Updated contact {}", args.id).green());
    Ok(())
}

/// Stash the contact in the undo side file, then delete it
pub fn delete(storage: &FileStorage, id: i64, undo_file: &Path) -> Result<()> {
    tracing::info!(id, "Deleting contact");
    let captured = storage
        .capture_for_undo(id, undo_file)?
        .ok_or(ContactBookError::ContactNotFound(id))?;

    let removed = storage.delete(id)?;
    println!(
        "{}",
        format!(
            "Deleted {} ({} record(s)). Run 'undo' to restore it.",
            captured.full_name(),
            removed
        )
        .green()
    );
    Ok(())
}

/// Re-add the stashed contact, if any
///
/// Returns `false` when the side file holds nothing.
pub fn undo(storage: &FileStorage, undo_file: &Path) -> Result<bool> {
    if !storage.has_pending_undo(undo_file)? {
        println!("{}", "Nothing to undo.".yellow());
        return Ok(false);
    }

    let restored = storage.undo_last_delete(undo_file)?;
    println!(
        "{}",
        format!("Restored {} with id {}", restored.full_name(), restored.id).green()
    );
    Ok(true)
}

/// Load, toggle the favorite flag of the first contact with `id`, save
pub fn set_favorite(storage: &FileStorage, id: i64, favorite: bool) -> Result<()> {
    let mut contacts = storage.load()?;
    let found = if favorite {
        query::mark_as_favorite(&mut contacts, id)
    } else {
        query::unmark_favorite(&mut contacts, id)
    };
    if !found {
        return Err(ContactBookError::ContactNotFound(id).into());
    }

    storage.save(&contacts)?;
    let verb = if favorite { "Marked" } else { "Unmarked" };
    println!("{}", format!("{} contact {} as favorite", verb, id).green());
    Ok(())
}
