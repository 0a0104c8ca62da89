//! Read-only handlers: listing, searching and aggregates

use crate::cli::SortKey;
use crate::commands::render;
use crate::contact::Contact;
use crate::error::Result;
use crate::storage::{query, FileStorage};
use chrono::Local;
use colored::Colorize;

pub fn list(storage: &FileStorage, sort: Option<SortKey>, json: bool, width: usize) -> Result<()> {
    let mut contacts = storage.load()?;
    match sort {
        Some(SortKey::Name) => query::sort_by_name(&mut contacts),
        Some(SortKey::Date) => query::sort_by_date(&mut contacts),
        None => {}
    }
    render::print_contacts(&contacts, json, width)
}

pub fn search(storage: &FileStorage, text: &str, json: bool, width: usize) -> Result<()> {
    let contacts = storage.load()?;
    let results = query::search(&contacts, text);
    tracing::debug!(query = text, matches = results.len(), "Search finished");
    render::print_contacts(&results, json, width)
}

pub fn phone(storage: &FileStorage, number: &str, width: usize) -> Result<()> {
    let contacts = storage.load()?;
    render::print_contacts(&query::search_by_phone(&contacts, number), false, width)
}

/// Apply whichever of the label, country and favorites filters were given
pub fn filter(
    storage: &FileStorage,
    label: Option<&str>,
    country: Option<&str>,
    favorites_only: bool,
    width: usize,
) -> Result<()> {
    let contacts = storage.load()?;
    let results = filter_contacts(contacts, label, country, favorites_only);
    render::print_contacts(&results, false, width)
}

/// The filters commute, so the order they are applied in does not matter
pub fn filter_contacts(
    mut contacts: Vec<Contact>,
    label: Option<&str>,
    country: Option<&str>,
    favorites_only: bool,
) -> Vec<Contact> {
    if let Some(label) = label {
        contacts = query::filter_by_category(&contacts, label);
    }
    if let Some(country) = country {
        contacts = query::filter_by_country(&contacts, country);
    }
    if favorites_only {
        contacts = query::list_favorites(&contacts);
    }
    contacts
}

pub fn favorites(storage: &FileStorage, width: usize) -> Result<()> {
    let contacts = storage.load()?;
    render::print_contacts(&query::list_favorites(&contacts), false, width)
}

pub fn stats(storage: &FileStorage) -> Result<()> {
    let contacts = storage.load()?;
    let favorites = query::list_favorites(&contacts).len();

    println!("{} {}", "Contacts:".bold(), query::count(&contacts));
    println!("{} {}", "Favorites:".bold(), favorites);

    let counts = query::count_by_category(&contacts);
    if counts.is_empty() {
        println!("{}", "No labels in use.".yellow());
    } else {
        render::label_counts_table(&counts).printstd();
    }
    Ok(())
}

/// Contacts whose birthday is on `date` (`MM-DD`), today when omitted
pub fn birthdays(storage: &FileStorage, date: Option<String>, width: usize) -> Result<()> {
    let month_day = date.unwrap_or_else(|| Local::now().format("%m-%d").to_string());
    let contacts = storage.load()?;
    let upcoming = query::birthdays_on(&contacts, &month_day);

    if upcoming.is_empty() {
        println!("{}", format!("No birthdays on {}.", month_day).yellow());
        return Ok(());
    }
    println!("{}", format!("Birthdays on {}:", month_day).bold());
    render::print_contacts(&upcoming, false, width)
}
