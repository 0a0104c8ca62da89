//! In-memory queries over a loaded collection
//!
//! These functions never touch the file. Filters preserve the input order;
//! the sorts are stable. Favorite toggles change the slice in place and the
//! caller persists the result with [`super::FileStorage::save`].

use crate::contact::Contact;
use std::collections::BTreeMap;

/// Contacts whose name, phone or email contains `query`, ignoring case
pub fn search(contacts: &[Contact], query: &str) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|c| c.matches_query(query))
        .cloned()
        .collect()
}

/// Contacts whose phone contains `phone` as a substring
pub fn search_by_phone(contacts: &[Contact], phone: &str) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|c| c.phone.contains(phone))
        .cloned()
        .collect()
}

/// Contacts carrying a label exactly equal to `label`
pub fn filter_by_category(contacts: &[Contact], label: &str) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|c| c.has_label(label))
        .cloned()
        .collect()
}

/// Contacts whose country is exactly `country`
pub fn filter_by_country(contacts: &[Contact], country: &str) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|c| c.country == country)
        .cloned()
        .collect()
}

/// Sort ascending by first name
pub fn sort_by_name(contacts: &mut [Contact]) {
    contacts.sort_by(Contact::cmp_by_name);
}

/// Sort ascending by birthday string; contacts without a birthday go last
///
/// Birthdays are compared as text, which is chronological for
/// `YYYY-MM-DD` values.
pub fn sort_by_date(contacts: &mut [Contact]) {
    contacts.sort_by(|a, b| {
        (a.birthday.is_empty(), &a.birthday).cmp(&(b.birthday.is_empty(), &b.birthday))
    });
}

pub fn count(contacts: &[Contact]) -> usize {
    contacts.len()
}

/// Number of label occurrences per label across the collection
///
/// A contact listing the same label twice counts twice.
pub fn count_by_category(contacts: &[Contact]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for label in contacts.iter().flat_map(|c| c.labels.iter()) {
        *counts.entry(label.clone()).or_insert(0) += 1;
    }
    counts
}

/// Whether a contact with the same first name, last name and phone exists
pub fn contact_exists(contacts: &[Contact], candidate: &Contact) -> bool {
    contacts.iter().any(|c| {
        c.first_name == candidate.first_name
            && c.last_name == candidate.last_name
            && c.phone == candidate.phone
    })
}

/// Set the favorite flag on the first contact with `id`
///
/// Returns `false` if no contact matched.
pub fn mark_as_favorite(contacts: &mut [Contact], id: i64) -> bool {
    set_favorite(contacts, id, true)
}

/// Clear the favorite flag on the first contact with `id`
pub fn unmark_favorite(contacts: &mut [Contact], id: i64) -> bool {
    set_favorite(contacts, id, false)
}

fn set_favorite(contacts: &mut [Contact], id: i64, favorite: bool) -> bool {
    match contacts.iter_mut().find(|c| c.id == id) {
        Some(contact) => {
            contact.is_favorite = favorite;
            true
        }
        None => false,
    }
}

pub fn list_favorites(contacts: &[Contact]) -> Vec<Contact> {
    contacts.iter().filter(|c| c.is_favorite).cloned().collect()
}

/// Contacts whose birthday falls on `month_day` (`MM-DD`)
pub fn birthdays_on(contacts: &[Contact], month_day: &str) -> Vec<Contact> {
    contacts
        .iter()
        .filter(|c| c.birthday_month_day() == Some(month_day))
        .cloned()
        .collect()
}

/// One past the largest id in the collection, or 1 when it is empty
///
/// Returns `None` when the largest id is already `i64::MAX`.
pub fn next_id(contacts: &[Contact]) -> Option<i64> {
    match contacts.iter().map(|c| c.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}
