//! Terminal rendering of contacts
//!
//! Builds tables and detail views; callers decide where to print them.

use crate::contact::Contact;
use crate::error::Result;
use colored::Colorize;
use prettytable::{format, Table};
use std::collections::BTreeMap;

/// Shorten `text` to at most `max` characters, marking the cut with `...`
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// One row per contact, header in bold
pub fn contacts_table(contacts: &[Contact], max_width: usize) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.set_titles(prettytable::row![
        "ID".bold(),
        "Name".bold(),
        "Phone".bold(),
        "Email".bold(),
        "City".bold(),
        "Country".bold(),
        "Labels".bold(),
        "Fav".bold()
    ]);

    for contact in contacts {
        let favorite = if contact.is_favorite {
            "*".yellow().to_string()
        } else {
            String::new()
        };
        table.add_row(prettytable::row![
            contact.id.to_string().cyan(),
            truncate(&contact.full_name(), max_width),
            contact.phone,
            truncate(&contact.email, max_width),
            truncate(&contact.city, max_width),
            truncate(&contact.country, max_width),
            truncate(&contact.labels.join(", "), max_width),
            favorite
        ]);
    }

    table
}

/// Every field of one contact, one per line
pub fn contact_detail(contact: &Contact) -> String {
    let mut lines = vec![
        format!("{} {}", "ID:".bold(), contact.id),
        format!("{} {}", "Name:".bold(), contact.full_name()),
        format!("{} {}", "Phone:".bold(), contact.phone),
        format!("{} {}", "Email:".bold(), contact.email),
        format!(
            "{} {}, {}, {}",
            "Address:".bold(),
            contact.address,
            contact.city,
            contact.country
        ),
        format!("{} {}", "Birthday:".bold(), contact.birthday),
        format!("{} {}", "Notes:".bold(), contact.notes),
        format!("{} {}", "Labels:".bold(), contact.labels.join(", ")),
        format!(
            "{} {}",
            "Favorite:".bold(),
            if contact.is_favorite { "Yes" } else { "No" }
        ),
        format!("{} {}", "Last Modified:".bold(), contact.last_modified),
    ];
    if !contact.profile_image_path.is_empty() {
        lines.push(format!(
            "{} {}",
            "Profile Image:".bold(),
            contact.profile_image_path
        ));
    }
    lines.join("\n")
}

/// Label counts as a two-column table
pub fn label_counts_table(counts: &BTreeMap<String, usize>) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);
    table.set_titles(prettytable::row!["Label".bold(), "Contacts".bold()]);
    for (label, count) in counts {
        table.add_row(prettytable::row![label.cyan(), count]);
    }
    table
}

/// Print contacts as a table (or JSON), with a note when there are none
pub fn print_contacts(contacts: &[Contact], json: bool, max_width: usize) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(contacts)?);
        return Ok(());
    }

    if contacts.is_empty() {
        println!("{}", "No contacts found.".yellow());
        return Ok(());
    }

    contacts_table(contacts, max_width).printstd();
    println!("{} contact(s)", contacts.len());
    Ok(())
}
