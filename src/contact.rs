//! Contact record and its line format
//!
//! A [`Contact`] is persisted as one line of text. Fields are joined with a
//! comma in a fixed order and the label list is joined with a pipe into a
//! single field:
//!
//! ```text
//! id,firstName,lastName,phone,email,address,city,country,birthday,favorite,label1|label2,notes,profileImagePath
//! ```
//!
//! The format carries no quoting or escaping. A comma inside a free-text
//! field (or a pipe inside a label) shifts the columns on reload, so callers
//! that accept arbitrary input should check [`Contact::has_unsafe_separators`]
//! before saving.

use crate::error::{ContactBookError, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Separator between fields of a stored line
pub const FIELD_SEPARATOR: char = ',';

/// Separator between labels inside the labels field
pub const LABEL_SEPARATOR: char = '|';

/// Minimum number of fields a stored line must carry
///
/// The trailing profile image column is optional.
pub const REQUIRED_FIELDS: usize = 12;

/// Current local time in the format stored in `last_modified`
pub fn now_timestamp() -> String {
    Local::now().format("%a %b %e %H:%M:%S %Y").to_string()
}

/// One entry of the contact book
///
/// Validation is exposed through [`Contact::is_valid_phone`] and
/// [`Contact::is_valid_email`] but never enforced on construction.
///
/// Equality ignores `last_modified`, which is regenerated whenever a
/// contact is constructed or parsed rather than stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    /// Caller-assigned identifier (not checked for uniqueness)
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub country: String,
    /// Free-form tags in insertion order; duplicates allowed
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub notes: String,
    /// Free-form date string, `YYYY-MM-DD` by convention
    #[serde(default)]
    pub birthday: String,
    #[serde(default)]
    pub is_favorite: bool,
    /// Set at construction, refreshed only by [`Contact::touch`]
    #[serde(default = "now_timestamp")]
    pub last_modified: String,
    #[serde(default)]
    pub profile_image_path: String,
}

impl Default for Contact {
    fn default() -> Self {
        Self {
            id: 0,
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
            labels: Vec::new(),
            notes: String::new(),
            birthday: String::new(),
            is_favorite: false,
            last_modified: now_timestamp(),
            profile_image_path: String::new(),
        }
    }
}

impl PartialEq for Contact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.phone == other.phone
            && self.email == other.email
            && self.address == other.address
            && self.city == other.city
            && self.country == other.country
            && self.labels == other.labels
            && self.notes == other.notes
            && self.birthday == other.birthday
            && self.is_favorite == other.is_favorite
            && self.profile_image_path == other.profile_image_path
    }
}

impl Eq for Contact {}

impl Contact {
    /// Create a contact with an id and a name; every other field is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use contactbook::Contact;
    ///
    /// let contact = Contact::new(1, "Ann", "Lee")
    ///     .with_phone("5551234567")
    ///     .with_labels(vec!["work".to_string()]);
    /// assert_eq!(contact.first_name, "Ann");
    /// assert!(contact.has_label("work"));
    /// ```
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_address(
        mut self,
        address: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.address = address.into();
        self.city = city.into();
        self.country = country.into();
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_birthday(mut self, birthday: impl Into<String>) -> Self {
        self.birthday = birthday.into();
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.is_favorite = favorite;
        self
    }

    pub fn with_profile_image(mut self, path: impl Into<String>) -> Self {
        self.profile_image_path = path.into();
        self
    }

    /// First and last name joined by a space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Refresh `last_modified` to the current time
    pub fn touch(&mut self) {
        self.last_modified = now_timestamp();
    }

    /// Append a label; duplicates are kept
    pub fn add_label(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
    }

    /// Remove every label exactly equal to `label`
    pub fn remove_label(&mut self, label: &str) {
        self.labels.retain(|l| l != label);
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn is_valid_phone(&self) -> bool {
        is_valid_phone(&self.phone)
    }

    pub fn is_valid_email(&self) -> bool {
        is_valid_email(&self.email)
    }

    /// Case-insensitive substring match against name, phone and email
    ///
    /// Both the query and the compared fields are lower-cased, so `"ANN"`
    /// matches a first name of `"ann"` and vice versa.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        [
            &self.first_name,
            &self.last_name,
            &self.phone,
            &self.email,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&query))
    }

    /// Order by first name only, byte-wise
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.first_name.cmp(&other.first_name)
    }

    /// `MM-DD` part of a `YYYY-MM-DD` birthday, if the string is long enough
    pub fn birthday_month_day(&self) -> Option<&str> {
        self.birthday.get(5..10)
    }

    /// Whether any field would break column alignment when stored
    pub fn has_unsafe_separators(&self) -> bool {
        let free_text = [
            &self.first_name,
            &self.last_name,
            &self.phone,
            &self.email,
            &self.address,
            &self.city,
            &self.country,
            &self.notes,
            &self.birthday,
            &self.profile_image_path,
        ];
        let breaks_line = |s: &str| s.contains(FIELD_SEPARATOR) || s.contains('\n');

        free_text.iter().any(|s| breaks_line(s.as_str()))
            || self
                .labels
                .iter()
                .any(|l| breaks_line(l.as_str()) || l.contains(LABEL_SEPARATOR))
    }

    /// Serialize to one stored line (without the trailing newline)
    pub fn to_line(&self) -> String {
        let label_sep = LABEL_SEPARATOR.to_string();
        let field_sep = FIELD_SEPARATOR.to_string();
        let id = self.id.to_string();
        let labels = self.labels.join(label_sep.as_str());
        let favorite = if self.is_favorite { "1" } else { "0" };

        [
            id.as_str(),
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.address.as_str(),
            self.city.as_str(),
            self.country.as_str(),
            self.birthday.as_str(),
            favorite,
            labels.as_str(),
            self.notes.as_str(),
            self.profile_image_path.as_str(),
        ]
        .join(field_sep.as_str())
    }

    /// Parse one stored line
    ///
    /// # Errors
    ///
    /// Returns [`ContactBookError::MalformedRecord`] if the line has fewer
    /// than [`REQUIRED_FIELDS`] fields or the id is not an integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use contactbook::Contact;
    ///
    /// let line = "7,Ann,Lee,5551234567,ann@example.com,1 Main St,Oslo,Norway,1990-04-01,1,work|gym,,";
    /// let contact = Contact::from_line(line).unwrap();
    /// assert_eq!(contact.id, 7);
    /// assert!(contact.is_favorite);
    /// assert_eq!(contact.labels, vec!["work", "gym"]);
    /// ```
    pub fn from_line(line: &str) -> Result<Self> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();

        if fields.len() < REQUIRED_FIELDS {
            return Err(ContactBookError::MalformedRecord(format!(
                "expected at least {} fields, found {}",
                REQUIRED_FIELDS,
                fields.len()
            ))
            .into());
        }
        if fields.len() > REQUIRED_FIELDS + 1 {
            tracing::warn!(
                fields = fields.len(),
                "Record has more columns than expected; extra columns ignored"
            );
        }

        let id = fields[0].parse::<i64>().map_err(|_| {
            ContactBookError::MalformedRecord(format!("id '{}' is not an integer", fields[0]))
        })?;

        let labels = if fields[10].is_empty() {
            Vec::new()
        } else {
            fields[10]
                .split(LABEL_SEPARATOR)
                .map(str::to_string)
                .collect()
        };

        Ok(Self {
            id,
            first_name: fields[1].to_string(),
            last_name: fields[2].to_string(),
            phone: fields[3].to_string(),
            email: fields[4].to_string(),
            address: fields[5].to_string(),
            city: fields[6].to_string(),
            country: fields[7].to_string(),
            birthday: fields[8].to_string(),
            is_favorite: fields[9] == "1",
            labels,
            notes: fields[11].to_string(),
            profile_image_path: fields.get(12).map(|s| s.to_string()).unwrap_or_default(),
            last_modified: now_timestamp(),
        })
    }
}

/// At least ten characters, all ASCII digits
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() >= 10 && phone.chars().all(|c| c.is_ascii_digit())
}

/// Weak format check: contains both `@` and `.`
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Contact {
        Contact::new(1, "Ann", "Lee")
            .with_phone("5551234567")
            .with_email("ann@example.com")
            .with_address("1 Main St", "Oslo", "Norway")
            .with_labels(vec!["work".to_string(), "gym".to_string()])
            .with_notes("met at conference")
            .with_birthday("1990-04-01")
            .with_favorite(true)
            .with_profile_image("img/ann.png")
    }

    #[test]
    fn test_to_line_field_order() {
        assert_eq!(
            sample().to_line(),
            "1,Ann,Lee,5551234567,ann@example.com,1 Main St,Oslo,Norway,1990-04-01,1,work|gym,met at conference,img/ann.png"
        );
    }

    #[test]
    fn test_from_line_drops_extra_columns() {
        let line = "5,Ann,Lee,,,,,,,1,work,notes,me.png,extra,more";
        let contact = Contact::from_line(line).expect("extra columns should load");
        assert_eq!(contact.id, 5);
        assert_eq!(contact.notes, "notes");
        assert_eq!(contact.profile_image_path, "me.png");
        assert!(contact.is_favorite);
        assert_eq!(
            contact.to_line(),
            "5,Ann,Lee,,,,,,,1,work,notes,me.png"
        );
    }

    #[test]
    fn test_to_line_empty_optional_fields() {
        let contact = Contact::new(2, "Bo", "Kim");
        assert_eq!(contact.to_line(), "2,Bo,Kim,,,,,,,0,,,");
    }

    #[test]
    fn test_roundtrip_preserves_fields() {
        let original = sample();
        let parsed = Contact::from_line(&original.to_line()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_roundtrip_empty_labels_and_trailing_fields() {
        let original = Contact::new(2, "Bo", "Kim");
        let parsed = Contact::from_line(&original.to_line()).unwrap();
        assert!(parsed.labels.is_empty());
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_from_line_without_profile_column() {
        let parsed =
            Contact::from_line("3,Cy,Ng,1234567890,cy@x.io,,,Peru,,0,friends,notes").unwrap();
        assert_eq!(parsed.id, 3);
        assert_eq!(parsed.country, "Peru");
        assert_eq!(parsed.notes, "notes");
        assert_eq!(parsed.profile_image_path, "");
    }

    #[test]
    fn test_from_line_strips_carriage_return() {
        let parsed = Contact::from_line("4,Di,Ro,,,,,,,0,,,pic.jpg\r").unwrap();
        assert_eq!(parsed.profile_image_path, "pic.jpg");
    }

    #[test]
    fn test_from_line_keeps_duplicate_labels() {
        let parsed = Contact::from_line("5,Ed,Yu,,,,,,,0,a|a|b,,").unwrap();
        assert_eq!(parsed.labels, vec!["a", "a", "b"]);
    }

    #[test]
    fn test_from_line_too_few_fields() {
        let err = Contact::from_line("1,Ann,Lee").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContactBookError>(),
            Some(ContactBookError::MalformedRecord(_))
        ));
    }

    #[test]
    fn test_from_line_non_integer_id() {
        let err = Contact::from_line("abc,Ann,Lee,,,,,,,0,,,").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContactBookError>(),
            Some(ContactBookError::MalformedRecord(_))
        ));
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_from_line_favorite_flag() {
        assert!(!Contact::from_line("1,A,B,,,,,,,0,,,").unwrap().is_favorite);
        assert!(Contact::from_line("1,A,B,,,,,,,1,,,").unwrap().is_favorite);
        assert!(!Contact::from_line("1,A,B,,,,,,,true,,,").unwrap().is_favorite);
    }

    #[test]
    fn test_equality_ignores_last_modified() {
        let a = sample();
        let mut b = sample();
        b.last_modified = "Mon Jan  1 00:00:00 2001".to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn test_matches_query_is_case_insensitive() {
        let contact = sample();
        assert!(contact.matches_query("ann"));
        assert!(contact.matches_query("ANN"));
        assert!(contact.matches_query("lee"));
        assert!(contact.matches_query("555123"));
        assert!(contact.matches_query("EXAMPLE.COM"));
    }

    #[test]
    fn test_matches_query_ignores_other_fields() {
        let contact = sample();
        assert!(!contact.matches_query("oslo"));
        assert!(!contact.matches_query("conference"));
        assert!(!contact.matches_query("work"));
    }

    #[test]
    fn test_label_operations() {
        let mut contact = Contact::new(1, "Ann", "Lee");
        contact.add_label("work");
        contact.add_label("family");
        contact.add_label("work");
        assert_eq!(contact.labels, vec!["work", "family", "work"]);
        assert!(contact.has_label("work"));
        assert!(!contact.has_label("Work"));

        contact.remove_label("work");
        assert_eq!(contact.labels, vec!["family"]);
        assert!(!contact.has_label("work"));

        contact.remove_label("missing");
        assert_eq!(contact.labels, vec!["family"]);
    }

    #[test]
    fn test_phone_validation() {
        assert!(!is_valid_phone("12345"));
        assert!(is_valid_phone("1234567890"));
        assert!(!is_valid_phone("123-456-7890"));
        assert!(!is_valid_phone(""));
        assert!(sample().is_valid_phone());
    }

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("a@b.c"));
        assert!(!is_valid_email("ab.c"));
        assert!(!is_valid_email("a@bc"));
        assert!(sample().is_valid_email());
    }

    #[test]
    fn test_birthday_month_day() {
        assert_eq!(sample().birthday_month_day(), Some("04-01"));
        assert_eq!(
            Contact::new(1, "A", "B").with_birthday("1990").birthday_month_day(),
            None
        );
    }

    #[test]
    fn test_has_unsafe_separators() {
        assert!(!sample().has_unsafe_separators());
        assert!(sample().with_notes("one, two").has_unsafe_separators());
        assert!(sample()
            .with_labels(vec!["a|b".to_string()])
            .has_unsafe_separators());
        // A pipe in free text does not shift columns.
        assert!(!sample().with_notes("a|b").has_unsafe_separators());
    }

    #[test]
    fn test_touch_updates_timestamp() {
        let mut contact = sample();
        contact.last_modified = String::new();
        contact.touch();
        assert!(!contact.last_modified.is_empty());
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample().full_name(), "Ann Lee");
        assert_eq!(Contact::new(1, "Ann", "").full_name(), "Ann");
    }
}
