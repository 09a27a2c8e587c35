//! contacts.rs
//!
//! Directory records as the People API returns them, and their projection
//! into [`Person`] values.
//!
//! A contact may carry several birthday records (the profile's own, one
//! from a linked account, ...). Each record may miss any of its parts, and
//! the API uses `0` for "unset" as well as omitting the field.

use crate::calendar::{self, CalendarDate};
use crate::person::{NO_NAME, Person};
use chrono::NaiveDate;
use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Contact {
    #[serde(default)]
    pub names: Vec<Name>,
    pub birthdays: Option<Vec<Birthday>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Name {
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Birthday {
    pub date: Option<RawDate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RawDate {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

fn present<T: Default + PartialEq>(value: Option<T>) -> Option<T> {
    value.filter(|v| *v != T::default())
}

impl RawDate {
    /// Month and day, if both are set.
    fn month_day(&self) -> Option<(u32, u32)> {
        Some((present(self.month)?, present(self.day)?))
    }

    fn year(&self) -> Option<i32> {
        present(self.year)
    }
}

impl Birthday {
    fn usable_date(&self) -> Option<&RawDate> {
        self.date.as_ref().filter(|d| d.month_day().is_some())
    }
}

impl Contact {
    /// First name's display name, or the no-name sentinel.
    pub fn display_name(&self) -> &str {
        self.names
            .first()
            .and_then(|n| n.display_name.as_deref())
            .unwrap_or(NO_NAME)
    }

    /// True if at least one birthday record has both month and day.
    pub fn has_usable_birthday(&self) -> bool {
        self.birthdays
            .as_deref()
            .is_some_and(|bdays| bdays.iter().any(|b| b.usable_date().is_some()))
    }
}

/// Picks the canonical birthday among a contact's candidate records.
///
/// Records without month or day are skipped. The first record carrying a
/// year wins; otherwise the first usable record wins, without a year.
pub fn choose_best_birthday(birthdays: Option<&[Birthday]>) -> Option<CalendarDate> {
    let valid: Vec<&RawDate> = birthdays?.iter().filter_map(Birthday::usable_date).collect();

    let with_year = valid.iter().find_map(|d| {
        let (month, day) = d.month_day()?;
        Some(CalendarDate::ymd(d.year()?, month, day))
    });
    if with_year.is_some() {
        return with_year;
    }

    let (month, day) = valid.first()?.month_day()?;
    Some(CalendarDate::md(month, day))
}

/// Maps a directory contact into a [`Person`] as seen on `today`.
pub fn project_contact(contact: &Contact, today: NaiveDate) -> Person {
    let birthday = choose_best_birthday(contact.birthdays.as_deref());
    let age = birthday
        .as_ref()
        .and_then(|b| calendar::age_at_next_birthday(b, today));

    Person::new(contact.display_name(), birthday, age)
}

/// Keeps only the contacts with at least one usable birthday record.
pub fn contacts_with_birthdays(contacts: Vec<Contact>) -> Vec<Contact> {
    let total = contacts.len();
    let kept: Vec<Contact> = contacts
        .into_iter()
        .filter(Contact::has_usable_birthday)
        .collect();

    info!("found {} people with birthdays out of {total} contacts", kept.len());
    kept
}
