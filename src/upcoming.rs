//! upcoming.rs
//!
//! Buckets people by birthday over a window of consecutive days.
//!
//! The window always yields one bucket per day, empty or not, in
//! chronological order. Keys are the bucket's own `YYYY-MM-DD`, so a window
//! crossing New Year carries both years.

use crate::calendar;
use crate::person::Person;
use chrono::{Days, NaiveDate};

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// One day of the window and whose birthday falls on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingDay {
    pub key: String,
    pub date: NaiveDate,
    pub people: Vec<Person>,
}

/// Indexes `people` over `days_ahead` days starting at `today`.
///
/// People within a day are sorted by display name.
pub fn people_with_upcoming_birthdays(
    people: &[Person],
    days_ahead: u32,
    today: NaiveDate,
) -> Vec<UpcomingDay> {
    (0..days_ahead)
        .map_while(|offset| today.checked_add_days(Days::new(offset.into())))
        .map(|date| {
            let mut matching: Vec<Person> = people
                .iter()
                .filter(|p| calendar::is_birthday_today(p.birthday.as_ref(), date))
                .cloned()
                .collect();
            matching.sort_by(|a, b| a.display_name.cmp(&b.display_name));

            UpcomingDay {
                key: date.format(DATE_KEY_FORMAT).to_string(),
                date,
                people: matching,
            }
        })
        .collect()
}

/// Total number of people across all days.
pub fn count_birthdays(days: &[UpcomingDay]) -> usize {
    days.iter().map(|d| d.people.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarDate;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_KEY_FORMAT).unwrap()
    }

    fn keyed(days: &[UpcomingDay]) -> Vec<(&str, Vec<&str>)> {
        days.iter()
            .map(|d| {
                let names = d.people.iter().map(|p| p.display_name.as_str()).collect();
                (d.key.as_str(), names)
            })
            .collect()
    }

    #[test]
    fn buckets_people_over_the_window() {
        let people = [
            Person::new("Alice", Some(CalendarDate::ymd(2000, 1, 15)), Some(24)),
            Person::new("Bob", Some(CalendarDate::ymd(1995, 1, 16)), Some(29)),
            Person::new("Charlie", Some(CalendarDate::ymd(1988, 2, 1)), Some(36)),
        ];

        let upcoming = people_with_upcoming_birthdays(&people, 2, day("2024-01-15"));

        assert_eq!(
            upcoming,
            vec![
                UpcomingDay {
                    key: "2024-01-15".into(),
                    date: day("2024-01-15"),
                    people: vec![people[0].clone()],
                },
                UpcomingDay {
                    key: "2024-01-16".into(),
                    date: day("2024-01-16"),
                    people: vec![people[1].clone()],
                },
            ]
        );
    }

    #[test]
    fn leap_day_birthday_lands_on_feb_28_in_common_years() {
        let baby = Person::new("Leap Year Baby", Some(CalendarDate::ymd(2024, 2, 29)), Some(1));
        let upcoming =
            people_with_upcoming_birthdays(std::slice::from_ref(&baby), 2, day("2025-02-28"));

        assert_eq!(
            keyed(&upcoming),
            vec![("2025-02-28", vec!["Leap Year Baby"]), ("2025-03-01", vec![])]
        );
    }

    #[test]
    fn window_wraps_around_year_end() {
        let baby = Person::new("New Year Baby", Some(CalendarDate::ymd(2020, 1, 1)), Some(5));
        let upcoming =
            people_with_upcoming_birthdays(std::slice::from_ref(&baby), 2, day("2024-12-31"));

        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].key, "2024-12-31");
        assert!(upcoming[0].people.is_empty());
        assert_eq!(upcoming[1].key, "2025-01-01");
        assert_eq!(upcoming[1].people, vec![baby]);
    }

    #[test]
    fn days_without_birthdays_are_kept() {
        let alice = Person::new("Alice", Some(CalendarDate::ymd(2000, 1, 15)), Some(24));
        let upcoming = people_with_upcoming_birthdays(&[alice], 1, day("2024-02-01"));
        assert_eq!(keyed(&upcoming), vec![("2024-02-01", vec![])]);
    }

    #[test]
    fn no_people_gives_empty_buckets() {
        let upcoming = people_with_upcoming_birthdays(&[], 3, day("2024-02-27"));
        assert_eq!(
            keyed(&upcoming),
            vec![
                ("2024-02-27", vec![]),
                ("2024-02-28", vec![]),
                ("2024-02-29", vec![]),
            ]
        );
    }

    #[test]
    fn zero_days_gives_nothing() {
        let alice = Person::new("Alice", Some(CalendarDate::md(1, 15)), None);
        assert!(people_with_upcoming_birthdays(&[alice], 0, day("2024-01-15")).is_empty());
    }

    #[test]
    fn people_sorted_by_name_within_a_day() {
        let on = |name: &str| Person::new(name, Some(CalendarDate::md(6, 1)), None);
        let people = [on("Zoe"), on("Adam"), Person::new("Nobody", None, None), on("Mia")];

        let upcoming = people_with_upcoming_birthdays(&people, 1, day("2030-06-01"));

        assert_eq!(keyed(&upcoming), vec![("2030-06-01", vec!["Adam", "Mia", "Zoe"])]);
        assert_eq!(count_birthdays(&upcoming), 3);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let people = [
            Person::new("B", Some(CalendarDate::md(3, 2)), None),
            Person::new("A", Some(CalendarDate::ymd(1970, 3, 3)), Some(54)),
        ];
        let first = people_with_upcoming_birthdays(&people, 5, day("2024-03-01"));
        let second = people_with_upcoming_birthdays(&people, 5, day("2024-03-01"));
        assert_eq!(first, second);
        assert_eq!(count_birthdays(&first), 2);
    }
}
