use crate::calendar::CalendarDate;
use std::fmt;

/// Display name used when a contact has no name at all.
pub const NO_NAME: &str = "No Name";

/// A contact reduced to what the reminder needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub display_name: String,
    pub birthday: Option<CalendarDate>,
    pub age_at_next_birthday: Option<i32>,
}

impl Person {
    pub fn new(
        display_name: impl Into<String>,
        birthday: Option<CalendarDate>,
        age_at_next_birthday: Option<i32>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            birthday,
            age_at_next_birthday,
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.age_at_next_birthday {
            Some(age) => write!(f, "{} ({age})", self.display_name),
            None => f.write_str(&self.display_name),
        }
    }
}
