use crate::upcoming::{UpcomingDay, count_birthdays};

/// Labels for the first offsets of the window; later days get none.
const DAY_LABELS: [&str; 2] = ["Today ", "Tomorrow "];

/// Renders the reminder body, or `None` when nobody has a birthday coming up.
///
/// Each day with birthdays becomes a Markdown section:
///
/// ```text
/// ## Birthdays Today (2024-01-15)
///
/// Alice (24), Bob
/// ```
pub fn render_reminder(days: &[UpcomingDay]) -> Option<String> {
    if count_birthdays(days) == 0 {
        return None;
    }

    let mut message = String::new();
    for (offset, day) in days.iter().enumerate() {
        if day.people.is_empty() {
            continue;
        }
        let label = DAY_LABELS.get(offset).copied().unwrap_or_default();
        let names: Vec<String> = day.people.iter().map(ToString::to_string).collect();

        message.push_str(&format!("## Birthdays {label}({})\n\n", day.key));
        message.push_str(&names.join(", "));
        message.push_str("\n\n");
    }

    Some(message)
}
