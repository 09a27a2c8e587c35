//! reminder.rs
//!
//! One reminder run: list the directory, project contacts as of today,
//! bucket the coming days and mail whatever is found.
//!
//! Every run recomputes everything from the fetched contacts, so a failed
//! send can simply be retried by running again.

use crate::clock::Clock;
use crate::config::Config;
use crate::contacts;
use crate::gmail::NotificationSink;
use crate::message;
use crate::people_api::{self, PageSource};
use crate::person::Person;
use crate::upcoming::{self, UpcomingDay};
use anyhow::Result;
use log::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSettings {
    pub days_ahead: u32,
    pub recipient: Option<String>,
    pub subject: String,
}

impl From<&Config> for ReminderSettings {
    fn from(config: &Config) -> Self {
        Self {
            days_ahead: config.days_ahead,
            recipient: config.recipient.clone(),
            subject: config.subject.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub upcoming: Vec<UpcomingDay>,
    /// Recipient of the reminder, if one was sent.
    pub sent_to: Option<String>,
}

pub async fn run<D, N, C>(
    directory: &D,
    sink: &N,
    clock: &C,
    settings: &ReminderSettings,
) -> Result<RunOutcome>
where
    D: PageSource + ?Sized,
    N: NotificationSink + ?Sized,
    C: Clock + ?Sized,
{
    let today = clock.today();
    info!("checking birthdays for {} day(s) from {today}", settings.days_ahead);

    let all = people_api::fetch_all_contacts(directory).await?;
    let people: Vec<Person> = contacts::contacts_with_birthdays(all)
        .iter()
        .map(|c| contacts::project_contact(c, today))
        .collect();

    let upcoming = upcoming::people_with_upcoming_birthdays(&people, settings.days_ahead, today);
    let found = upcoming::count_birthdays(&upcoming);
    info!("found {found} upcoming birthday(s)");
    for day in upcoming.iter().filter(|d| !d.people.is_empty()) {
        let names: Vec<String> = day.people.iter().map(ToString::to_string).collect();
        debug!("{}: {}", day.date, names.join(", "));
    }

    let Some(body) = message::render_reminder(&upcoming) else {
        info!("No upcoming birthdays found.");
        return Ok(RunOutcome {
            upcoming,
            sent_to: None,
        });
    };

    let to = match &settings.recipient {
        Some(to) => to.clone(),
        None => sink.default_recipient().await?,
    };
    debug!("sending reminder to {to}:\n{body}");
    sink.send(&to, &settings.subject, &body).await?;

    Ok(RunOutcome {
        upcoming,
        sent_to: Some(to),
    })
}
