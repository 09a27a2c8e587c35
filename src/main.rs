mod calendar;
mod clock;
mod config;
mod contacts;
mod gmail;
mod google;
mod message;
mod people_api;
mod person;
mod reminder;
mod upcoming;

use anyhow::Result;
use clock::{Clock, FixedClock, SystemClock};
use config::Config;
use gmail::{GmailClient, NotificationSink, StdoutSink};
use google::GoogleClient;
use log::info;
use people_api::PeopleClient;
use reminder::ReminderSettings;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    let clock: Box<dyn Clock> = match config.today {
        Some(today) => Box::new(FixedClock(today)),
        None => Box::new(SystemClock),
    };

    let google = GoogleClient::new(config.access_token.clone())?;
    let directory = PeopleClient::new(google.clone(), config.people_api_base_url.clone());
    let sink: Box<dyn NotificationSink> = if config.dry_run {
        info!("dry run: the reminder is printed, not sent");
        Box::new(StdoutSink)
    } else {
        Box::new(GmailClient::new(google, config.gmail_api_base_url.clone()))
    };

    let outcome = reminder::run(
        &directory,
        sink.as_ref(),
        clock.as_ref(),
        &ReminderSettings::from(&config),
    )
    .await?;

    match outcome.sent_to {
        Some(to) => info!("reminder delivered to {to}"),
        None => info!("nothing to send"),
    }

    Ok(())
}
