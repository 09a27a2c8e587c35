//! config.rs
//!
//! Settings come from the environment (optionally seeded from a `.env`
//! file by the caller). Only the access token is mandatory.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::str::FromStr;

pub const DEFAULT_DAYS_AHEAD: u32 = 10;
pub const DEFAULT_SUBJECT: &str = "Automated Birthday Reminder";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const PEOPLE_API_BASE_URL: &str = "https://people.googleapis.com";
pub const GMAIL_API_BASE_URL: &str = "https://gmail.googleapis.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub access_token: String,
    pub days_ahead: u32,
    pub recipient: Option<String>,
    pub subject: String,
    pub today: Option<NaiveDate>,
    pub dry_run: bool,
    pub log_level: String,
    pub people_api_base_url: String,
    pub gmail_api_base_url: String,
}

impl Config {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which maps a variable name
    /// to its value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let access_token = var("GOOGLE_ACCESS_TOKEN")
            .context("GOOGLE_ACCESS_TOKEN environment variable not set")?;

        let days_ahead = match var("REMINDER_DAYS_AHEAD") {
            Some(v) => parse_var("REMINDER_DAYS_AHEAD", &v)?,
            None => DEFAULT_DAYS_AHEAD,
        };

        let today = var("REMINDER_TODAY")
            .map(|v| {
                NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                    .with_context(|| format!("REMINDER_TODAY must be YYYY-MM-DD, got {v:?}"))
            })
            .transpose()?;

        let dry_run = match var("REMINDER_DRY_RUN") {
            Some(v) => parse_flag("REMINDER_DRY_RUN", &v)?,
            None => false,
        };

        Ok(Self {
            access_token,
            days_ahead,
            recipient: var("REMINDER_RECIPIENT"),
            subject: var("REMINDER_SUBJECT").unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
            today,
            dry_run,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            people_api_base_url: var("PEOPLE_API_BASE_URL")
                .unwrap_or_else(|| PEOPLE_API_BASE_URL.to_string()),
            gmail_api_base_url: var("GMAIL_API_BASE_URL")
                .unwrap_or_else(|| GMAIL_API_BASE_URL.to_string()),
        })
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid value for {key}: {value:?}"))
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid value for {key}: {other:?} (expected true/false)"),
    }
}
