//! gmail.rs
//!
//! Delivery of the reminder, either through the Gmail API or to stdout for
//! dry runs.

use crate::google::GoogleClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use log::info;
use serde::Deserialize;

/// Where reminders go.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Address used when none is configured: the account owner's own.
    async fn default_recipient(&self) -> Result<String>;

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

#[derive(Clone)]
pub struct GmailClient {
    google: GoogleClient,
    base_url: String,
}

impl GmailClient {
    pub fn new(google: GoogleClient, base_url: impl Into<String>) -> Self {
        Self {
            google,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl NotificationSink for GmailClient {
    async fn default_recipient(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct Profile {
            #[serde(rename = "emailAddress")]
            email_address: String,
        }

        let url = format!("{}/gmail/v1/users/me/profile", self.base_url);
        let json = self.google.send_json(self.google.get(&url)).await?;
        let profile: Profile =
            serde_json::from_value(json).context("Failed to deserialize Gmail profile")?;

        Ok(profile.email_address)
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let url = format!("{}/gmail/v1/users/me/messages/send", self.base_url);
        let raw = URL_SAFE.encode(build_message(to, subject, body));

        self.google
            .send_json(self.google.post(&url).json(&serde_json::json!({ "raw": raw })))
            .await
            .with_context(|| format!("Failed to send reminder to {to}"))?;

        info!("sent reminder to {to}");
        Ok(())
    }
}

/// Prints the reminder instead of sending it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

#[async_trait]
impl NotificationSink for StdoutSink {
    async fn default_recipient(&self) -> Result<String> {
        Ok("me".to_string())
    }

    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        println!("To: {to}\nSubject: {subject}\n\n{body}");
        Ok(())
    }
}

/// Plain-text RFC 5322 message.
fn build_message(to: &str, subject: &str, body: &str) -> String {
    format!(
        "To: {to}\r\n\
         Subject: {}\r\n\
         MIME-Version: 1.0\r\n\
         Content-Type: text/plain; charset=UTF-8\r\n\
         \r\n\
         {body}",
        encode_header(subject)
    )
}

/// RFC 2047 encoded-word for non-ASCII header values.
fn encode_header(value: &str) -> String {
    if value.is_ascii() {
        value.to_string()
    } else {
        format!("=?UTF-8?B?{}?=", STANDARD.encode(value))
    }
}
