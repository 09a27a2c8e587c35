//! people_api.rs
//!
//! Contact directory backed by the Google People API.
//!
//! Connections are listed 500 at a time; the page token returned with each
//! page is fed into the next request until the API stops returning one.

use crate::contacts::Contact;
use crate::google::GoogleClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;

pub const PAGE_SIZE: u32 = 500;
pub const PERSON_FIELDS: &[&str] = &["names", "birthdays"];

/// One page of the connections listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConnectionsPage {
    #[serde(default)]
    pub connections: Vec<Contact>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
}

/// A paginated source of contacts.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_page(&self, page_token: Option<&str>) -> Result<ConnectionsPage>;
}

/// Walks every page of `source` and returns all contacts in order.
pub async fn fetch_all_contacts<S>(source: &S) -> Result<Vec<Contact>>
where
    S: PageSource + ?Sized,
{
    let mut all = Vec::new();
    let mut page_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = source.fetch_page(page_token.as_deref()).await?;
        pages += 1;
        debug!("page {pages}: {} contacts", page.connections.len());
        all.extend(page.connections);

        match page.next_page_token.filter(|t| !t.is_empty()) {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    info!("found {} contacts in {pages} page(s)", all.len());
    Ok(all)
}

#[derive(Clone)]
pub struct PeopleClient {
    google: GoogleClient,
    base_url: String,
}

impl PeopleClient {
    pub fn new(google: GoogleClient, base_url: impl Into<String>) -> Self {
        Self {
            google,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PageSource for PeopleClient {
    async fn fetch_page(&self, page_token: Option<&str>) -> Result<ConnectionsPage> {
        let url = format!("{}/v1/people/me/connections", self.base_url);

        let mut query = vec![
            ("pageSize", PAGE_SIZE.to_string()),
            ("personFields", PERSON_FIELDS.join(",")),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let json = self
            .google
            .send_json(self.google.get(&url).query(&query))
            .await?;

        serde_json::from_value(json).context("Failed to deserialize connections page")
    }
}
