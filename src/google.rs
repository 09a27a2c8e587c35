use anyhow::{Context, Result};
use log::warn;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

const USER_AGENT: &str = "birthday-reminder";
const MAX_RETRIES: usize = 4;

/// Authenticated HTTP access to Google REST APIs.
#[derive(Clone)]
pub struct GoogleClient {
    token: Arc<String>,
    http: Arc<Client>,
}

impl GoogleClient {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            token: Arc::new(token.into()),
            http: Arc::new(http),
        })
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.http.get(url).bearer_auth(&*self.token)
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.http.post(url).bearer_auth(&*self.token)
    }

    /// Sends `request` and decodes the JSON response, with basic retry/backoff.
    ///
    /// 429 honours `Retry-After`; 5xx backs off exponentially. Any other
    /// non-2xx status is an error carrying the response body.
    pub async fn send_json(&self, request: RequestBuilder) -> Result<Value> {
        let mut attempt = 0usize;

        loop {
            attempt += 1;

            let req = request
                .try_clone()
                .context("Request body cannot be replayed")?;

            let resp = req
                .send()
                .await
                .map_err(|e| anyhow::anyhow!("Network error sending Google API request: {e}"))?;

            let status = resp.status();
            let headers = resp.headers().clone();
            let body = resp
                .text()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read Google API response: {e}"))?;

            if status.is_success() {
                if body.trim().is_empty() {
                    return Ok(Value::Null);
                }
                return serde_json::from_str(&body)
                    .map_err(|e| anyhow::anyhow!("Failed to parse JSON from Google: {e}"));
            }

            if status.as_u16() == 429 {
                if attempt >= MAX_RETRIES {
                    return Err(anyhow::anyhow!(
                        "Google API returned 429 (rate-limited) and retries exhausted"
                    ));
                }
                let wait_secs = headers
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(2);
                warn!("rate-limited by Google API, retrying in {wait_secs}s (attempt {attempt})");
                sleep(Duration::from_secs(wait_secs)).await;
                continue;
            }

            if status.is_server_error() && attempt < MAX_RETRIES {
                let backoff = Duration::from_millis(250u64.saturating_mul(1 << (attempt - 1)));
                warn!(
                    "Google API returned HTTP {}, retrying in {}ms (attempt {attempt})",
                    status.as_u16(),
                    backoff.as_millis()
                );
                sleep(backoff).await;
                continue;
            }

            return Err(anyhow::anyhow!(
                "Google API returned HTTP {}: {body}",
                status.as_u16()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_bearer_token_and_decodes_json() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleClient::new("secret").unwrap();
        let url = format!("{}/ping", server.uri());
        let value = client.send_json(client.get(&url)).await.unwrap();

        assert_eq!(value, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn retries_server_errors() {
        let server = MockServer::start().await;
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        Mock::given(method("GET"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                if attempts_clone.fetch_add(1, Ordering::SeqCst) < 2 {
                    ResponseTemplate::new(503)
                } else {
                    ResponseTemplate::new(200).set_body_json(json!({}))
                }
            })
            .expect(3)
            .mount(&server)
            .await;

        let client = GoogleClient::new("t").unwrap();
        client.send_json(client.get(&server.uri())).await.unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn honours_retry_after_on_rate_limit() {
        let server = MockServer::start().await;
        let attempts = Arc::new(AtomicUsize::new(0));
        let attempts_clone = attempts.clone();
        Mock::given(method("GET"))
            .respond_with(move |_req: &wiremock::Request| -> ResponseTemplate {
                if attempts_clone.fetch_add(1, Ordering::SeqCst) == 0 {
                    ResponseTemplate::new(429).insert_header("Retry-After", "0")
                } else {
                    ResponseTemplate::new(200).set_body_json(json!({ "n": 1 }))
                }
            })
            .mount(&server)
            .await;

        let client = GoogleClient::new("t").unwrap();
        let value = client.send_json(client.get(&server.uri())).await.unwrap();

        assert_eq!(value, json!({ "n": 1 }));
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
            .expect(1)
            .mount(&server)
            .await;

        let client = GoogleClient::new("t").unwrap();
        let err = client
            .send_json(client.get(&server.uri()))
            .await
            .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("401"), "{msg}");
        assert!(msg.contains("bad token"), "{msg}");
    }
}
