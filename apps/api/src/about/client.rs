//! Client for the About content REST contract:
//! `GET {base}/about` → text, `POST {base}/about` with `{"content": ...}`.
//!
//! Failures never propagate. They are logged and surface as `None` / `false`;
//! callers decide what an absent value means. No retries.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
enum AboutApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {0}")]
    Status(u16),
}

#[derive(Serialize)]
struct SaveAboutRequest<'a> {
    content: &'a str,
}

// Consumers of the About contract live outside this service; the server
// itself only drives the client from tests.
#[cfg_attr(not(test), allow(dead_code))]
#[derive(Clone)]
pub struct AboutApiClient {
    client: Client,
    base_url: String,
}

#[cfg_attr(not(test), allow(dead_code))]
impl AboutApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn about_url(&self) -> String {
        format!("{}/about", self.base_url)
    }

    pub async fn get_about_content(&self) -> Option<String> {
        match self.fetch().await {
            Ok(content) => Some(content),
            Err(e) => {
                error!("Error fetching about content: {e}");
                None
            }
        }
    }

    pub async fn save_about_content(&self, content: &str) -> bool {
        match self.store(content).await {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving about content: {e}");
                false
            }
        }
    }

    async fn fetch(&self) -> Result<String, AboutApiError> {
        let response = self.client.get(self.about_url()).send().await?;
        if !response.status().is_success() {
            return Err(AboutApiError::Status(response.status().as_u16()));
        }
        let body = response.text().await?;
        debug!("Fetched about content ({} bytes)", body.len());
        Ok(body)
    }

    async fn store(&self, content: &str) -> Result<(), AboutApiError> {
        let response = self
            .client
            .post(self.about_url())
            .json(&SaveAboutRequest { content })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(AboutApiError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}
