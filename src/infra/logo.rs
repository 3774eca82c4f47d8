//! Logo fetching for generated reports.
//!
//! A logo is decoration: every failure path yields `None` and the report
//! is rendered without one.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::config::MAX_LOGO_BYTES;

/// Source of logo image bytes
#[async_trait]
pub trait LogoSource: Send + Sync {
    /// Fetch the image at `url`, or `None` if it cannot be obtained.
    async fn fetch(&self, url: &str) -> Option<Vec<u8>>;
}

/// Fetches logos over HTTP with a bounded timeout
pub struct HttpLogoSource {
    client: reqwest::Client,
}

impl HttpLogoSource {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self { client }
    }
}

#[async_trait]
impl LogoSource for HttpLogoSource {
    async fn fetch(&self, url: &str) -> Option<Vec<u8>> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(url = %url, "Logo fetch failed: {}", e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            tracing::warn!(url = %url, status = %response.status(), "Logo fetch returned non-200");
            return None;
        }

        if response
            .content_length()
            .is_some_and(|len| len > MAX_LOGO_BYTES as u64)
        {
            tracing::warn!(url = %url, "Logo exceeds size limit, skipping");
            return None;
        }

        match response.bytes().await {
            Ok(bytes) if bytes.len() <= MAX_LOGO_BYTES => Some(bytes.to_vec()),
            Ok(_) => {
                tracing::warn!(url = %url, "Logo exceeds size limit, skipping");
                None
            }
            Err(e) => {
                tracing::warn!(url = %url, "Logo body read failed: {}", e);
                None
            }
        }
    }
}

/// Never yields a logo
pub struct NoLogo;

#[async_trait]
impl LogoSource for NoLogo {
    async fn fetch(&self, _url: &str) -> Option<Vec<u8>> {
        None
    }
}
