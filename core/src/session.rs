//! `Session` for a caller-owned `reqwest::Client`.
//!
//! Non-success statuses are turned into `reqwest::Error` through
//! `error_for_status`, so they reach the caller as `Error::Transport` like
//! any other transport failure. Timeouts, TLS and pooling stay whatever the
//! caller configured on the `reqwest::Client`.

use async_trait::async_trait;
use url::Url;

use crate::http::{HttpResponse, Session};

#[async_trait]
impl Session for reqwest::Client {
    type Error = reqwest::Error;

    async fn get(&self, url: &Url) -> Result<HttpResponse, reqwest::Error> {
        let response = reqwest::Client::get(self, url.as_str())
            .send()
            .await?
            .error_for_status()?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
