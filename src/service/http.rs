use anyhow::Context;
use encoding_rs::Encoding;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

use crate::error::{AppError, Result};

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const ACCEPT_ANY: &str = "application/json, text/plain, */*";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub enum ClientType {
    /// Job sites: identifies as a desktop browser, some sites reject others.
    Browser,
    /// Job store API.
    Standard,
}

/// The header set sent with every source request.
pub fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_ANY));
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ko-KR,ko;q=0.9,en-US;q=0.8,en;q=0.7"),
    );
    headers
}

/// Factory for creating an HTTP client for either side of the pipeline.
pub fn create_client(client_type: ClientType, timeout: Duration) -> anyhow::Result<Client> {
    let builder = Client::builder().timeout(timeout);

    match client_type {
        ClientType::Browser => builder
            .default_headers(browser_headers())
            .build()
            .context("Failed to build browser HTTP client"),
        ClientType::Standard => builder
            .build()
            .context("Failed to build standard HTTP client"),
    }
}

/// GET `url` and decode the body with `encoding`.
///
/// Non-success statuses are reported as network errors so a blocked page is
/// handled like an unreachable one.
pub async fn fetch_text(client: &Client, url: &Url, encoding: &'static Encoding) -> Result<String> {
    tracing::trace!("[HTTP] GET {}", url);
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::network(format!("{} returned {}", url, status)));
    }

    let bytes = response.bytes().await?;
    tracing::trace!("[HTTP] Received {} bytes from {}", bytes.len(), url);

    let (text, _, had_errors) = encoding.decode(&bytes);
    if had_errors {
        tracing::debug!("[HTTP] Replaced malformed {} sequences in {}", encoding.name(), url);
    }
    Ok(text.into_owned())
}

/// GET `url` and deserialize its JSON body.
pub async fn fetch_json<T: DeserializeOwned>(client: &Client, url: &Url) -> Result<T> {
    let body = fetch_text(client, url, encoding_rs::UTF_8).await?;
    serde_json::from_str(&body).map_err(|e| AppError::parse(format!("{}: {}", url, e)))
}
