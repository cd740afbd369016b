use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, Response, StatusCode};

use crate::config::{self, HarvestConfig};
use crate::error::HarvestError;

/// Build the shared client. Every request carries the browser-like header set.
pub fn build_client(config: &HarvestConfig) -> Result<Client, HarvestError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(config::ACCEPT));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static(config::ACCEPT_LANGUAGE),
    );

    let client = Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.page_timeout)
        .user_agent(config::USER_AGENT)
        .default_headers(headers)
        .build()?;
    Ok(client)
}

/// GET `url`, failing on anything but 200 OK.
async fn get_ok(client: &Client, url: &str, timeout: Duration) -> Result<Response> {
    let resp = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .with_context(|| format!("request failed: {url}"))?;

    let status = resp.status();
    if status != StatusCode::OK {
        anyhow::bail!("{url} returned {status}");
    }
    Ok(resp)
}

pub async fn get_json(client: &Client, url: &str, timeout: Duration) -> Result<serde_json::Value> {
    get_ok(client, url, timeout)
        .await?
        .json()
        .await
        .with_context(|| format!("invalid JSON body from {url}"))
}

pub async fn get_text(client: &Client, url: &str, timeout: Duration) -> Result<String> {
    get_ok(client, url, timeout)
        .await?
        .text()
        .await
        .with_context(|| format!("failed to read body from {url}"))
}

pub async fn get_bytes(client: &Client, url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let bytes = get_ok(client, url, timeout)
        .await?
        .bytes()
        .await
        .with_context(|| format!("failed to read body from {url}"))?;
    Ok(bytes.to_vec())
}
