mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::{Result, anyhow};
use tracing::debug;

/// Issues a GET for `url` through the given client and returns the raw
/// response body. Non-2xx statuses are reported as errors rather than
/// handed to the parser as bytes.
pub async fn fetch_bytes<C: HttpClient>(client: &C, url: &str) -> Result<Vec<u8>> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("request to {url} failed with status {status}"));
    }

    let bytes = resp.bytes().await?.to_vec();
    debug!(bytes = bytes.len(), "response body received");
    Ok(bytes)
}
