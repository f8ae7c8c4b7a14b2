use anyhow::{Context, Result};
use tracing::info;

/// Fetch a page and return its body as text.
///
/// The HTTP status is logged but not treated as an error: an error page body
/// carries no pattern headings and parses to empty outputs downstream.
pub async fn page_text(url: &str) -> Result<String> {
    let client = reqwest::Client::new();

    info!("Fetching bug descriptions: {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {}", url))?;

    info!("HTTP {} ({} bytes)", status, body.len());
    Ok(body)
}
