//! Download a shared spreadsheet as an XLSX export.
//!
//! Works for any sheet shared as "anyone with the link"; no token needed.

use anyhow::{Context, Result};
use incremint_core::config::DEFAULT_EXPORT_BASE_URL;
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use tracing::{debug, info};

static SPREADSHEET_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/d/([A-Za-z0-9_-]+)/").expect("valid spreadsheet id pattern"));

/// Pull the spreadsheet id out of a share URL such as
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`.
pub fn extract_spreadsheet_id(sheet_url: &str) -> Result<&str> {
    SPREADSHEET_ID
        .captures(sheet_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .with_context(|| format!("Invalid Google Sheet URL: {sheet_url}"))
}

/// XLSX export URL for a spreadsheet id.
pub fn export_url(base_url: &str, spreadsheet_id: &str) -> String {
    format!(
        "{}/d/{}/export?format=xlsx",
        base_url.trim_end_matches('/'),
        spreadsheet_id
    )
}

/// Fetches XLSX exports of shared spreadsheets.
pub struct ExportClient {
    base_url: String,
    client: Client,
}

impl Default for ExportClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_EXPORT_BASE_URL)
    }

    /// Create a client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Download the workbook behind a share URL. Returns the spreadsheet id
    /// and the raw XLSX bytes.
    pub async fn download(&self, sheet_url: &str) -> Result<(String, Vec<u8>)> {
        let id = extract_spreadsheet_id(sheet_url)?.to_string();
        let url = export_url(&self.base_url, &id);
        debug!(url = %url, "downloading spreadsheet export");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Spreadsheet export request failed")?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("Spreadsheet export failed ({status}) for {id}");
        }

        let bytes = resp
            .bytes()
            .await
            .context("Failed to read spreadsheet export body")?;
        info!(spreadsheet_id = %id, bytes = bytes.len(), "downloaded spreadsheet export");
        Ok((id, bytes.to_vec()))
    }
}
