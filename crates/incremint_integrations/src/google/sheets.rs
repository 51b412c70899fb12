//! Google Sheets API v4 client.
//!
//! Wraps the REST API at `https://sheets.googleapis.com/v4/spreadsheets`
//! using `reqwest` for HTTP and bearer-token authentication.

use anyhow::{Context, Result};
use incremint_core::config::DEFAULT_SHEETS_BASE_URL;
use incremint_docs::tables::{Table, WorkbookTables, CLIENT_DETAILS, FINAL_NOTES, PREMIUMS};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Values returned from a Sheets range read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetValues {
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// Client for the Google Sheets v4 REST API.
pub struct GoogleSheetsClient {
    base_url: String,
    client: Client,
}

impl GoogleSheetsClient {
    /// Create a new client using the given OAuth access token.
    pub fn new(access_token: &str) -> Self {
        Self::with_base_url(access_token, DEFAULT_SHEETS_BASE_URL)
    }

    /// Create a new client pointing at a custom base URL (useful for testing).
    pub fn with_base_url(access_token: &str, base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        if let Ok(val) = HeaderValue::from_str(&format!("Bearer {access_token}")) {
            headers.insert(AUTHORIZATION, val);
        }

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { base_url, client }
    }

    /// Return the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read values from a spreadsheet range (a bare sheet name reads the
    /// whole sheet).
    pub async fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<SheetValues> {
        let url = format!(
            "{}/{}/values/{}",
            self.base_url,
            spreadsheet_id,
            urlencod(range)
        );
        debug!(url = %url, "reading Sheets values");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .context("Sheets get_values request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Sheets API error ({}): {}", status, body);
        }

        resp.json().await.context("failed to parse Sheets values")
    }

    /// Read the quote sheets of a spreadsheet.
    ///
    /// "Client Details" and "Premiums" must be readable; "Final Notes" is
    /// optional and skipped with a warning when it cannot be read.
    pub async fn fetch_quote_tables(&self, spreadsheet_id: &str) -> Result<WorkbookTables> {
        let mut tables = WorkbookTables::new();

        for sheet in [CLIENT_DETAILS, PREMIUMS] {
            let values = self
                .get_values(spreadsheet_id, sheet)
                .await
                .with_context(|| format!("Error reading sheet '{sheet}' from {spreadsheet_id}"))?;
            tables.insert(sheet, Table::from_grid(values.values));
        }

        match self.get_values(spreadsheet_id, FINAL_NOTES).await {
            Ok(values) => tables.insert(FINAL_NOTES, Table::from_grid(values.values)),
            Err(e) => warn!(spreadsheet_id, "skipping '{FINAL_NOTES}': {e:#}"),
        }

        Ok(tables)
    }
}

/// Minimal percent-encoding for path segments.
fn urlencod(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push(char::from(b"0123456789ABCDEF"[(b >> 4) as usize]));
                out.push(char::from(b"0123456789ABCDEF"[(b & 0x0F) as usize]));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_sheet_values_deserialization() {
        let json = r#"{
            "range": "Premiums!A1:B2",
            "values": [["Plan Name", "Regular Premium"], ["TermSecure", "12000"]]
        }"#;
        let vals: SheetValues = serde_json::from_str(json).unwrap();
        assert_eq!(vals.range, "Premiums!A1:B2");
        assert_eq!(vals.values.len(), 2);
        assert_eq!(vals.values[0], vec!["Plan Name", "Regular Premium"]);
    }

    #[test]
    fn test_sheet_values_empty() {
        let json = r#"{ "range": "Premiums!A1:A1" }"#;
        let vals: SheetValues = serde_json::from_str(json).unwrap();
        assert!(vals.values.is_empty());
        assert!(Table::from_grid(vals.values).is_empty());
    }

    #[test]
    fn test_client_custom_base_url() {
        let client = GoogleSheetsClient::with_base_url("tok", "https://sheets.test/v4/");
        assert_eq!(client.base_url(), "https://sheets.test/v4");
        assert_eq!(GoogleSheetsClient::new("tok").base_url(), DEFAULT_SHEETS_BASE_URL);
    }

    #[test]
    fn test_urlencod_sheet_names() {
        assert_eq!(urlencod("Client Details"), "Client%20Details");
        assert_eq!(urlencod("Premiums!A1:F20"), "Premiums%21A1%3AF20");
    }

    #[tokio::test]
    async fn test_get_values_sends_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/sheet123/values/Premiums")
                    .header_exists("authorization");
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({
                        "range": "Premiums!A1:B2",
                        "values": [["Plan Name"], ["TermSecure"]]
                    }));
            })
            .await;

        let client = GoogleSheetsClient::with_base_url("tok", &server.base_url());
        let vals = client.get_values("sheet123", "Premiums").await.unwrap();

        mock.assert_async().await;
        assert_eq!(vals.values[1], vec!["TermSecure"]);
    }

    #[tokio::test]
    async fn test_get_values_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(403).body("caller does not have permission");
            })
            .await;

        let client = GoogleSheetsClient::with_base_url("tok", &server.base_url());
        let err = client.get_values("sheet123", "Premiums").await.unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Sheets API error"), "{msg}");
        assert!(msg.contains("permission"), "{msg}");
    }

    #[tokio::test]
    async fn test_fetch_quote_tables_builds_tables() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(serde_json::json!({
                        "range": "A1:C3",
                        "values": [
                            ["Insurance Company", "Plan Name", "10 Pay"],
                            ["AlphaLife", "TermSecure", "28000"],
                            ["BetaLife"]
                        ]
                    }));
            })
            .await;

        let client = GoogleSheetsClient::with_base_url("tok", &server.base_url());
        let tables = client.fetch_quote_tables("sheet123").await.unwrap();

        assert!(tables.has_rows(CLIENT_DETAILS));
        let premiums = tables.premiums().unwrap();
        assert_eq!(premiums.len(), 2);
        assert_eq!(premiums[0].ten_pay_premium.as_deref(), Some("28000"));
        assert_eq!(premiums[1].plan_name.as_deref(), Some(""));
    }

    #[tokio::test]
    async fn test_fetch_quote_tables_requires_primary_sheets() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET);
                then.status(400).body("Unable to parse range");
            })
            .await;

        let client = GoogleSheetsClient::with_base_url("tok", &server.base_url());
        let err = client.fetch_quote_tables("sheet123").await.unwrap_err();
        assert!(err.to_string().contains("Error reading sheet 'Client Details'"));
    }
}
