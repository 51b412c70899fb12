use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use incremint_core::QuoteConfig;
use incremint_docs::naming::combined_source_name;
use incremint_docs::xlsx::write_workbook;
use incremint_docs::{QuotePipeline, combine_workbooks};
use incremint_integrations::{ExportClient, GoogleSheetsClient};

/// Source name used for quotes built from two separate uploads.
const COMBINED_INPUT_NAME: &str = "combined_input.xlsx";

pub fn generate(config: &QuoteConfig, workbook: &Path) -> Result<PathBuf> {
    let pipeline = QuotePipeline::new(config.clone());
    pipeline
        .generate_from_path(workbook)
        .with_context(|| format!("Failed to build quote from {}", workbook.display()))
}

pub fn combine(
    config: &QuoteConfig,
    client: &Path,
    premiums: &Path,
    save_combined: Option<&Path>,
) -> Result<PathBuf> {
    let tables = combine_workbooks(client, premiums).context("Error combining files")?;

    if let Some(path) = save_combined {
        let bytes = write_workbook(&tables)?;
        std::fs::write(path, bytes)
            .with_context(|| format!("Failed to write combined workbook: {}", path.display()))?;
        info!("Combined workbook saved to {}", path.display());
    }

    let pipeline = QuotePipeline::new(config.clone());
    Ok(pipeline.generate_from_tables(&tables, Path::new(COMBINED_INPUT_NAME))?)
}

pub fn sheet(config: &QuoteConfig, spreadsheet_id: &str, token: Option<String>) -> Result<PathBuf> {
    let token = token
        .or_else(|| config.google_access_token.clone())
        .context("No Google access token found. Pass --token or set GOOGLE_ACCESS_TOKEN.")?;

    let client = GoogleSheetsClient::with_base_url(&token, &config.sheets_base_url);
    let tables = runtime()?.block_on(client.fetch_quote_tables(spreadsheet_id))?;

    let pipeline = QuotePipeline::new(config.clone());
    let source = combined_source_name(spreadsheet_id);
    Ok(pipeline.generate_from_tables(&tables, Path::new(&source))?)
}

pub fn url(config: &QuoteConfig, sheet_url: &str) -> Result<PathBuf> {
    let client = ExportClient::with_base_url(&config.export_base_url);
    let (id, bytes) = runtime()?.block_on(client.download(sheet_url))?;

    let pipeline = QuotePipeline::new(config.clone());
    let source = format!("{id}.xlsx");
    Ok(pipeline.generate_from_bytes(bytes, Path::new(&source))?)
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}
