use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use incremint_core::{QuoteConfig, QuoteError, Result};
use tracing::{info, warn};

use crate::builder::QuoteBuilder;
use crate::docx::render_docx;
use crate::loader::{load_workbook, load_workbook_bytes};
use crate::naming::output_path;
use crate::tables::{WorkbookTables, CLIENT_DETAILS, PREMIUMS};

/// Refuse to quote when neither primary sheet has any rows.
pub fn ensure_sufficient(tables: &WorkbookTables) -> Result<()> {
    if tables.has_rows(CLIENT_DETAILS) || tables.has_rows(PREMIUMS) {
        Ok(())
    } else {
        Err(QuoteError::InsufficientData)
    }
}

/// Workbook in, DOCX file out. Nothing is written unless every step
/// succeeds.
pub struct QuotePipeline {
    config: QuoteConfig,
}

impl QuotePipeline {
    pub fn new(config: QuoteConfig) -> Self {
        Self { config }
    }

    /// Where the document for `source_name` will be written.
    pub fn output_path_for(&self, source_name: &Path) -> PathBuf {
        output_path(
            &self.config.resolved_output_dir(),
            source_name,
            &self.config.output_suffix,
        )
    }

    pub fn generate_from_path(&self, input: &Path) -> Result<PathBuf> {
        let tables = load_workbook(input)?;
        self.generate_from_tables(&tables, input)
    }

    pub fn generate_from_bytes(&self, bytes: Vec<u8>, source_name: &Path) -> Result<PathBuf> {
        let tables = load_workbook_bytes(bytes)?;
        self.generate_from_tables(&tables, source_name)
    }

    pub fn generate_from_tables(
        &self,
        tables: &WorkbookTables,
        source_name: &Path,
    ) -> Result<PathBuf> {
        self.generate_at(tables, source_name, Local::now().naive_local())
    }

    /// As [`Self::generate_from_tables`] with a fixed header timestamp.
    pub fn generate_at(
        &self,
        tables: &WorkbookTables,
        source_name: &Path,
        generated_at: NaiveDateTime,
    ) -> Result<PathBuf> {
        if let Err(e) = ensure_sufficient(tables) {
            warn!(source = %source_name.display(), "refusing to build quote: {e}");
            return Err(e);
        }

        let document = QuoteBuilder::new(&self.config.template).build(tables, generated_at);
        let bytes = render_docx(&document)?;

        let out = self.output_path_for(source_name);
        if let Some(dir) = out.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&out, bytes)?;

        info!(
            source = %source_name.display(),
            output = %out.display(),
            sections = document.sections.len(),
            "quote written"
        );
        Ok(out)
    }
}
