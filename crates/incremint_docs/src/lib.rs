// Quote generation: workbook loading, document building and DOCX rendering.

pub mod builder;
pub mod document;
pub mod docx;
pub mod loader;
pub mod naming;
pub mod pipeline;
pub mod schema;
pub mod tables;
pub mod xlsx;

pub use builder::QuoteBuilder;
pub use document::{DocTable, HeaderBlock, QuoteDocument, Section};
pub use loader::{combine_workbooks, load_workbook, load_workbook_bytes};
pub use pipeline::{QuotePipeline, ensure_sufficient};
pub use schema::{ClientDetails, CoverInfo, FinalNotes, PremiumRow};
pub use tables::{Row, Table, WorkbookTables};
