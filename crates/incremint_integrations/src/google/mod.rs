pub mod export;
pub mod sheets;

pub use export::{ExportClient, export_url, extract_spreadsheet_id};
pub use sheets::{GoogleSheetsClient, SheetValues};
