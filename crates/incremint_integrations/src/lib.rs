pub mod google;

pub use google::{ExportClient, GoogleSheetsClient, SheetValues};
