pub mod config;
pub mod error;
pub mod logging;

pub use config::{QuoteConfig, QuoteTemplate};
pub use error::{QuoteError, Result};
