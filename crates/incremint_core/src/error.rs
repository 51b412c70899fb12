//! Quote pipeline error types.

/// Boxed cause carried by [`QuoteError::MalformedInput`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while loading a workbook or producing a quote.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    /// The supplied workbook could not be parsed at all.
    #[error("Malformed workbook input: {source}")]
    MalformedInput {
        #[source]
        source: BoxError,
    },

    /// Neither of the primary tables carries any rows.
    #[error("Both 'Client Details' and 'Premiums' are empty or missing.")]
    InsufficientData,

    /// The quote document could not be serialized.
    #[error("Failed to render quote document: {0}")]
    Render(String),

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuoteError {
    pub fn malformed(source: impl Into<BoxError>) -> Self {
        Self::MalformedInput {
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
