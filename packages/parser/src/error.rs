//! Error types for the parser.
//!
//! Uses the dual-error pattern: `ParserError` for library consumers
//! with detailed error context, and a `Result` alias for internal use.

use thiserror::Error;

/// Main error type for the parser library.
#[derive(Debug, Error)]
pub enum ParserError {
    /// A required element is absent from a fetched page.
    #[error("Tag not found: {query}")]
    TagNotFound { query: String },

    /// A search over candidate elements produced nothing usable.
    #[error("Nothing found: {0}")]
    NothingFound(String),

    /// A located element lacks a required attribute.
    #[error("Element <{tag}> has no '{attribute}' attribute")]
    MissingAttribute { tag: String, attribute: String },

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport-level failure while fetching a page.
    #[error("Failed to fetch {url}: {}", error_chain(.source))]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// PEP status code outside the expected-status table.
    #[error("Unknown PEP status code: '{0}'")]
    UnknownStatusCode(String),

    /// Result row whose width differs from the header.
    #[error("Row has {actual} fields, header has {expected}")]
    RowWidth { expected: usize, actual: usize },

    /// URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// `err` and every underlying cause, joined with `": "`.
///
/// Transport errors carry the actual cause (refused connection, DNS or TLS
/// failure) a few levels down their source chain.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    std::iter::successors(Some(err), |e| e.source())
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
}
