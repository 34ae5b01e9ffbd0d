//! Error types for the grid.
//!
//! Query decoding and layout never fail; errors come from column
//! configuration, configuration files and the export side channel.

use thiserror::Error;

/// Errors raised by the grid.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GridError {
    /// Two columns share a field.
    #[error("duplicate column field: {0}")]
    DuplicateField(String),

    /// The export request could not be sent or its body not read.
    #[error("export request failed: {0}")]
    ExportNetwork(String),

    /// The export endpoint answered with a non-success status.
    #[error("export failed with HTTP status {status}")]
    ExportStatus {
        /// Response status code.
        status: u16,
    },

    /// The export base URL is not an absolute URL.
    #[error("invalid export URL: {0}")]
    InvalidExportUrl(String),

    /// An export is already running.
    #[error("an export is already in progress")]
    ExportInFlight,

    /// A custom export handler failed.
    #[error("export handler failed: {0}")]
    ExportHandler(String),

    /// I/O error while saving an export.
    #[error("I/O error: {0}")]
    Io(String),

    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GridError {
    /// Short message suitable for a transient notification.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::ExportNetwork(_) => "Export failed: could not reach the server.",
            Self::ExportStatus { .. } => "Export failed: the server rejected the request.",
            Self::InvalidExportUrl(_) => "Export is not configured correctly.",
            Self::ExportInFlight => "An export is already running.",
            Self::ExportHandler(_) => "Export failed.",
            Self::Io(_) => "Export failed: the file could not be saved.",
            Self::DuplicateField(_) | Self::Config(_) => "An unexpected error occurred.",
        }
    }
}

impl From<reqwest::Error> for GridError {
    fn from(err: reqwest::Error) -> Self {
        Self::ExportNetwork(err.to_string())
    }
}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<url::ParseError> for GridError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidExportUrl(err.to_string())
    }
}

/// Result type alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
