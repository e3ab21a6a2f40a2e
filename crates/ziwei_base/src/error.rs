//! Error types for chart model checks and correction tables.

use thiserror::Error;

/// Errors from the pure chart layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ZiweiError {
    /// A natal chart violates a structural invariant.
    #[error("invalid chart: {0}")]
    InvalidChart(String),
    /// A horoscope overlay does not line up with the twelve palaces.
    #[error("invalid horoscope overlay: {0}")]
    InvalidOverlay(String),
    /// The correction table text could not be parsed.
    #[error("correction table parse error: {0}")]
    CorrectionParse(String),
    /// The correction table parsed but contains an inconsistent record.
    #[error("invalid correction record `{id}`: {reason}")]
    InvalidCorrection { id: String, reason: String },
    /// I/O error while reading a table from disk.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ZiweiError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<toml::de::Error> for ZiweiError {
    fn from(e: toml::de::Error) -> Self {
        Self::CorrectionParse(e.to_string())
    }
}
