//! Request-level error taxonomy.

use serde::Serialize;
use thiserror::Error;
use ziwei_base::ZiweiError;

/// Failure reported by a calendar-conversion backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CalendarError {
    /// The requested date does not exist in the target calendar.
    #[error("no such date: {0}")]
    NoSuchDate(String),
    /// The date is outside the range the backend can convert.
    #[error("date out of supported range: {0}")]
    OutOfRange(String),
}

/// Failure reported by the star-placement backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PlacementError(pub String);

/// Errors from a chart request.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChartError {
    /// Malformed date, time, gender, calendar, or overlay input.
    #[error("validation error: {0}")]
    Validation(String),
    /// The calendar backend could not convert the birth date.
    #[error("calendar conversion error: {0}")]
    CalendarConversion(#[from] CalendarError),
    /// The placement backend failed.
    #[error("upstream computation error: {0}")]
    UpstreamComputation(#[from] PlacementError),
    /// Engine configuration or correction table could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),
    /// The placement backend returned a chart that breaks chart invariants.
    #[error("upstream chart rejected: {0}")]
    Chart(#[source] ZiweiError),
}

impl ChartError {
    /// Stable machine-readable tag for transports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::CalendarConversion(_) => "calendar_conversion",
            Self::UpstreamComputation(_) | Self::Chart(_) => "upstream_computation",
            Self::Config(_) => "config",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            kind: self.kind(),
        }
    }
}

impl From<ZiweiError> for ChartError {
    fn from(e: ZiweiError) -> Self {
        match e {
            ZiweiError::InvalidChart(_) => Self::Chart(e),
            ZiweiError::InvalidOverlay(_) => Self::Validation(e.to_string()),
            _ => Self::Config(e.to_string()),
        }
    }
}

/// Serializable error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
}
