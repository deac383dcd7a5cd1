//! Error types for the API layer

use pma_housing::HousingError;
use pma_market::MarketError;
use serde::Serialize;
use warp::http::StatusCode;

/// API errors, each mapped onto one HTTP status and error code
#[derive(Debug, Clone, thiserror::Error)]
pub enum ServerError {
    /// Dataset missing or unreadable
    #[error(transparent)]
    DataUnavailable(HousingError),

    /// Dataset present but malformed
    #[error(transparent)]
    BadData(HousingError),

    /// Request rejected by validation
    #[error("{0}")]
    InvalidRequest(String),

    /// Route does not exist
    #[error("no matching route")]
    NotFound,

    /// Route exists but not for this method
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Startup configuration is invalid
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ServerError {
    /// Create invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadData(_) | Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Machine-readable error code
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DataUnavailable(_) => "data_source_unavailable",
            Self::BadData(_) => "bad_data",
            Self::InvalidRequest(_) => "invalid_request",
            Self::NotFound => "not_found",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Config(_) => "config_error",
        }
    }

    /// JSON body for this error
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.code(),
            message: self.to_string(),
        }
    }
}

impl From<HousingError> for ServerError {
    fn from(err: HousingError) -> Self {
        match err {
            HousingError::DataFormat { .. } => Self::BadData(err),
            HousingError::DataSourceNotFound { .. } | HousingError::DataSourceUnreadable { .. } => {
                Self::DataUnavailable(err)
            }
        }
    }
}

impl From<MarketError> for ServerError {
    fn from(err: MarketError) -> Self {
        match err {
            MarketError::InvalidRequest(message) => Self::InvalidRequest(message),
        }
    }
}

impl warp::reject::Reject for ServerError {}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Error code
    pub error: &'static str,
    /// Human-readable message
    pub message: String,
}

/// Result type alias for API operations
pub type ServerResult<T> = Result<T, ServerError>;
