//! Error types for market generation

/// Market request errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarketError {
    /// Request is missing or has an invalid field
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl MarketError {
    /// Reject a blank location
    pub(crate) fn require_location(location: &str) -> MarketResult<()> {
        if location.trim().is_empty() {
            return Err(Self::InvalidRequest("location must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Result type alias for market operations
pub type MarketResult<T> = Result<T, MarketError>;
