//! Error types for housing data access
//!
//! Covers the three ways a statistics request can fail:
//! - the dataset is absent
//! - the dataset exists but cannot be read
//! - a row holds a field that is not the expected numeric type
//!
//! Errors are `Clone` so a single failed computation can be handed to every
//! caller that was waiting on it.

use std::io;

/// Errors raised while reading or parsing the housing dataset
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HousingError {
    /// Dataset resource is absent at read time
    #[error("housing dataset not found: {location}")]
    DataSourceNotFound {
        /// Where the dataset was expected
        location: String,
    },

    /// Dataset exists but reading it failed
    #[error("housing dataset unreadable at {location}: {message}")]
    DataSourceUnreadable {
        /// Where the dataset was read from
        location: String,
        /// Underlying I/O error kind
        kind: io::ErrorKind,
        /// Rendered I/O error
        message: String,
    },

    /// A field could not be parsed as its column's numeric type
    #[error("malformed housing data at line {line}, column {column}: '{value}' ({reason})")]
    DataFormat {
        /// 1-based line number in the dataset (0 when the whole file is bad)
        line: usize,
        /// Column name
        column: &'static str,
        /// Raw field value after trimming
        value: String,
        /// Parser message
        reason: String,
    },
}

impl HousingError {
    /// Classify an I/O error raised while reading `location`
    #[must_use]
    pub fn from_io(location: impl Into<String>, err: &io::Error) -> Self {
        let location = location.into();
        if err.kind() == io::ErrorKind::NotFound {
            Self::DataSourceNotFound { location }
        } else {
            Self::DataSourceUnreadable {
                location,
                kind: err.kind(),
                message: err.to_string(),
            }
        }
    }

    /// Create a format error for a field
    pub fn data_format(
        line: usize,
        column: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::DataFormat {
            line,
            column,
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Dataset could not be located
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DataSourceNotFound { .. })
    }

    /// Dataset content is malformed
    #[inline]
    #[must_use]
    pub fn is_format(&self) -> bool {
        matches!(self, Self::DataFormat { .. })
    }
}

/// Result type alias for housing operations
pub type HousingResult<T> = Result<T, HousingError>;
