//! Dataset sources
//!
//! A [`DatasetSource`] hands out the dataset's current raw bytes. The file
//! implementation reads through `tokio::fs` so request handlers never block
//! a runtime worker on disk I/O.

use crate::error::{HousingError, HousingResult};
use async_trait::async_trait;
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Default logical path of the housing dataset
pub const DEFAULT_DATASET_PATH: &str = "data/housing.csv";

/// Provider of the raw housing dataset
#[async_trait]
pub trait DatasetSource: Debug + Send + Sync {
    /// Human-readable location, used in errors and logs
    fn location(&self) -> &str;

    /// Read the dataset's current bytes in full
    ///
    /// # Errors
    /// - `HousingError::DataSourceNotFound` if the dataset is absent
    /// - `HousingError::DataSourceUnreadable` for any other read failure
    async fn read(&self) -> HousingResult<Vec<u8>>;
}

/// Dataset stored as a file on disk
#[derive(Debug, Clone)]
pub struct FileDataset {
    path: PathBuf,
    location: String,
}

impl FileDataset {
    /// Create source for the file at `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let location = path.display().to_string();
        Self { path, location }
    }

    /// Get file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileDataset {
    fn default() -> Self {
        Self::new(DEFAULT_DATASET_PATH)
    }
}

#[async_trait]
impl DatasetSource for FileDataset {
    fn location(&self) -> &str {
        &self.location
    }

    async fn read(&self) -> HousingResult<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| HousingError::from_io(&self.location, &e))
    }
}
