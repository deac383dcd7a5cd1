//! Housing repository - main entry point
//!
//! Provides the three core operations:
//! - dataset → records (`records`)
//! - records → statistics (`compute_statistics`, re-exported at crate root)
//! - dataset → statistics through the content-addressed cache
//!   (`cached_statistics`)

use crate::cache::StatsCache;
use crate::digest::CacheKey;
use crate::error::{HousingError, HousingResult};
use crate::parser::{self, CsvRecordParser, RecordParser};
use crate::record::HousingRecord;
use crate::source::DatasetSource;
use crate::stats::{compute_statistics, HousingStatistics};
use std::sync::Arc;

/// Access point for housing records and their cached statistics
///
/// Cheap to share behind an `Arc`; all interior state is synchronized.
#[derive(Clone)]
pub struct HousingRepository {
    /// Where the dataset bytes come from
    source: Arc<dyn DatasetSource>,
    /// Text → records
    parser: Arc<dyn RecordParser>,
    /// Content-addressed statistics cache
    cache: StatsCache,
}

impl HousingRepository {
    /// Create repository with the CSV parser and a default-capacity cache
    #[must_use]
    pub fn new(source: impl DatasetSource + 'static) -> Self {
        Self::with_parts(
            Arc::new(source),
            Arc::new(CsvRecordParser::new()),
            StatsCache::default(),
        )
    }

    /// Create repository from explicit parts
    #[must_use]
    pub fn with_parts(
        source: Arc<dyn DatasetSource>,
        parser: Arc<dyn RecordParser>,
        cache: StatsCache,
    ) -> Self {
        Self {
            source,
            parser,
            cache,
        }
    }

    /// Replace the statistics cache
    #[must_use]
    pub fn with_cache(mut self, cache: StatsCache) -> Self {
        self.cache = cache;
        self
    }

    /// Read and parse every housing record
    ///
    /// # Errors
    /// - `HousingError::DataSourceNotFound` if the dataset is absent
    /// - `HousingError::DataSourceUnreadable` if it cannot be read
    /// - `HousingError::DataFormat` on the first malformed field
    pub async fn records(&self) -> HousingResult<Vec<HousingRecord>> {
        let bytes = self.source.read().await?;
        self.parse_bytes(&bytes)
    }

    /// Statistics for the dataset's current content
    ///
    /// Served from cache when the content digest is unchanged; computed from
    /// the same bytes that were hashed otherwise.
    ///
    /// # Errors
    /// Same as [`HousingRepository::records`]. Failures are never cached.
    pub async fn cached_statistics(&self) -> HousingResult<Arc<HousingStatistics>> {
        let read = self.source.read().await;
        let key = CacheKey::derive(&read);

        if let (CacheKey::KeyError, Err(err)) = (&key, &read) {
            tracing::warn!(
                location = self.source.location(),
                error = %err,
                "could not compute housing dataset digest, using fallback cache slot"
            );
        }

        let stats = self
            .cache
            .get_or_try_compute(key, || async move {
                match read {
                    Ok(bytes) => self.statistics_from_bytes(&bytes),
                    Err(err) if err.is_not_found() => Err(err),
                    Err(_) => {
                        let bytes = self.source.read().await?;
                        self.statistics_from_bytes(&bytes)
                    }
                }
            })
            .await?;

        tracing::debug!(%key, count = stats.count, "housing statistics served");
        Ok(stats)
    }

    /// Get cache reference
    #[inline]
    #[must_use]
    pub fn cache(&self) -> &StatsCache {
        &self.cache
    }

    /// Get dataset location
    #[inline]
    #[must_use]
    pub fn location(&self) -> &str {
        self.source.location()
    }

    fn parse_bytes(&self, bytes: &[u8]) -> HousingResult<Vec<HousingRecord>> {
        let content = parser::decode(bytes)?;
        self.parser.parse(content)
    }

    fn statistics_from_bytes(&self, bytes: &[u8]) -> Result<HousingStatistics, HousingError> {
        let records = self.parse_bytes(bytes)?;
        Ok(compute_statistics(&records))
    }
}

impl std::fmt::Debug for HousingRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HousingRepository")
            .field("source", &self.source)
            .field("cache", &self.cache.stats())
            .finish_non_exhaustive()
    }
}
