//! Market analysis facade
//!
//! Single entry point the HTTP layer talks to. Market figures are generated
//! per call; housing data goes through the repository and its cache.

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use chrono::{Local, NaiveDate};
use pma_housing::{
    FileDataset, HousingError, HousingRecord, HousingRepository, HousingStatistics, StatsCache,
};
use pma_market::{
    MarketAnalysisRequest, MarketAnalysisResponse, MarketData, MarketGenerator, MarketTrend,
    Timeframe,
};
use std::sync::Arc;
use tracing::warn;

/// Facade over the market generators and the housing repository
#[derive(Debug, Clone)]
pub struct MarketAnalysisService {
    repository: Arc<HousingRepository>,
}

impl MarketAnalysisService {
    /// Create service over `repository`
    #[must_use]
    pub fn new(repository: Arc<HousingRepository>) -> Self {
        Self { repository }
    }

    /// Create service over the configured dataset file and cache capacity
    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        let repository = HousingRepository::new(FileDataset::new(&config.dataset_path))
            .with_cache(StatsCache::new(config.cache_capacity));
        Self::new(Arc::new(repository))
    }

    /// Get repository reference
    #[inline]
    #[must_use]
    pub fn repository(&self) -> &HousingRepository {
        &self.repository
    }

    /// Full analysis for one location
    ///
    /// # Errors
    /// `ServerError::InvalidRequest` if the location is blank.
    pub fn market_analysis(
        &self,
        request: &MarketAnalysisRequest,
    ) -> ServerResult<MarketAnalysisResponse> {
        Ok(MarketGenerator::from_thread_rng().analyze(request, today())?)
    }

    /// Historical series for one location
    ///
    /// # Errors
    /// `ServerError::InvalidRequest` if the location is blank.
    pub fn historical_data(
        &self,
        location: &str,
        property_type: &str,
        timeframe: &str,
    ) -> ServerResult<Vec<MarketData>> {
        Ok(MarketGenerator::from_thread_rng().historical_series(
            location,
            property_type,
            Timeframe::parse_lenient(timeframe),
            today(),
        )?)
    }

    /// Current month trend
    ///
    /// # Errors
    /// `ServerError::InvalidRequest` if the location is blank.
    pub fn current_trend(&self, location: &str, property_type: &str) -> ServerResult<MarketTrend> {
        Ok(MarketGenerator::from_thread_rng().current_trend(location, property_type)?)
    }

    /// One analysis per comma-separated location, in order
    ///
    /// # Errors
    /// `ServerError::InvalidRequest` if no location is given.
    pub fn compare_markets(
        &self,
        locations: &str,
        property_type: &str,
        timeframe: &str,
    ) -> ServerResult<Vec<MarketAnalysisResponse>> {
        let locations = split_locations(locations);
        Ok(MarketGenerator::from_thread_rng().compare(
            &locations,
            property_type,
            timeframe,
            today(),
        )?)
    }

    /// Forecast over `period`
    ///
    /// # Errors
    /// `ServerError::InvalidRequest` if the location is blank.
    pub fn market_forecast(
        &self,
        location: &str,
        property_type: &str,
        period: &str,
    ) -> ServerResult<MarketTrend> {
        Ok(MarketGenerator::from_thread_rng().forecast(location, property_type, period)?)
    }

    /// Every housing record, in file order
    ///
    /// # Errors
    /// `ServerError::DataUnavailable` or `ServerError::BadData`.
    pub async fn housing_data(&self) -> ServerResult<Vec<HousingRecord>> {
        self.repository
            .records()
            .await
            .map_err(|err| self.housing_failure("records", err))
    }

    /// Cached housing statistics
    ///
    /// # Errors
    /// `ServerError::DataUnavailable` or `ServerError::BadData`.
    pub async fn housing_stats(&self) -> ServerResult<Arc<HousingStatistics>> {
        self.repository
            .cached_statistics()
            .await
            .map_err(|err| self.housing_failure("statistics", err))
    }

    fn housing_failure(&self, operation: &'static str, err: HousingError) -> ServerError {
        warn!(
            operation,
            location = self.repository.location(),
            error = %err,
            "housing request failed"
        );
        ServerError::from(err)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn split_locations(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|location| !location.is_empty())
        .map(str::to_string)
        .collect()
}
