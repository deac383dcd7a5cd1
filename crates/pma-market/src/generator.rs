//! Synthetic market generators
//!
//! All randomness flows through the generator's [`Rng`], so a seeded RNG
//! yields a reproducible report.

use crate::error::{MarketError, MarketResult};
use crate::types::{
    MarketAnalysisRequest, MarketAnalysisResponse, MarketCondition, MarketData, MarketTrend,
    Timeframe, TrendDirection,
};
use chrono::{Months, NaiveDate};
use rand::rngs::ThreadRng;
use rand::Rng;
use tracing::debug;

/// Generator of synthetic market reports
#[derive(Debug)]
pub struct MarketGenerator<R: Rng> {
    rng: R,
}

impl MarketGenerator<ThreadRng> {
    /// Create generator over the thread-local RNG
    #[inline]
    #[must_use]
    pub fn from_thread_rng() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> MarketGenerator<R> {
    /// Create generator over `rng`
    #[inline]
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Monthly series ending at `today`, oldest first
    ///
    /// Holds `timeframe.months() + 1` points around a base price drawn from
    /// [500k, 1M).
    ///
    /// # Errors
    /// `MarketError::InvalidRequest` if `location` is blank.
    pub fn historical_series(
        &mut self,
        location: &str,
        property_type: &str,
        timeframe: Timeframe,
        today: NaiveDate,
    ) -> MarketResult<Vec<MarketData>> {
        MarketError::require_location(location)?;

        let base_price = 500_000.0 + self.rng.random::<f64>() * 500_000.0;
        let months = timeframe.months();

        let series = (0..=months)
            .rev()
            .map(|offset| {
                let variation = 1.0 + (self.rng.random::<f64>() * 0.4 - 0.2);
                let average_price = base_price * variation;
                let area = f64::from(self.rng.random_range(2000u32..3000));
                MarketData {
                    date: today
                        .checked_sub_months(Months::new(offset))
                        .unwrap_or(today),
                    average_price,
                    median_price: average_price * 0.95,
                    total_sales: self.rng.random_range(100..600),
                    price_per_square_foot: average_price / area,
                    days_on_market: self.rng.random_range(20..80),
                    location: location.to_string(),
                    property_type: property_type.to_string(),
                }
            })
            .collect();

        Ok(series)
    }

    /// Trend for the current month
    ///
    /// # Errors
    /// `MarketError::InvalidRequest` if `location` is blank.
    pub fn current_trend(&mut self, location: &str, property_type: &str) -> MarketResult<MarketTrend> {
        MarketError::require_location(location)?;
        Ok(self.trend(
            "Current Month".to_string(),
            format!("Current market trend for {location} {property_type} properties"),
        ))
    }

    /// Forecast over `period`
    ///
    /// # Errors
    /// `MarketError::InvalidRequest` if `location` is blank.
    pub fn forecast(
        &mut self,
        location: &str,
        property_type: &str,
        period: &str,
    ) -> MarketResult<MarketTrend> {
        MarketError::require_location(location)?;
        Ok(self.trend(
            period.to_string(),
            format!("Forecast for {location} {property_type} market over {period}"),
        ))
    }

    /// Full analysis for one request
    ///
    /// # Errors
    /// `MarketError::InvalidRequest` if the location is blank.
    pub fn analyze(
        &mut self,
        request: &MarketAnalysisRequest,
        today: NaiveDate,
    ) -> MarketResult<MarketAnalysisResponse> {
        let timeframe = Timeframe::parse_lenient(&request.timeframe);
        let market_data =
            self.historical_series(&request.location, &request.property_type, timeframe, today)?;
        let current_trend = self.current_trend(&request.location, &request.property_type)?;

        debug!(
            location = %request.location,
            timeframe = %timeframe,
            points = market_data.len(),
            "Generated market analysis"
        );

        Ok(MarketAnalysisResponse {
            location: request.location.clone(),
            property_type: request.property_type.clone(),
            timeframe: request.timeframe.clone(),
            average_growth_rate: average_growth_rate(&market_data),
            market_condition: market_condition(&current_trend),
            market_data,
            current_trend,
            analysis_date: today.format("%Y-%m-%d").to_string(),
        })
    }

    /// One analysis per location, in input order
    ///
    /// # Errors
    /// `MarketError::InvalidRequest` if no locations are given or any is blank.
    pub fn compare(
        &mut self,
        locations: &[String],
        property_type: &str,
        timeframe: &str,
        today: NaiveDate,
    ) -> MarketResult<Vec<MarketAnalysisResponse>> {
        if locations.is_empty() {
            return Err(MarketError::InvalidRequest(
                "at least one location is required".to_string(),
            ));
        }

        locations
            .iter()
            .map(|location| {
                let request = MarketAnalysisRequest::new(location.as_str())
                    .with_property_type(property_type)
                    .with_timeframe(timeframe);
                self.analyze(&request, today)
            })
            .collect()
    }

    fn trend(&mut self, period: String, description: String) -> MarketTrend {
        let percentage_change = self.rng.random::<f64>() * 20.0 - 10.0;
        MarketTrend {
            period,
            percentage_change,
            trend_direction: TrendDirection::from_change(percentage_change),
            description,
            volatility: self.rng.random::<f64>() * 15.0 + 5.0,
        }
    }
}

/// Percentage growth from the first to the last point
///
/// 0.0 for fewer than two points.
#[must_use]
pub fn average_growth_rate(series: &[MarketData]) -> f64 {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() >= 2 => {
            (last.average_price - first.average_price) / first.average_price * 100.0
        }
        _ => 0.0,
    }
}

/// Classify a trend into a market condition
#[must_use]
pub fn market_condition(trend: &MarketTrend) -> MarketCondition {
    if trend.percentage_change > 5.0 {
        MarketCondition::Seller
    } else if trend.percentage_change < -5.0 {
        MarketCondition::Buyer
    } else {
        MarketCondition::Balanced
    }
}
