//! Market DTOs
//!
//! Field names serialize in camelCase and enums in upper case, matching the
//! JSON the dashboard consumes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Property type used when a request does not name one
pub const DEFAULT_PROPERTY_TYPE: &str = "ALL";

/// One point of a historical market series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    /// Month the point describes
    pub date: NaiveDate,
    /// Mean sale price
    pub average_price: f64,
    /// Median sale price
    pub median_price: f64,
    /// Number of sales
    pub total_sales: u32,
    /// Mean price per square foot
    pub price_per_square_foot: f64,
    /// Mean days on market
    pub days_on_market: u32,
    /// Market location
    pub location: String,
    /// Property type
    pub property_type: String,
}

/// Direction of a price trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    /// Change above +2%
    Up,
    /// Change below -2%
    Down,
    /// Change within ±2%
    Stable,
}

impl TrendDirection {
    /// Classify a percentage change
    #[must_use]
    pub fn from_change(percentage_change: f64) -> Self {
        if percentage_change > 2.0 {
            Self::Up
        } else if percentage_change < -2.0 {
            Self::Down
        } else {
            Self::Stable
        }
    }
}

/// A trend or forecast summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketTrend {
    /// Period the trend covers
    pub period: String,
    /// Price change in percent
    pub percentage_change: f64,
    /// Direction derived from `percentage_change`
    pub trend_direction: TrendDirection,
    /// Free-text summary
    pub description: String,
    /// Volatility in percent
    pub volatility: f64,
}

/// Who the market favors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketCondition {
    /// Prices falling faster than 5%
    Buyer,
    /// Prices rising faster than 5%
    Seller,
    /// Anything in between
    Balanced,
}

/// Lookback window of a historical series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Timeframe {
    /// 1 month
    OneMonth,
    /// 3 months
    ThreeMonths,
    /// 6 months
    SixMonths,
    /// 12 months
    #[default]
    OneYear,
    /// 24 months
    TwoYears,
    /// 60 months
    FiveYears,
}

impl Timeframe {
    /// Parse a timeframe code (`1M`, `3M`, `6M`, `1Y`, `2Y`, `5Y`)
    ///
    /// Case-insensitive; unknown codes fall back to one year.
    #[must_use]
    pub fn parse_lenient(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "1M" => Self::OneMonth,
            "3M" => Self::ThreeMonths,
            "6M" => Self::SixMonths,
            "2Y" => Self::TwoYears,
            "5Y" => Self::FiveYears,
            _ => Self::OneYear,
        }
    }

    /// Window length in months
    #[must_use]
    pub const fn months(self) -> u32 {
        match self {
            Self::OneMonth => 1,
            Self::ThreeMonths => 3,
            Self::SixMonths => 6,
            Self::OneYear => 12,
            Self::TwoYears => 24,
            Self::FiveYears => 60,
        }
    }

    /// Canonical code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMonth => "1M",
            Self::ThreeMonths => "3M",
            Self::SixMonths => "6M",
            Self::OneYear => "1Y",
            Self::TwoYears => "2Y",
            Self::FiveYears => "5Y",
        }
    }
}

impl Display for Timeframe {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request for a full market analysis
///
/// The price and room filters are accepted but do not influence the
/// generated figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysisRequest {
    /// Market location
    pub location: String,
    /// Property type (`HOUSE`, `APARTMENT`, `CONDO`, `ALL`)
    #[serde(default = "default_property_type")]
    pub property_type: String,
    /// Timeframe code
    #[serde(default = "default_timeframe")]
    pub timeframe: String,
    /// Lower price bound
    #[serde(default)]
    pub min_price: Option<f64>,
    /// Upper price bound
    #[serde(default)]
    pub max_price: Option<f64>,
    /// Bedroom filter
    #[serde(default)]
    pub bedrooms: Option<u32>,
    /// Bathroom filter
    #[serde(default)]
    pub bathrooms: Option<u32>,
}

impl MarketAnalysisRequest {
    /// Create request with default property type and timeframe
    #[must_use]
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            property_type: default_property_type(),
            timeframe: default_timeframe(),
            min_price: None,
            max_price: None,
            bedrooms: None,
            bathrooms: None,
        }
    }

    /// With property type
    #[must_use]
    pub fn with_property_type(mut self, property_type: impl Into<String>) -> Self {
        self.property_type = property_type.into();
        self
    }

    /// With timeframe code
    #[must_use]
    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = timeframe.into();
        self
    }
}

fn default_property_type() -> String {
    DEFAULT_PROPERTY_TYPE.to_string()
}

fn default_timeframe() -> String {
    Timeframe::OneYear.as_str().to_string()
}

/// Full market analysis for one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysisResponse {
    /// Market location
    pub location: String,
    /// Property type as requested
    pub property_type: String,
    /// Timeframe code as requested
    pub timeframe: String,
    /// Historical series, oldest first
    pub market_data: Vec<MarketData>,
    /// Current month trend
    pub current_trend: MarketTrend,
    /// Growth across the series in percent
    pub average_growth_rate: f64,
    /// Who the market favors
    pub market_condition: MarketCondition,
    /// ISO date of the analysis
    pub analysis_date: String,
}
