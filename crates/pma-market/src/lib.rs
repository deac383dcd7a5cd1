//! PMA Market
//!
//! Synthetic market data for the analysis API. Nothing here is derived from
//! real sales: every figure is a bounded random draw, shaped like a market
//! report.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pma_market::{MarketGenerator, Timeframe};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut generator = MarketGenerator::new(StdRng::seed_from_u64(7));
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//!
//! let series = generator
//!     .historical_series("Boston", "APARTMENT", Timeframe::SixMonths, today)
//!     .unwrap();
//! assert_eq!(series.len(), 7);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod generator;
pub mod types;

pub use error::{MarketError, MarketResult};
pub use generator::{average_growth_rate, market_condition, MarketGenerator};
pub use types::{
    MarketAnalysisRequest, MarketAnalysisResponse, MarketCondition, MarketData, MarketTrend,
    Timeframe, TrendDirection, DEFAULT_PROPERTY_TYPE,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
