//! PMA Housing
//!
//! The deterministic core of the market analysis service: turns the housing
//! CSV dataset into typed records, aggregates them into descriptive
//! statistics, and memoizes those statistics by the dataset's content digest.
//!
//! # Architecture
//!
//! ```text
//! DatasetSource → bytes ─┬→ DatasetDigest → CacheKey ─┐
//!                        └→ RecordParser → [HousingRecord] → compute_statistics
//!                                                           ↓
//!                                   StatsCache (single-flight per CacheKey)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use pma_housing::{FileDataset, HousingRepository};
//!
//! # async fn example() -> Result<(), pma_housing::HousingError> {
//! let repository = HousingRepository::new(FileDataset::new("data/housing.csv"));
//!
//! let stats = repository.cached_statistics().await?;
//! println!("{} homes, average price {:.0}", stats.count, stats.average_price);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod digest;
pub mod error;
pub mod parser;
pub mod record;
pub mod repository;
pub mod source;
pub mod stats;

// Re-exports for convenience
pub use cache::{CacheStats, StatsCache, DEFAULT_CACHE_CAPACITY};
pub use digest::{CacheKey, DatasetDigest};
pub use error::{HousingError, HousingResult};
pub use parser::{CsvRecordParser, RecordParser, COLUMNS};
pub use record::HousingRecord;
pub use repository::HousingRepository;
pub use source::{DatasetSource, FileDataset};
pub use stats::{compute_statistics, HousingStatistics};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with housing data
    pub use crate::{
        compute_statistics, CacheKey, CsvRecordParser, DatasetSource, FileDataset, HousingError,
        HousingRecord, HousingRepository, HousingStatistics, RecordParser, StatsCache,
    };
}
