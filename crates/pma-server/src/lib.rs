//! PMA Server
//!
//! REST API for synthetic market analysis and housing statistics, served
//! with warp under `/api/market-analysis`.
//!
//! # Example
//!
//! ```rust,ignore
//! use pma_server::{routes, MarketAnalysisService, ServerConfig};
//!
//! # async fn example() {
//! let config = ServerConfig::default();
//! let service = MarketAnalysisService::from_config(&config);
//! warp::serve(routes(service)).run(config.bind_addr).await;
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod routes;
pub mod service;
pub mod telemetry;

pub use config::{cli, LogFormat, ServerConfig};
pub use error::{ErrorBody, ServerError, ServerResult};
pub use routes::{handle_rejection, routes, HEALTH_MESSAGE};
pub use service::MarketAnalysisService;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
