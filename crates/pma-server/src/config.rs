//! Server configuration
//!
//! Resolved from command-line flags, falling back to `PMA_*` environment
//! variables, then to the defaults below.

use crate::error::{ServerError, ServerResult};
use clap::{value_parser, Arg, ArgMatches, Command};
use pma_housing::source::DEFAULT_DATASET_PATH;
use pma_housing::DEFAULT_CACHE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8080;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Name as accepted on the command line
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl Display for LogFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ServerError::Config(format!("unknown log format '{other}'"))),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    pub bind_addr: SocketAddr,
    /// Housing dataset file
    pub dataset_path: PathBuf,
    /// Maximum number of cached statistics entries
    pub cache_capacity: u64,
    /// Log output format
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With listen address
    #[inline]
    #[must_use]
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// With dataset path
    #[inline]
    #[must_use]
    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }

    /// With cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// With log format
    #[inline]
    #[must_use]
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.log_format = format;
        self
    }

    /// Check invariants
    ///
    /// # Errors
    /// `ServerError::Config` if the cache capacity is zero.
    pub fn validate(&self) -> ServerResult<()> {
        if self.cache_capacity == 0 {
            return Err(ServerError::Config(
                "cache capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolve configuration from parsed arguments
    ///
    /// # Errors
    /// `ServerError::Config` if a value is invalid.
    pub fn from_matches(matches: &ArgMatches) -> ServerResult<Self> {
        let defaults = Self::default();
        let log_format = match matches.get_one::<String>("log-format") {
            Some(name) => name.parse()?,
            None => defaults.log_format,
        };

        let config = Self {
            bind_addr: matches
                .get_one::<SocketAddr>("bind")
                .copied()
                .unwrap_or(defaults.bind_addr),
            dataset_path: matches
                .get_one::<PathBuf>("dataset")
                .cloned()
                .unwrap_or(defaults.dataset_path),
            cache_capacity: matches
                .get_one::<u64>("cache-capacity")
                .copied()
                .unwrap_or(defaults.cache_capacity),
            log_format,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and resolve configuration from an argument list
    ///
    /// # Errors
    /// `ServerError::Config` if the arguments do not parse or a value is
    /// invalid.
    pub fn try_from_args<I, T>(args: I) -> ServerResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = cli()
            .try_get_matches_from(args)
            .map_err(|err| ServerError::Config(err.to_string()))?;
        Self::from_matches(&matches)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)),
            dataset_path: PathBuf::from(DEFAULT_DATASET_PATH),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            log_format: LogFormat::Pretty,
        }
    }
}

/// Command-line interface
#[must_use]
pub fn cli() -> Command {
    Command::new("pma-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Property market analysis REST API")
        .arg(
            Arg::new("bind")
                .long("bind")
                .env("PMA_BIND")
                .default_value("0.0.0.0:8080")
                .value_parser(value_parser!(SocketAddr))
                .help("Address to listen on"),
        )
        .arg(
            Arg::new("dataset")
                .long("dataset")
                .env("PMA_DATASET")
                .default_value(DEFAULT_DATASET_PATH)
                .value_parser(value_parser!(PathBuf))
                .help("Path to the housing CSV dataset"),
        )
        .arg(
            Arg::new("cache-capacity")
                .long("cache-capacity")
                .env("PMA_CACHE_CAPACITY")
                .default_value("500")
                .value_parser(value_parser!(u64))
                .help("Maximum number of cached statistics entries"),
        )
        .arg(
            Arg::new("log-format")
                .long("log-format")
                .env("PMA_LOG_FORMAT")
                .default_value("pretty")
                .value_parser(["pretty", "json"])
                .help("Log output format"),
        )
}
