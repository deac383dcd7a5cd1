//! Content digests and statistics cache keys
//!
//! Provides [`DatasetDigest`], a strongly-typed 32-byte SHA-256 digest of the
//! dataset bytes, and [`CacheKey`], the tagged key the statistics cache is
//! addressed by.

use crate::error::HousingError;
use sha2::{Digest, Sha256};
use std::fmt::{self, Debug, Display, Formatter};

/// A 32-byte SHA-256 digest of the raw dataset bytes
///
/// Immutable and cheap to copy.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DatasetDigest([u8; 32]);

impl DatasetDigest {
    /// Create a digest from raw bytes
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Compute the SHA-256 digest of `data`
    #[inline]
    #[must_use]
    pub fn compute(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Get reference to the underlying bytes
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Short string representation (first 16 hex chars)
    #[inline]
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for DatasetDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl Debug for DatasetDigest {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DatasetDigest({})", self.short())
    }
}

/// Key of the statistics cache
///
/// Only [`CacheKey::Digest`] names actual content. The two sentinels give
/// failed key derivations a shared slot instead of bypassing the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Digest of the dataset bytes that were read
    Digest(DatasetDigest),
    /// The dataset could not be located
    Missing,
    /// The dataset was located but its digest could not be computed
    KeyError,
}

impl CacheKey {
    /// Derive the key for the outcome of a dataset read
    #[must_use]
    pub fn derive(read: &Result<Vec<u8>, HousingError>) -> Self {
        match read {
            Ok(bytes) => Self::Digest(DatasetDigest::compute(bytes)),
            Err(err) if err.is_not_found() => Self::Missing,
            Err(_) => Self::KeyError,
        }
    }

    /// Whether this key names real content
    #[inline]
    #[must_use]
    pub fn is_digest(&self) -> bool {
        matches!(self, Self::Digest(_))
    }
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digest(digest) => write!(f, "{}", digest.short()),
            Self::Missing => f.write_str("housing_csv_missing"),
            Self::KeyError => f.write_str("housing_stats_key_error"),
        }
    }
}
