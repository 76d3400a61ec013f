use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Lookup strategy used to answer resolution queries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolveStrategy {
    /// Full scan of the vendor table. Kept as a correctness oracle.
    Linear,
    /// Binary search over the sorted vendor table.
    Binary,
    /// Bucket dispatch followed by a scan of the bucket chain.
    #[default]
    Hashed,
}

impl ResolveStrategy {
    /// All strategies, in oracle-first order.
    pub const ALL: [ResolveStrategy; 3] = [
        ResolveStrategy::Linear,
        ResolveStrategy::Binary,
        ResolveStrategy::Hashed,
    ];

    /// Returns the lowercase name used in configuration files and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolveStrategy::Linear => "linear",
            ResolveStrategy::Binary => "binary",
            ResolveStrategy::Hashed => "hashed",
        }
    }
}

impl fmt::Display for ResolveStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vendor index construction settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IndexConfig {
    /// Strategy used by `resolve` when none is given explicitly.
    #[serde(default)]
    pub strategy: ResolveStrategy,
    /// Number of hash buckets. Must be a power of two between
    /// [`IndexConfig::MIN_BUCKET_COUNT`] and [`IndexConfig::MAX_BUCKET_COUNT`].
    #[serde(default = "default_bucket_count")]
    pub bucket_count: usize,
}

impl IndexConfig {
    /// Default number of hash buckets, one per value of the 12-bit prefix fold.
    pub const DEFAULT_BUCKET_COUNT: usize = 1 << 12;

    /// Smallest accepted number of hash buckets.
    pub const MIN_BUCKET_COUNT: usize = 4096;

    /// Largest accepted number of hash buckets, one per 24-bit OUI.
    pub const MAX_BUCKET_COUNT: usize = 1 << 24;

    /// Sets the default resolution strategy.
    pub fn with_strategy(mut self, strategy: ResolveStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the number of hash buckets.
    pub fn with_bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    /// Validates index settings.
    ///
    /// Ensures the bucket count is a power of two within the accepted range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let in_range = (Self::MIN_BUCKET_COUNT..=Self::MAX_BUCKET_COUNT).contains(&self.bucket_count);
        if !in_range || !self.bucket_count.is_power_of_two() {
            return Err(ValidationError::InvalidFieldValue {
                field: "index.bucket_count".to_string(),
                constraint: format!(
                    "must be a power of two between {} and {}",
                    Self::MIN_BUCKET_COUNT,
                    Self::MAX_BUCKET_COUNT
                ),
            });
        }

        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            strategy: ResolveStrategy::default(),
            bucket_count: default_bucket_count(),
        }
    }
}

fn default_bucket_count() -> usize {
    IndexConfig::DEFAULT_BUCKET_COUNT
}
