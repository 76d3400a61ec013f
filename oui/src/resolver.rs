//! Public resolution facade.
//!
//! A [`VendorIndex`] is built once from a vendor file (or an existing table) and is
//! immutable afterwards. It is `Send + Sync`, so a single instance behind an [`Arc`] can
//! serve lookups from any number of threads without locking.
//!
//! Resolution never fails. Queries that cannot be normalized, or that no record covers,
//! resolve to [`UNKNOWN_VENDOR`]. A query whose bucket holds no record at all resolves to
//! [`UNKNOWN_BUCKET_VENDOR`] under the hashed strategy.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use oui_config::shared::{IndexConfig, ResolveStrategy};
use tracing::info;

use crate::encoder::{canonicalize, format_mac};
use crate::error::OuiResult;
use crate::index::{ChainLookup, HashedIndex, linear, sorted};
use crate::loader::load_vendor_table;
use crate::metrics::{
    OUI_INDEX_BUCKETS, OUI_INDEX_BUILD_DURATION_SECONDS, OUI_INDEX_EMPTY_BUCKETS,
    OUI_INDEX_MAX_CHAIN_LENGTH, OUI_RESOLUTIONS_TOTAL, OUI_TABLE_RECORDS, OUTCOME_LABEL,
    STRATEGY_LABEL, register_metrics,
};
use crate::table::{VendorRecord, VendorTable};

/// Vendor name returned when no record covers the query.
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// Vendor name returned when the query hashes to a bucket without records.
pub const UNKNOWN_BUCKET_VENDOR: &str = "Unknown-1";

/// Structured result of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The record holding the longest prefix of the query.
    Vendor(&'a VendorRecord),
    /// No record covers the query, or the query is malformed.
    Unknown,
    /// The query hashes to a bucket without records.
    UnknownNoBucket,
}

impl<'a> Resolution<'a> {
    /// Returns the vendor name, or the matching unknown sentinel.
    pub fn as_str(&self) -> &'a str {
        match *self {
            Resolution::Vendor(record) => &record.vendor,
            Resolution::Unknown => UNKNOWN_VENDOR,
            Resolution::UnknownNoBucket => UNKNOWN_BUCKET_VENDOR,
        }
    }

    /// Returns the matched record, if any.
    pub fn record(&self) -> Option<&'a VendorRecord> {
        match *self {
            Resolution::Vendor(record) => Some(record),
            _ => None,
        }
    }

    /// Returns `true` when a record covers the query.
    pub fn is_known(&self) -> bool {
        matches!(self, Resolution::Vendor(_))
    }

    fn outcome(&self) -> &'static str {
        match self {
            Resolution::Vendor(_) => "vendor",
            Resolution::Unknown => "unknown",
            Resolution::UnknownNoBucket => "unknown_bucket",
        }
    }
}

/// Immutable vendor table plus the indices built over it.
#[derive(Debug, Clone)]
pub struct VendorIndex {
    table: Arc<VendorTable>,
    hashed: HashedIndex,
    config: IndexConfig,
}

impl VendorIndex {
    /// Loads the vendor file at `path` and builds every index over it.
    ///
    /// Fails with [`crate::error::ErrorKind::IoError`] when the file cannot be read,
    /// [`crate::error::ErrorKind::VendorFileFormat`] on the first malformed row, and
    /// [`crate::error::ErrorKind::ConfigError`] when `config` is invalid.
    pub fn build(path: impl AsRef<Path>, config: IndexConfig) -> OuiResult<Self> {
        let started = Instant::now();
        config.validate()?;

        let table = load_vendor_table(path)?;
        let index = Self::from_table(Arc::new(table), config)?;

        histogram!(OUI_INDEX_BUILD_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

        Ok(index)
    }

    /// Builds every index over an already loaded table.
    pub fn from_table(table: Arc<VendorTable>, config: IndexConfig) -> OuiResult<Self> {
        config.validate()?;
        register_metrics();

        let hashed = HashedIndex::build(&table, config.bucket_count);
        let stats = hashed.stats();

        info!(
            records = table.len(),
            buckets = stats.buckets,
            empty_buckets = stats.empty,
            min_chain = stats.min,
            max_chain = stats.max,
            mean_chain = stats.mean,
            strategy = %config.strategy,
            "vendor index ready"
        );

        gauge!(OUI_TABLE_RECORDS).set(table.len() as f64);
        gauge!(OUI_INDEX_BUCKETS).set(stats.buckets as f64);
        gauge!(OUI_INDEX_EMPTY_BUCKETS).set(stats.empty as f64);
        gauge!(OUI_INDEX_MAX_CHAIN_LENGTH).set(stats.max as f64);

        Ok(Self {
            table,
            hashed,
            config,
        })
    }

    /// Resolves `mac` to a vendor name with the configured strategy.
    pub fn resolve(&self, mac: &str) -> &str {
        self.lookup(mac).as_str()
    }

    /// Resolves `mac` to a vendor name with an explicit strategy.
    pub fn resolve_with(&self, strategy: ResolveStrategy, mac: &str) -> &str {
        self.lookup_with(strategy, mac).as_str()
    }

    /// Resolves a raw 6-byte hardware address with the configured strategy.
    pub fn resolve_bytes(&self, mac: [u8; 6]) -> &str {
        self.resolve(&format_mac(mac))
    }

    /// Looks up `mac` with the configured strategy.
    pub fn lookup(&self, mac: &str) -> Resolution<'_> {
        self.lookup_with(self.config.strategy, mac)
    }

    /// Looks up `mac` with an explicit strategy.
    pub fn lookup_with(&self, strategy: ResolveStrategy, mac: &str) -> Resolution<'_> {
        let resolution = match canonicalize(mac) {
            Some(query) => self.search(strategy, &query),
            None => Resolution::Unknown,
        };

        counter!(
            OUI_RESOLUTIONS_TOTAL,
            STRATEGY_LABEL => strategy.as_str(),
            OUTCOME_LABEL => resolution.outcome()
        )
        .increment(1);

        resolution
    }

    /// Returns the first prefix in table order assigned to exactly `vendor`.
    pub fn prefix_of_vendor(&self, vendor: &str) -> Option<&str> {
        self.table.prefix_of_vendor(vendor)
    }

    /// Returns the underlying vendor table.
    pub fn table(&self) -> &Arc<VendorTable> {
        &self.table
    }

    /// Returns the hashed index.
    pub fn hashed(&self) -> &HashedIndex {
        &self.hashed
    }

    /// Returns the strategy used by [`VendorIndex::resolve`].
    pub fn strategy(&self) -> ResolveStrategy {
        self.config.strategy
    }

    /// Returns the configuration the index was built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    fn search(&self, strategy: ResolveStrategy, query: &str) -> Resolution<'_> {
        let position = match strategy {
            ResolveStrategy::Linear => linear::scan(&self.table, query),
            ResolveStrategy::Binary => sorted::binary_search_by_key(&self.table, query),
            ResolveStrategy::Hashed => match self.hashed.lookup(&self.table, query) {
                ChainLookup::Match(position) => Some(position),
                ChainLookup::NoMatch => None,
                ChainLookup::EmptyBucket => return Resolution::UnknownNoBucket,
            },
        };

        position.map_or(Resolution::Unknown, |position| {
            Resolution::Vendor(&self.table[position])
        })
    }
}
