//! Metrics definitions for vendor index monitoring.

use std::sync::Once;

use metrics::{Unit, describe_counter, describe_gauge, describe_histogram};

static REGISTER: Once = Once::new();

/// Label for the resolution strategy in metrics.
pub const STRATEGY_LABEL: &str = "strategy";

/// Label for the resolution outcome (`vendor`, `unknown`, `unknown_bucket`) in metrics.
pub const OUTCOME_LABEL: &str = "outcome";

// Index build metrics

/// Gauge for the number of records in the vendor table.
pub const OUI_TABLE_RECORDS: &str = "oui_table_records";

/// Gauge for the number of hash buckets.
pub const OUI_INDEX_BUCKETS: &str = "oui_index_buckets";

/// Gauge for the number of hash buckets without records.
pub const OUI_INDEX_EMPTY_BUCKETS: &str = "oui_index_empty_buckets";

/// Gauge for the longest bucket chain.
pub const OUI_INDEX_MAX_CHAIN_LENGTH: &str = "oui_index_max_chain_length";

/// Histogram for the time spent loading and indexing the vendor table.
pub const OUI_INDEX_BUILD_DURATION_SECONDS: &str = "oui_index_build_duration_seconds";

// Resolution metrics

/// Counter for resolved queries.
pub const OUI_RESOLUTIONS_TOTAL: &str = "oui_resolutions_total";

/// Registers vendor index metric descriptions. Safe to call multiple times.
pub fn register_metrics() {
    REGISTER.call_once(|| {
        describe_gauge!(
            OUI_TABLE_RECORDS,
            Unit::Count,
            "Number of prefix records in the loaded vendor table"
        );
        describe_gauge!(OUI_INDEX_BUCKETS, Unit::Count, "Number of hash buckets");
        describe_gauge!(
            OUI_INDEX_EMPTY_BUCKETS,
            Unit::Count,
            "Number of hash buckets holding no record"
        );
        describe_gauge!(
            OUI_INDEX_MAX_CHAIN_LENGTH,
            Unit::Count,
            "Length of the longest hash bucket chain"
        );
        describe_histogram!(
            OUI_INDEX_BUILD_DURATION_SECONDS,
            Unit::Seconds,
            "Time taken to load the vendor file and build the index"
        );
        describe_counter!(
            OUI_RESOLUTIONS_TOTAL,
            Unit::Count,
            "Number of resolved addresses by strategy and outcome"
        );
    });
}
