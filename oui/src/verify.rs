//! Self-check of a built index against its own table.
//!
//! Every record is resolved twice per strategy: once by its bare prefix and once by the
//! prefix completed to a full address with `F` digits. A result differing from the
//! record's vendor counts as a mismatch. Mismatches are expected only for records that
//! another record shadows, either an exact duplicate prefix or a longer prefix covering
//! the completed address.

use std::fmt;
use std::time::{Duration, Instant};

use oui_config::shared::ResolveStrategy;
use tracing::{info, warn};

use crate::encoder::pad_to_mac;
use crate::resolver::VendorIndex;

/// Number of mismatches kept as samples in each [`StrategyReport`].
pub const MAX_SAMPLE_MISMATCHES: usize = 10;

/// One query whose result differed from the record it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub query: String,
    pub expected: String,
    pub actual: String,
}

/// Verification result of a single strategy.
#[derive(Debug, Clone)]
pub struct StrategyReport {
    pub strategy: ResolveStrategy,
    /// Number of queries resolved.
    pub checked: usize,
    /// Number of queries whose result differed from the expected vendor.
    pub mismatches: usize,
    /// The first [`MAX_SAMPLE_MISMATCHES`] mismatches.
    pub samples: Vec<Mismatch>,
    pub duration: Duration,
}

/// Verification result over every strategy.
#[derive(Debug, Clone)]
pub struct VerifyReport {
    /// Number of records in the verified table.
    pub records: usize,
    pub strategies: Vec<StrategyReport>,
}

impl VerifyReport {
    /// Sum of mismatches over every strategy.
    pub fn total_mismatches(&self) -> usize {
        self.strategies.iter().map(|report| report.mismatches).sum()
    }

    /// Returns the report of `strategy`.
    pub fn strategy(&self, strategy: ResolveStrategy) -> Option<&StrategyReport> {
        self.strategies
            .iter()
            .find(|report| report.strategy == strategy)
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "verified {} records", self.records)?;
        for report in &self.strategies {
            writeln!(
                f,
                "{:<8} {:>8} queries {:>6} mismatches in {:?}",
                report.strategy.as_str(),
                report.checked,
                report.mismatches,
                report.duration
            )?;
            for mismatch in &report.samples {
                writeln!(
                    f,
                    "    {} expected {:?} got {:?}",
                    mismatch.query, mismatch.expected, mismatch.actual
                )?;
            }
        }

        Ok(())
    }
}

/// Resolves every record of `index` under each strategy and counts mismatches.
pub fn verify(index: &VendorIndex) -> VerifyReport {
    let table = index.table();
    let queries: Vec<(String, &str)> = table
        .iter()
        .flat_map(|record| {
            [
                (record.prefix.clone(), record.vendor.as_str()),
                (pad_to_mac(&record.prefix, 'F'), record.vendor.as_str()),
            ]
        })
        .collect();

    let strategies = ResolveStrategy::ALL
        .into_iter()
        .map(|strategy| verify_strategy(index, strategy, &queries))
        .collect();

    VerifyReport {
        records: table.len(),
        strategies,
    }
}

fn verify_strategy(
    index: &VendorIndex,
    strategy: ResolveStrategy,
    queries: &[(String, &str)],
) -> StrategyReport {
    let started = Instant::now();
    let mut mismatches = 0;
    let mut samples = Vec::new();

    for (query, expected) in queries {
        let actual = index.resolve_with(strategy, query);
        if actual == *expected {
            continue;
        }

        mismatches += 1;
        if samples.len() < MAX_SAMPLE_MISMATCHES {
            samples.push(Mismatch {
                query: query.clone(),
                expected: expected.to_string(),
                actual: actual.to_string(),
            });
        }
    }

    let duration = started.elapsed();
    if mismatches > 0 {
        warn!(%strategy, mismatches, ?duration, "verification found mismatches");
    } else {
        info!(%strategy, checked = queries.len(), ?duration, "verification passed");
    }

    StrategyReport {
        strategy,
        checked: queries.len(),
        mismatches,
        samples,
        duration,
    }
}
