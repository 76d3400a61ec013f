use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use oui::index::BucketStats;
use oui::resolver::VendorIndex;
use oui::verify::verify;
use oui::ResolveStrategy;
use oui_config::shared::LookupConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cli::Commands;
use crate::error::LookupResult;

/// Number of addresses resolved by one task.
const RESOLVE_CHUNK_SIZE: usize = 256;

/// Message printed when a vendor has no assigned prefix.
const VENDOR_NOT_FOUND: &str = "Vendor not in the table";

/// Loads the vendor table and runs `command` against it.
pub async fn run_command(config: LookupConfig, command: Commands) -> LookupResult<ExitCode> {
    log_config(&config);
    let index = build_index(&config).await?;

    match command {
        Commands::Resolve { strategy, macs } => {
            let strategy = strategy.map(ResolveStrategy::from).unwrap_or(index.strategy());
            let macs = if macs.is_empty() { read_stdin().await? } else { macs };
            resolve(index, strategy, macs).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Vendor { name } => match index.prefix_of_vendor(&name) {
            Some(prefix) => {
                write_stdout(&format!("{prefix}\n")).await?;
                Ok(ExitCode::SUCCESS)
            }
            None => {
                write_stdout(&format!("{VENDOR_NOT_FOUND}\n")).await?;
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Stats => {
            let rendered = render_stats(index.table().len(), &index.hashed().stats());
            write_stdout(&format!("{rendered}\n")).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify => {
            let report = tokio::task::spawn_blocking(move || verify(&index))
                .await
                .map_err(io::Error::from)?;
            write_stdout(&report.to_string()).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Builds the vendor index on the blocking pool.
///
/// Lookups only start once this returns, so the index is complete before any query.
pub async fn build_index(config: &LookupConfig) -> LookupResult<Arc<VendorIndex>> {
    let vendor_file = config.vendor_file.clone();
    let index_config = config.index.clone();

    let index = tokio::task::spawn_blocking(move || VendorIndex::build(vendor_file, index_config))
        .await
        .map_err(io::Error::from)??;

    Ok(Arc::new(index))
}

/// Resolves `macs` concurrently and prints one line per address in input order.
async fn resolve(
    index: Arc<VendorIndex>,
    strategy: ResolveStrategy,
    macs: Vec<String>,
) -> LookupResult<()> {
    info!(addresses = macs.len(), %strategy, "resolving addresses");

    let handles: Vec<JoinHandle<String>> = macs
        .chunks(RESOLVE_CHUNK_SIZE)
        .map(|chunk| {
            let index = index.clone();
            let chunk = chunk.to_vec();
            tokio::spawn(async move {
                chunk
                    .iter()
                    .map(|mac| render_resolution(mac, index.resolve_with(strategy, mac)))
                    .collect::<String>()
            })
        })
        .collect();

    let mut stdout = BufWriter::new(tokio::io::stdout());
    for handle in handles {
        let lines = handle.await.map_err(io::Error::from)?;
        stdout.write_all(lines.as_bytes()).await?;
    }
    stdout.flush().await?;

    Ok(())
}

async fn read_stdin() -> io::Result<Vec<String>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut macs = Vec::new();
    while let Some(line) = lines.next_line().await? {
        let mac = line.trim();
        if !mac.is_empty() {
            macs.push(mac.to_string());
        }
    }

    debug!(addresses = macs.len(), "read addresses from stdin");
    Ok(macs)
}

async fn write_stdout(contents: &str) -> io::Result<()> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(contents.as_bytes()).await?;
    stdout.flush().await
}

/// Renders one `MAC<TAB>vendor` output line.
fn render_resolution(mac: &str, vendor: &str) -> String {
    format!("{mac}\t{vendor}\n")
}

fn render_stats(records: usize, stats: &BucketStats) -> String {
    format!("records: {records}\n{stats}")
}

fn log_config(config: &LookupConfig) {
    debug!(
        vendor_file = %config.vendor_file.display(),
        strategy = %config.index.strategy,
        bucket_count = config.index.bucket_count,
        metrics_port = config.metrics.as_ref().map(|metrics| metrics.port),
        "using lookup config"
    );
}

#[cfg(test)]
mod tests {
    use oui::table::{VendorRecord, VendorTable};
    use oui::IndexConfig;

    use super::*;

    #[test]
    fn resolution_line_is_tab_separated() {
        assert_eq!(
            render_resolution("aa:bb:cc:00:00:01", "Acme Sub"),
            "aa:bb:cc:00:00:01\tAcme Sub\n"
        );
    }

    #[test]
    fn stats_render_records_and_buckets() {
        let table = VendorTable::from_records(vec![
            VendorRecord::new("AA:BB:CC", "Acme").unwrap(),
            VendorRecord::new("AA:BB:CC:0", "Acme Block").unwrap(),
            VendorRecord::new("11:22:33", "Other").unwrap(),
        ]);
        let index = VendorIndex::from_table(Arc::new(table), IndexConfig::default()).unwrap();

        insta::assert_snapshot!(
            render_stats(index.table().len(), &index.hashed().stats()),
            @r"
        records: 3
        3 records in 4096 buckets (4094 empty), chain length min 0 max 2 mean 0.00
        "
        );
    }
}
