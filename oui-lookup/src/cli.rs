use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use oui::ResolveStrategy;
use oui_config::Environment;

#[derive(Parser, Debug)]
#[command(author, version, about = "Resolve hardware addresses to their vendors", long_about = None)]
pub struct Args {
    /// Where to send log output
    #[arg(
        long = "log-target",
        value_enum,
        default_value = "terminal",
        global = true
    )]
    pub log_target: LogTarget,
    /// Vendor assignment file, overriding the configured one
    #[arg(long = "vendor-file", global = true)]
    pub vendor_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LogTarget {
    /// Send logs to terminal with colors and pretty formatting
    Terminal,
    /// Send logs to files in 'logs/' directory
    File,
}

impl From<LogTarget> for Environment {
    fn from(log_target: LogTarget) -> Self {
        match log_target {
            LogTarget::Terminal => Environment::Dev,
            LogTarget::File => Environment::Prod,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum StrategyArg {
    /// Scan the whole table
    Linear,
    /// Binary search over the sorted table
    Binary,
    /// Hash bucket dispatch
    Hashed,
}

impl From<StrategyArg> for ResolveStrategy {
    fn from(strategy: StrategyArg) -> Self {
        match strategy {
            StrategyArg::Linear => ResolveStrategy::Linear,
            StrategyArg::Binary => ResolveStrategy::Binary,
            StrategyArg::Hashed => ResolveStrategy::Hashed,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve addresses to vendor names, reading stdin when none are given
    Resolve {
        /// Strategy overriding the configured one
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Addresses to resolve (`AA:BB:CC:DD:EE:FF`, `aa-bb-cc-dd-ee-ff` or `aabbccddeeff`)
        macs: Vec<String>,
    },
    /// Print the first prefix assigned to a vendor
    Vendor {
        /// Exact vendor name
        name: String,
    },
    /// Print table size and hash bucket statistics
    Stats,
    /// Resolve every record against the index under each strategy
    Verify,
}
