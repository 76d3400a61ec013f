use std::path::PathBuf;

use oui_config::shared::{IndexConfig, LookupConfig};
use oui_config::{Environment, LoadConfigError, load_config_from};

use crate::error::{LookupError, LookupResult};

/// Directory holding the layered configuration files.
const CONFIGURATION_DIR: &str = "configuration";

/// Loads and validates the lookup configuration.
///
/// Reads `./configuration` for `environment` when it exists. A `vendor_file` given on the
/// command line replaces the configured one and is enough on its own when there is no
/// configuration directory.
pub fn load_lookup_config(
    vendor_file: Option<PathBuf>,
    environment: Environment,
) -> LookupResult<LookupConfig> {
    let directory = std::env::current_dir()?.join(CONFIGURATION_DIR);
    let config = resolve_config(&directory, vendor_file, environment)?;
    config.validate().map_err(LookupError::config)?;

    Ok(config)
}

fn resolve_config(
    directory: &std::path::Path,
    vendor_file: Option<PathBuf>,
    environment: Environment,
) -> LookupResult<LookupConfig> {
    if directory.is_dir() {
        let mut config: LookupConfig =
            load_config_from(directory, environment).map_err(LookupError::config)?;
        if let Some(vendor_file) = vendor_file {
            config.vendor_file = vendor_file;
        }
        return Ok(config);
    }

    match vendor_file {
        Some(vendor_file) => Ok(LookupConfig {
            vendor_file,
            index: IndexConfig::default(),
            metrics: None,
        }),
        None => Err(LookupError::config(
            LoadConfigError::MissingConfigurationDirectory(directory.to_path_buf()),
        )),
    }
}
