use std::fs;

use anyhow::Result;
use itertools::Itertools;
use serde::Deserialize;

use organize_tools::print_error;

use crate::Args;

/// File extensions renamed when nothing else is specified.
/// Directories are always included.
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["pdf", "epub", "txt"];

/// Final config combined from CLI arguments and user config file.
#[derive(Debug)]
pub struct Config {
    pub dryrun: bool,
    pub extensions: Vec<String>,
    pub verbose: bool,
}

/// Config from the user config file
#[derive(Debug, Default, Deserialize)]
struct PrenameUserConfig {
    #[serde(default)]
    dryrun: bool,
    #[serde(default)]
    extensions: Vec<String>,
    #[serde(default)]
    verbose: bool,
}

/// Wrapper needed for parsing the user config file section.
#[derive(Debug, Default, Deserialize)]
struct UserConfig {
    #[serde(default)]
    prename: PrenameUserConfig,
}

impl PrenameUserConfig {
    /// Try to read user config from the file if it exists.
    /// Otherwise, fall back to default config.
    fn get_user_config() -> Self {
        organize_tools::config::CONFIG_PATH
            .as_deref()
            .and_then(|path| {
                path.exists().then(|| {
                    fs::read_to_string(path)
                        .map_err(|e| {
                            print_error!("Error reading config file {}: {e}", path.display());
                        })
                        .ok()
                })
                .flatten()
            })
            .and_then(|config_string| Self::from_toml_str(&config_string).ok())
            .unwrap_or_default()
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    /// Returns an error if the TOML string is invalid.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        toml::from_str::<UserConfig>(toml_str)
            .map(|config| config.prename)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {e}"))
    }
}

impl Config {
    /// Create config from given command line args and user config file.
    pub fn from_args(args: &Args) -> Self {
        let user_config = PrenameUserConfig::get_user_config();

        let mut extensions: Vec<String> = user_config
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .unique()
            .collect();
        if extensions.is_empty() {
            extensions = DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect();
        }

        Self {
            dryrun: args.print || user_config.dryrun,
            extensions,
            verbose: args.verbose || user_config.verbose,
        }
    }
}
