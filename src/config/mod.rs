pub mod model;

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub use model::{BotConfig, LoggingConfig};

const CONFIG_FILE: &str = "config.toml";

/// Where to look when no path is given on the command line.
fn default_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("nickcycler").join(CONFIG_FILE));
    }
    paths
}

/// Load the configuration from `path`, or from the first default location
/// that exists. A missing or malformed file is an error.
pub fn load_config(path: Option<&Path>) -> Result<BotConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let candidates = default_paths();
            match candidates.iter().find(|p| p.exists()) {
                Some(found) => found.clone(),
                None => bail!(
                    "No config file found (looked in {})",
                    candidates
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }
        }
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    parse_config(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<BotConfig> {
    let config: BotConfig = toml::from_str(contents)?;
    if config.hostname.trim().is_empty() {
        bail!("hostname must not be empty");
    }
    Ok(config)
}
