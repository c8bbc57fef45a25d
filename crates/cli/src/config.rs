//! Runtime configuration for the CLI.

use std::path::PathBuf;

use anyhow::{Context, Result};

use trove_observability::LogFormat;

/// Environment variable naming the data directory (overridden by `--data-dir`).
pub const DATA_DIR_ENV: &str = "TROVE_DATA_DIR";

const APP_DIR: &str = "trove";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    /// `data_dir` is the flag/env value clap already resolved; when absent the
    /// OS data directory is used.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        Ok(Self {
            data_dir,
            log_format: LogFormat::from_env(),
        })
    }
}

/// `{os data dir}/trove`, falling back to `~/.local/share/trove`.
pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .context("failed to resolve a data directory; pass --data-dir or set TROVE_DATA_DIR")?;
    Ok(base.join(APP_DIR))
}
