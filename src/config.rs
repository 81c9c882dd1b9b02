use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::ui::theme::ThemeMode;

const CONFIG_FILE: &str = "config.toml";
const DB_FILE: &str = "spendboard.db";
const ENV_PREFIX: &str = "SPENDBOARD";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) db_path: Option<PathBuf>,
    pub(crate) theme: ThemeMode,
    pub(crate) currency_symbol: String,
    pub(crate) log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            theme: ThemeMode::Dark,
            currency_symbol: "₹".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Layer the optional config file and `SPENDBOARD_*` environment variables
    /// over the defaults.
    pub(crate) fn load(path: Option<&Path>, data_dir: &Path) -> Result<Self> {
        let default_path = data_dir.join(CONFIG_FILE);
        let path = path.unwrap_or(&default_path);

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: AppConfig = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        Ok(config)
    }

    pub(crate) fn db_path(&self, data_dir: &Path) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| data_dir.join(DB_FILE))
    }
}

pub(crate) fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendboard", "Spendboard")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
