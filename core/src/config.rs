use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StorageConfig {
    /// Directory holding `<network-name>.txt` snapshots.
    pub data_dir: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RankConfig {
    pub damping: f64,
    /// Number of full passes over every vertex.
    pub sweeps: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub rank: RankConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: ".".into(),
        }
    }
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            sweeps: 100,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            rank: RankConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &run_mode)
    }

    /// Layers `<dir>/default`, `<dir>/<run_mode>` and `SOCNET__*` variables.
    pub fn load_from(dir: &str, run_mode: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(&format!("{}/default", dir)))
            .add_source(File::with_name(&format!("{}/{}", dir, run_mode)).required(false))
            .add_source(Environment::with_prefix("SOCNET").separator("__"));

        builder.build()?.try_deserialize()
    }
}
