use std::path::Path;

use config::{File, FileFormat};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub aggregate: AggregateConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregateConfig {
    /// Allow LZ4 for partial-state blobs above the threshold
    #[serde(default = "default_compression_enabled")]
    pub compression_enabled: bool,
    #[serde(default = "default_compression_threshold_bytes")]
    pub compression_threshold_bytes: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            compression_enabled: default_compression_enabled(),
            compression_threshold_bytes: default_compression_threshold_bytes(),
        }
    }
}

fn default_compression_enabled() -> bool {
    true
}

fn default_compression_threshold_bytes() -> usize {
    4096
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// No file layer when unset
    pub log_dir: Option<String>,
    #[serde(default = "default_stdout_level")]
    pub stdout_level: String,
    #[serde(default = "default_file_level")]
    pub file_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            stdout_level: default_stdout_level(),
            file_level: default_file_level(),
        }
    }
}

fn default_stdout_level() -> String {
    "info".to_string()
}

fn default_file_level() -> String {
    "debug".to_string()
}

impl Settings {
    pub fn load_from(path: impl AsRef<Path>) -> Result<Settings, config::ConfigError> {
        let path = path.as_ref().to_string_lossy();
        let settings: Settings = config::Config::builder()
            .add_source(File::new(&path, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }
}
