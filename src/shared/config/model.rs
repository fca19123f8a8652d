use std::env;
use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat, FileSourceFile};
use serde::{Deserialize, Serialize};

use crate::engine::core::column::options::{
    CompressionKind, DEFAULT_PAGE_SIZE_HINT, DEFAULT_ZSTD_LEVEL, EncodingKind, ZeroValueMode,
};
use crate::engine::sketch::DEFAULT_PRECISION;

pub const CONFIG_ENV: &str = "LOGCOL_CONFIG";
pub const ENV_PREFIX: &str = "LOGCOL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub column: ColumnConfig,
    pub sketch: SketchConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    pub page_size_hint: usize,
    pub compression: CompressionKind,
    pub compression_level: i32,
    pub encoding: EncodingKind,
    pub zero_values: ZeroValueMode,
    pub store_range_stats: bool,
    pub store_cardinality_stats: bool,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            page_size_hint: DEFAULT_PAGE_SIZE_HINT,
            compression: CompressionKind::Lz4,
            compression_level: DEFAULT_ZSTD_LEVEL,
            encoding: EncodingKind::Plain,
            zero_values: ZeroValueMode::AllTypes,
            store_range_stats: true,
            store_cardinality_stats: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub precision: u8,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub stdout_level: String,
    pub file_level: String,
    /// Daily rolling file output under `log_dir`.
    pub file_enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            stdout_level: "info".to_string(),
            file_level: "debug".to_string(),
            file_enabled: false,
        }
    }
}

/// Loads the file named by `LOGCOL_CONFIG` (default `config`, any extension
/// the `config` crate knows) if it exists, then applies `LOGCOL__SECTION__KEY`
/// environment overrides.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let config_path = env::var(CONFIG_ENV).unwrap_or_else(|_| "config".to_string());
    build_settings(File::with_name(&config_path).required(false))
}

/// Like [`load_settings`] but the file must exist.
pub fn load_settings_from<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    build_settings(File::from(path.as_ref()))
}

fn build_settings(file: File<FileSourceFile, FileFormat>) -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()
}
