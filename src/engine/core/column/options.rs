use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::errors::{ColumnError, SketchError};
use crate::engine::sketch::{DEFAULT_PRECISION, MAX_PRECISION, MIN_PRECISION};
use crate::engine::types::{Value, ValueType};
use crate::shared::config::Settings;

pub const DEFAULT_PAGE_SIZE_HINT: usize = 256 * 1024;
pub const DEFAULT_ZSTD_LEVEL: i32 = 3;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionKind {
    None = 0,
    #[default]
    Lz4 = 1,
    Zstd = 2,
}

impl CompressionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompressionKind::None => "none",
            CompressionKind::Lz4 => "lz4",
            CompressionKind::Zstd => "zstd",
        }
    }
}

impl fmt::Display for CompressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompressionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(CompressionKind::None),
            "lz4" => Ok(CompressionKind::Lz4),
            "zstd" => Ok(CompressionKind::Zstd),
            other => Err(format!("unknown compression: {other}")),
        }
    }
}

/// How present values are laid out in a page payload.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingKind {
    #[default]
    Plain = 0,
    /// Zig-zag varint differences between consecutive values. Integer columns only.
    Delta = 1,
}

impl EncodingKind {
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(EncodingKind::Plain),
            1 => Some(EncodingKind::Delta),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EncodingKind::Plain => "plain",
            EncodingKind::Delta => "delta",
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(EncodingKind::Plain),
            "delta" => Ok(EncodingKind::Delta),
            other => Err(format!("unknown encoding: {other}")),
        }
    }
}

/// Which values count as "zero" and are therefore kept out of statistics and
/// the values count. Empty byte arrays are zero in every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroValueMode {
    #[default]
    AllTypes,
    ByteArrayOnly,
}

impl ZeroValueMode {
    pub fn is_zero(&self, value: &Value) -> bool {
        match self {
            ZeroValueMode::AllTypes => value.is_zero_payload(),
            ZeroValueMode::ByteArrayOnly => matches!(value, Value::ByteArray(b) if b.is_empty()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsOptions {
    pub store_range_stats: bool,
    pub store_cardinality_stats: bool,
    pub sketch_precision: u8,
}

impl Default for StatisticsOptions {
    fn default() -> Self {
        Self {
            store_range_stats: false,
            store_cardinality_stats: false,
            sketch_precision: DEFAULT_PRECISION,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuilderOptions {
    /// Target uncompressed bytes per page. Zero cuts a page after every row.
    pub page_size_hint: usize,
    pub value_type: ValueType,
    pub compression: CompressionKind,
    /// Only used by zstd.
    pub compression_level: i32,
    pub encoding: EncodingKind,
    pub statistics: StatisticsOptions,
    pub zero_values: ZeroValueMode,
}

impl BuilderOptions {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            page_size_hint: DEFAULT_PAGE_SIZE_HINT,
            value_type,
            compression: CompressionKind::default(),
            compression_level: DEFAULT_ZSTD_LEVEL,
            encoding: EncodingKind::default(),
            statistics: StatisticsOptions::default(),
            zero_values: ZeroValueMode::default(),
        }
    }

    pub fn from_settings(value_type: ValueType, settings: &Settings) -> Self {
        let column = &settings.column;
        Self {
            page_size_hint: column.page_size_hint,
            value_type,
            compression: column.compression,
            compression_level: column.compression_level,
            encoding: column.encoding,
            statistics: StatisticsOptions {
                store_range_stats: column.store_range_stats,
                store_cardinality_stats: column.store_cardinality_stats,
                sketch_precision: settings.sketch.precision,
            },
            zero_values: column.zero_values,
        }
    }

    pub fn validate(&self) -> Result<(), ColumnError> {
        if self.encoding == EncodingKind::Delta && !self.value_type.is_integer() {
            return Err(ColumnError::InvalidOptions(format!(
                "delta encoding requires an integer column, got {}",
                self.value_type
            )));
        }
        if self.compression == CompressionKind::Zstd
            && !zstd::compression_level_range().contains(&self.compression_level)
        {
            return Err(ColumnError::InvalidOptions(format!(
                "zstd level {} is out of range",
                self.compression_level
            )));
        }
        let p = self.statistics.sketch_precision;
        if self.statistics.store_cardinality_stats && !(MIN_PRECISION..=MAX_PRECISION).contains(&p) {
            return Err(SketchError::InvalidPrecision(p).into());
        }
        Ok(())
    }
}
