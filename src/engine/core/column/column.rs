use serde::{Deserialize, Serialize};

use super::column_reader::ColumnReader;
use super::options::{CompressionKind, EncodingKind};
use crate::engine::core::stats::Statistics;
use crate::engine::types::ValueType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    pub value_type: ValueType,
    pub encoding: EncodingKind,
    pub compression: CompressionKind,
    /// Row slots, nulls included.
    pub rows_count: u64,
    /// Rows that are neither null nor zero.
    pub values_count: u64,
    pub uncompressed_size: u64,
    pub compressed_size: u64,
    pub statistics: Option<Statistics>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub rows_count: u64,
    pub values_count: u64,
    pub uncompressed_size: u64,
    pub compressed_size: u64,
    /// CRC32 of the compressed payload.
    pub crc32: u32,
    pub encoding: EncodingKind,
    pub statistics: Option<Statistics>,
}

/// A compressed, self-contained run of consecutive rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub data: Vec<u8>,
    pub info: PageInfo,
}

/// Immutable output of a flushed column builder. Any number of readers may
/// share it across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub info: ColumnInfo,
    pub pages: Vec<Page>,
}

impl Column {
    pub fn reader(&self) -> ColumnReader<'_> {
        ColumnReader::new(self)
    }
}
