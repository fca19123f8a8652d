use super::column::{Page, PageInfo};
use super::compression::CompressionCodec;
use super::encoding::{BitmapBuilder, encoding_for};
use super::format::PageHeader;
use super::options::{EncodingKind, StatisticsOptions};
use crate::engine::core::stats::StatsCollector;
use crate::engine::errors::{ColumnError, SketchError};
use crate::engine::types::{Value, ValueType};

/// How a row is stored in a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Null,
    Zero,
    Present,
}

/// Rows of the page currently being filled.
pub struct PageBuilder {
    value_type: ValueType,
    encoding: EncodingKind,
    nulls: BitmapBuilder,
    zeros: BitmapBuilder,
    values: Vec<Value>,
    estimate: usize,
    stats: StatsCollector,
}

impl PageBuilder {
    pub fn new(
        value_type: ValueType,
        encoding: EncodingKind,
        statistics: &StatisticsOptions,
    ) -> Result<Self, SketchError> {
        Ok(Self {
            value_type,
            encoding,
            nulls: BitmapBuilder::new(),
            zeros: BitmapBuilder::new(),
            values: Vec::new(),
            estimate: 0,
            stats: StatsCollector::new(statistics)?,
        })
    }

    pub fn rows(&self) -> usize {
        self.nulls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nulls.is_empty()
    }

    pub fn values(&self) -> usize {
        self.values.len()
    }

    /// Uncompressed size estimate of the rows appended so far.
    pub fn estimate(&self) -> usize {
        self.estimate
    }

    /// Bytes a row adds to the estimate. Nulls and zeros still take a slot.
    pub fn cost(value: &Value, kind: RowKind) -> usize {
        match kind {
            RowKind::Present => value.payload_size().max(1),
            RowKind::Null | RowKind::Zero => 1,
        }
    }

    /// Appends the row unless it would push a non-empty page past `hint`.
    /// An empty page accepts any row.
    pub fn try_push(&mut self, value: &Value, kind: RowKind, hint: usize) -> bool {
        let cost = Self::cost(value, kind);
        if !self.is_empty() && self.estimate + cost > hint {
            return false;
        }
        self.estimate += cost;
        self.nulls.push(kind == RowKind::Null);
        self.zeros.push(kind == RowKind::Zero);
        if kind == RowKind::Present {
            self.stats.observe(value);
            self.values.push(value.clone());
        }
        true
    }

    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    /// Serializes and compresses the buffered rows. The rows stay buffered, so
    /// a failed attempt loses nothing.
    pub fn finish(&mut self, codec: &dyn CompressionCodec) -> Result<Page, ColumnError> {
        let rows = self.rows();
        let has_nulls = self.nulls.any();
        let has_zeros = self.zeros.any();

        let mut aux_len = 0usize;
        if has_nulls {
            aux_len += self.nulls.as_bytes().len();
        }
        if has_zeros {
            aux_len += self.zeros.as_bytes().len();
        }

        let mut buf = Vec::with_capacity(PageHeader::LEN + aux_len + self.estimate);
        let header = PageHeader::new(
            self.value_type,
            self.encoding,
            has_nulls,
            has_zeros,
            rows as u32,
            aux_len as u32,
        );
        header.write_to(&mut buf);
        if has_nulls {
            buf.extend_from_slice(self.nulls.as_bytes());
        }
        if has_zeros {
            buf.extend_from_slice(self.zeros.as_bytes());
        }
        encoding_for(self.encoding).encode(&self.values, &mut buf);

        let data = codec.compress(&buf)?;
        let info = PageInfo {
            rows_count: rows as u64,
            values_count: self.values.len() as u64,
            uncompressed_size: buf.len() as u64,
            compressed_size: data.len() as u64,
            crc32: crc32fast::hash(&data),
            encoding: self.encoding,
            statistics: self.stats.statistics(),
        };
        Ok(Page { data, info })
    }
}
