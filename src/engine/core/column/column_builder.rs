use tracing::{debug, info};

use super::column::{Column, ColumnInfo, Page};
use super::compression::{CompressionCodec, codec_for};
use super::options::BuilderOptions;
use super::page_builder::{PageBuilder, RowKind};
use crate::engine::core::stats::StatsCollector;
use crate::engine::errors::ColumnError;
use crate::engine::types::Value;

/// Accumulates row-indexed values into pages and produces a [`Column`].
///
/// Rows must arrive in strictly increasing order. Skipped rows are stored as
/// nulls. Pages are cut when the next row would push the uncompressed size
/// estimate past the page size hint.
pub struct ColumnBuilder {
    name: String,
    options: BuilderOptions,
    codec: Box<dyn CompressionCodec>,
    page: PageBuilder,
    pages: Vec<Page>,
    stats: StatsCollector,
    next_row: usize,
    values_count: u64,
    uncompressed_size: u64,
    compressed_size: u64,
    flushed: bool,
}

impl ColumnBuilder {
    pub fn new(name: impl Into<String>, options: BuilderOptions) -> Result<Self, ColumnError> {
        options.validate()?;
        let codec = codec_for(options.compression, options.compression_level);
        let page = PageBuilder::new(options.value_type, options.encoding, &options.statistics)?;
        let stats = StatsCollector::new(&options.statistics)?;
        Ok(Self {
            name: name.into(),
            options,
            codec,
            page,
            pages: Vec::new(),
            stats,
            next_row: 0,
            values_count: 0,
            uncompressed_size: 0,
            compressed_size: 0,
            flushed: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Row index the next append must reach at least.
    pub fn next_row(&self) -> usize {
        self.next_row
    }

    pub fn append(&mut self, row: usize, value: Value) -> Result<(), ColumnError> {
        if self.flushed {
            return Err(ColumnError::AlreadyFlushed);
        }
        if row < self.next_row {
            return Err(ColumnError::OutOfOrder {
                row,
                next: self.next_row,
            });
        }
        if let Some(actual) = value.value_type() {
            if actual != self.options.value_type {
                return Err(ColumnError::TypeMismatch {
                    expected: self.options.value_type,
                    actual,
                });
            }
        }

        while self.next_row < row {
            self.push_row(&Value::Null)?;
        }
        self.push_row(&value)
    }

    fn push_row(&mut self, value: &Value) -> Result<(), ColumnError> {
        let kind = if value.is_null() {
            RowKind::Null
        } else if self.options.zero_values.is_zero(value) {
            RowKind::Zero
        } else {
            RowKind::Present
        };
        let hint = self.options.page_size_hint;

        if !self.page.try_push(value, kind, hint) {
            self.cut_page()?;
            if !self.page.try_push(value, kind, hint) {
                panic!(
                    "column {}: fresh page rejected row {}",
                    self.name, self.next_row
                );
            }
        }
        if kind == RowKind::Present {
            self.values_count += 1;
        }
        self.next_row += 1;
        Ok(())
    }

    fn cut_page(&mut self) -> Result<(), ColumnError> {
        let fresh = PageBuilder::new(
            self.options.value_type,
            self.options.encoding,
            &self.options.statistics,
        )?;
        let page = self.page.finish(self.codec.as_ref())?;
        self.stats.absorb(self.page.stats())?;
        self.page = fresh;

        self.uncompressed_size += page.info.uncompressed_size;
        self.compressed_size += page.info.compressed_size;
        debug!(
            target: "logcol::builder",
            column = %self.name,
            page = self.pages.len(),
            rows = page.info.rows_count,
            values = page.info.values_count,
            compressed = page.info.compressed_size,
            "Cut page"
        );
        self.pages.push(page);
        Ok(())
    }

    /// Cuts the pending page and returns the finished column. A column that
    /// never received a row still gets one empty page.
    pub fn flush(&mut self) -> Result<Column, ColumnError> {
        if self.flushed {
            return Err(ColumnError::AlreadyFlushed);
        }
        if !self.page.is_empty() || self.pages.is_empty() {
            self.cut_page()?;
        }
        self.flushed = true;

        let info = ColumnInfo {
            name: self.name.clone(),
            value_type: self.options.value_type,
            encoding: self.options.encoding,
            compression: self.options.compression,
            rows_count: self.next_row as u64,
            values_count: self.values_count,
            uncompressed_size: self.uncompressed_size,
            compressed_size: self.compressed_size,
            statistics: self.stats.statistics(),
        };
        info!(
            target: "logcol::builder",
            column = %info.name,
            pages = self.pages.len(),
            rows = info.rows_count,
            values = info.values_count,
            compressed = info.compressed_size,
            "Flushed column"
        );

        Ok(Column {
            info,
            pages: std::mem::take(&mut self.pages),
        })
    }
}
