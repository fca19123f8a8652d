use crate::engine::core::column::{
    BuilderOptions, Column, ColumnBuilder, CompressionKind, EncodingKind, StatisticsOptions,
    ZeroValueMode,
};
use crate::engine::types::{Value, ValueType};

pub struct ColumnFactory {
    name: String,
    options: BuilderOptions,
    rows: Vec<(usize, Value)>,
}

impl ColumnFactory {
    pub fn new() -> Self {
        let mut options = BuilderOptions::new(ValueType::ByteArray);
        options.statistics = StatisticsOptions {
            store_range_stats: true,
            store_cardinality_stats: true,
            sketch_precision: 14,
        };
        Self {
            name: "message".to_string(),
            options,
            rows: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_type(mut self, ty: ValueType) -> Self {
        self.options.value_type = ty;
        self
    }

    pub fn with_page_size_hint(mut self, hint: usize) -> Self {
        self.options.page_size_hint = hint;
        self
    }

    pub fn with_compression(mut self, kind: CompressionKind) -> Self {
        self.options.compression = kind;
        self
    }

    pub fn with_encoding(mut self, kind: EncodingKind) -> Self {
        self.options.encoding = kind;
        self
    }

    pub fn with_statistics(mut self, range: bool, cardinality: bool) -> Self {
        self.options.statistics.store_range_stats = range;
        self.options.statistics.store_cardinality_stats = cardinality;
        self
    }

    pub fn with_zero_values(mut self, mode: ZeroValueMode) -> Self {
        self.options.zero_values = mode;
        self
    }

    /// Values for consecutive rows following the rows added so far.
    pub fn with_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut row = self.rows.last().map_or(0, |(r, _)| r + 1);
        for v in values {
            self.rows.push((row, v.into()));
            row += 1;
        }
        self
    }

    pub fn with_row(mut self, row: usize, value: impl Into<Value>) -> Self {
        self.rows.push((row, value.into()));
        self
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn builder(&self) -> ColumnBuilder {
        ColumnBuilder::new(self.name.clone(), self.options.clone()).expect("column builder")
    }

    pub fn create(self) -> Column {
        let mut builder = self.builder();
        for (row, value) in self.rows {
            builder.append(row, value).expect("append");
        }
        builder.flush().expect("flush")
    }
}
