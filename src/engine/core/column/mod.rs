pub mod column;
pub mod column_builder;
pub mod column_file;
pub mod column_reader;
pub mod compression;
pub mod encoding;
pub mod format;
pub mod options;
pub mod page_builder;
pub mod reader;

pub use column::{Column, ColumnInfo, Page, PageInfo};
pub use column_builder::ColumnBuilder;
pub use column_file::{
    decode_column, read_column, read_column_from_path, write_column, write_column_to_path,
};
pub use column_reader::ColumnReader;
pub use options::{BuilderOptions, CompressionKind, EncodingKind, StatisticsOptions, ZeroValueMode};

#[cfg(test)]
mod column_reader_test;
