pub mod engine;
pub mod logging;
pub mod shared;

pub use engine::core::column::{
    BuilderOptions, Column, ColumnBuilder, ColumnInfo, ColumnReader, CompressionKind,
    EncodingKind, Page, PageInfo, StatisticsOptions, ZeroValueMode,
};
pub use engine::core::stats::Statistics;
pub use engine::errors::{ColumnError, ColumnFileError, SketchError, ValueError};
pub use engine::sketch::Sketch;
pub use engine::types::{Value, ValueType};

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
pub mod test_helpers;
