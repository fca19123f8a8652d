use crate::engine::core::column::CompressionKind;
use crate::engine::types::{Value, ValueType};
use crate::test_helpers::factory::Factory;

#[test]
fn creates_flushed_column_with_defaults() {
    let column = Factory::column().with_values(["a", "b"]).create();
    assert_eq!(column.info.name, "message");
    assert_eq!(column.info.value_type, ValueType::ByteArray);
    assert_eq!(column.info.compression, CompressionKind::Lz4);
    assert_eq!(column.info.rows_count, 2);
    assert!(column.info.statistics.is_some());
}

#[test]
fn with_values_continues_after_explicit_rows() {
    let column = Factory::column()
        .with_type(ValueType::Int64)
        .with_row(3, 7i64)
        .with_values([8i64, 9])
        .create();
    assert_eq!(column.info.rows_count, 6);
    let values = column.reader().read_all().unwrap();
    assert_eq!(values[..3], [Value::Null, Value::Null, Value::Null]);
    assert_eq!(values[5], Value::Int64(9));
}
