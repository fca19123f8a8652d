use std::thread;

use crate::engine::core::column::{Column, ColumnReader};
use crate::engine::errors::ColumnError;
use crate::engine::types::{Value, ValueType};
use crate::test_helpers::factory::Factory;

fn sample_column() -> (Column, Vec<Value>) {
    let mut values = Factory::values().byte_arrays(40);
    values[3] = Value::Null;
    values[17] = Value::from("");
    let column = Factory::column()
        .with_page_size_hint(48)
        .with_values(values.clone())
        .create();
    (column, values)
}

#[test]
fn read_fills_at_most_one_page_per_call() {
    let (column, values) = sample_column();
    let first_page_rows = column.pages[0].info.rows_count as usize;
    assert!(column.pages.len() > 2);

    let mut reader = ColumnReader::new(&column);
    let mut buf = vec![Value::Null; 1_000];
    let n = reader.read(&mut buf).unwrap();
    assert_eq!(n, first_page_rows);
    assert_eq!(&buf[..n], &values[..n]);
}

#[test]
fn small_buffers_resume_where_they_left_off() {
    let (column, values) = sample_column();
    let mut reader = column.reader();
    let mut out = Vec::new();
    let mut buf = vec![Value::Null; 3];
    loop {
        match reader.read(&mut buf) {
            Ok(n) => out.extend_from_slice(&buf[..n]),
            Err(ColumnError::EndOfData) => break,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }
    assert_eq!(out, values);
}

#[test]
fn end_of_data_is_sticky() {
    let (column, _) = sample_column();
    let mut reader = column.reader();
    reader.read_all().unwrap();
    let mut buf = vec![Value::Null; 2];
    assert!(matches!(reader.read(&mut buf), Err(ColumnError::EndOfData)));
    assert!(matches!(reader.read(&mut buf), Err(ColumnError::EndOfData)));
}

#[test]
fn empty_buffer_reads_nothing() {
    let (column, values) = sample_column();
    let mut reader = column.reader();
    assert_eq!(reader.read(&mut []).unwrap(), 0);
    // Not an end signal: the data is still there.
    assert_eq!(reader.read_all().unwrap(), values);
    assert_eq!(reader.read(&mut []).unwrap(), 0);
}

#[test]
fn iterator_yields_every_row() {
    let (column, values) = sample_column();
    let collected: Result<Vec<Value>, ColumnError> = column.reader().collect();
    assert_eq!(collected.unwrap(), values);
}

#[test]
fn corrupt_page_reports_its_index() {
    let (mut column, values) = sample_column();
    let first_rows = column.pages[0].info.rows_count as usize;
    let last = column.pages[1].data.len() - 1;
    column.pages[1].data[last] ^= 0xff;

    let mut reader = column.reader();
    let mut buf = vec![Value::Null; 1_000];
    let n = reader.read(&mut buf).unwrap();
    assert_eq!(&buf[..n], &values[..first_rows]);

    match reader.read(&mut buf) {
        Err(ColumnError::CorruptPage { page, reason }) => {
            assert_eq!(page, 1);
            assert!(reason.contains("checksum"), "{reason}");
        }
        other => panic!("expected corrupt page, got {other:?}"),
    }
}

#[test]
fn iterator_stops_after_first_error() {
    let (mut column, _) = sample_column();
    column.pages[0].info.crc32 ^= 1;
    let items: Vec<_> = column.reader().collect();
    assert_eq!(items.len(), 1);
    assert!(matches!(items[0], Err(ColumnError::CorruptPage { page: 0, .. })));
}

#[test]
fn metadata_disagreement_is_corruption() {
    let (mut column, _) = sample_column();
    column.pages[0].info.values_count += 1;
    assert!(matches!(
        column.reader().read_all(),
        Err(ColumnError::CorruptPage { page: 0, .. })
    ));

    let (mut column, _) = sample_column();
    column.info.value_type = ValueType::Int64;
    assert!(matches!(
        column.reader().read_all(),
        Err(ColumnError::CorruptPage { page: 0, .. })
    ));
}

#[test]
fn concurrent_readers_agree() {
    let values = Factory::values().random_int64(2_000);
    let column = Factory::column()
        .with_type(ValueType::Int64)
        .with_page_size_hint(256)
        .with_values(values.clone())
        .create();

    thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| column.reader().read_all().unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), values);
        }
    });
}
