use crate::engine::core::column::options::StatisticsOptions;
use crate::engine::core::stats::{Statistics, StatsCollector};
use crate::engine::errors::SketchError;
use crate::engine::types::Value;

fn options(range: bool, cardinality: bool) -> StatisticsOptions {
    StatisticsOptions {
        store_range_stats: range,
        store_cardinality_stats: cardinality,
        sketch_precision: 14,
    }
}

fn collect(opts: StatisticsOptions, values: &[Value]) -> StatsCollector {
    let mut c = StatsCollector::new(&opts).expect("collector");
    for v in values {
        c.observe(v);
    }
    c
}

#[test]
fn disabled_collector_yields_none() {
    let mut c = collect(options(false, false), &[Value::Int64(1)]);
    assert!(!c.is_enabled());
    assert_eq!(c.statistics(), None);
}

#[test]
fn range_tracks_min_and_max() {
    let values: Vec<Value> = ["m", "b", "z", "c"].into_iter().map(Value::from).collect();
    let stats = collect(options(true, false), &values).statistics().unwrap();
    assert_eq!(stats.min().unwrap(), Some(Value::from("b")));
    assert_eq!(stats.max().unwrap(), Some(Value::from("z")));
    assert_eq!(stats.cardinality_count, 0);
}

#[test]
fn first_value_seeds_both_bounds() {
    let stats = collect(options(true, false), &[Value::Float64(2.5)])
        .statistics()
        .unwrap();
    assert_eq!(stats.min().unwrap(), Some(Value::Float64(2.5)));
    assert_eq!(stats.max().unwrap(), Some(Value::Float64(2.5)));
}

#[test]
fn nulls_are_ignored() {
    let stats = collect(
        options(true, true),
        &[Value::Null, Value::Int64(4), Value::Null, Value::Int64(-2)],
    )
    .statistics()
    .unwrap();
    assert_eq!(stats.min().unwrap(), Some(Value::Int64(-2)));
    assert_eq!(stats.max().unwrap(), Some(Value::Int64(4)));
    assert_eq!(stats.cardinality_count, 2);
}

#[test]
fn cardinality_ignores_duplicates() {
    let values: Vec<Value> = ["a", "b", "b", "b", "c"].into_iter().map(Value::from).collect();
    let stats = collect(options(false, true), &values).statistics().unwrap();
    assert_eq!(stats.cardinality_count, 3);
    assert_eq!(stats.min_value, None);
}

#[test]
fn absorb_widens_range_and_merges_sketch() {
    let mut column = StatsCollector::new(&options(true, true)).unwrap();
    let page_a = collect(options(true, true), &[Value::Uint64(10), Value::Uint64(20)]);
    let page_b = collect(options(true, true), &[Value::Uint64(5), Value::Uint64(20)]);

    column.absorb(&page_a).unwrap();
    column.absorb(&page_b).unwrap();

    let stats = column.statistics().unwrap();
    assert_eq!(stats.min().unwrap(), Some(Value::Uint64(5)));
    assert_eq!(stats.max().unwrap(), Some(Value::Uint64(20)));
    assert_eq!(stats.cardinality_count, 3);
}

#[test]
fn absorb_reports_precision_mismatch() {
    let mut column = StatsCollector::new(&options(false, true)).unwrap();
    let mut other_opts = options(false, true);
    other_opts.sketch_precision = 10;
    let page = collect(other_opts, &[Value::Bool(true)]);
    assert_eq!(
        column.absorb(&page),
        Err(SketchError::PrecisionMismatch { left: 14, right: 10 })
    );
}

#[test]
fn invalid_precision_fails_construction() {
    let mut opts = options(false, true);
    opts.sketch_precision = 2;
    assert_eq!(
        StatsCollector::new(&opts).unwrap_err(),
        SketchError::InvalidPrecision(2)
    );
}

#[test]
fn empty_collector_has_no_bounds() {
    let stats = collect(options(true, true), &[]).statistics().unwrap();
    assert_eq!(stats, Statistics::default());
}
