use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::errors::SketchError;
use crate::engine::sketch::{MAX_PRECISION, MIN_PRECISION, Sketch};

fn keys(prefix: &str, n: usize) -> Vec<Vec<u8>> {
    (0..n).map(|i| format!("{prefix}-{i}").into_bytes()).collect()
}

fn sketch_of(p: u8, sparse: bool, items: &[Vec<u8>]) -> Sketch {
    let mut sk = Sketch::with_mode(p, sparse).expect("sketch");
    for item in items {
        sk.insert(item);
    }
    sk
}

fn within(actual: u64, expected: u64, tolerance: f64) -> bool {
    let diff = (actual as f64 - expected as f64).abs();
    diff <= expected as f64 * tolerance
}

#[test]
fn small_counts_are_exact_while_sparse() {
    for n in [0usize, 1, 2, 7, 42, 100] {
        let mut sk = sketch_of(14, true, &keys("exact", n));
        assert!(sk.is_sparse());
        assert_eq!(sk.estimate(), n as u64, "n={n}");
    }
}

#[test]
fn duplicates_do_not_change_estimate() {
    let mut sk = Sketch::default();
    for _ in 0..50 {
        sk.insert(b"a");
        sk.insert(b"b");
        sk.insert(b"c");
    }
    assert_eq!(sk.estimate(), 3);
}

#[test]
fn precision_out_of_range_is_rejected() {
    assert_eq!(Sketch::new(3).unwrap_err(), SketchError::InvalidPrecision(3));
    assert_eq!(Sketch::new_dense(19).unwrap_err(), SketchError::InvalidPrecision(19));
    assert!(Sketch::new(4).is_ok());
    assert!(Sketch::new(18).is_ok());
}

#[test]
fn default_is_sparse_precision_14() {
    let sk = Sketch::default();
    assert!(sk.is_sparse());
    assert_eq!(sk.precision(), 14);
    assert!(sk.registers().is_none());
}

#[test]
fn sparse_promotes_once_list_outgrows_registers() {
    let mut sk = sketch_of(10, true, &keys("promote", 5_000));
    assert!(!sk.is_sparse());
    assert_eq!(sk.registers().map(<[u8]>::len), Some(1024));
    let est = sk.estimate();
    assert!(within(est, 5_000, 0.15), "estimate {est}");
}

#[test]
fn dense_estimate_is_close_for_large_cardinality() {
    let items = keys("dense", 20_000);
    let mut dense = sketch_of(14, false, &items);
    let est = dense.estimate();
    assert!(within(est, 20_000, 0.05), "estimate {est}");

    let mut promoted = sketch_of(14, true, &items);
    assert!(within(promoted.estimate(), 20_000, 0.05));
}

#[test]
fn sparse_and_dense_insertion_produce_same_registers() {
    let mut rng = StdRng::seed_from_u64(7);
    let hashes: Vec<u64> = (0..3_000).map(|_| rng.r#gen::<u64>()).collect();

    let mut sparse = Sketch::new(8).unwrap();
    let mut dense = Sketch::new_dense(8).unwrap();
    for &h in &hashes {
        sparse.insert_hash(h);
        dense.insert_hash(h);
    }
    assert!(!sparse.is_sparse());
    assert_eq!(sparse.registers(), dense.registers());
}

fn assert_merge_matches_union(left_sparse: bool, right_sparse: bool, left_n: usize, right_n: usize) {
    let a = keys("left", left_n);
    let mut b = keys("right", right_n);
    // Overlap so the union is smaller than the sum.
    b.extend(a.iter().take(left_n / 2).cloned());

    let left = sketch_of(12, left_sparse, &a);
    let right = sketch_of(12, right_sparse, &b);

    let mut ab = left.clone();
    ab.merge(&right).expect("merge");
    let mut ba = right.clone();
    ba.merge(&left).expect("merge");

    let union: Vec<Vec<u8>> = a.iter().chain(b.iter()).cloned().collect();
    let mut expected = sketch_of(12, left_sparse && right_sparse, &union);

    let est = expected.estimate();
    assert_eq!(ab.estimate(), est);
    assert_eq!(ba.estimate(), est);
    assert_eq!(ab.is_sparse(), ba.is_sparse());
}

#[test]
fn merge_sparse_with_sparse() {
    assert_merge_matches_union(true, true, 60, 40);
}

#[test]
fn merge_sparse_with_dense() {
    assert_merge_matches_union(true, false, 300, 2_000);
}

#[test]
fn merge_dense_with_dense() {
    assert_merge_matches_union(false, false, 3_000, 5_000);
}

#[test]
fn merge_of_large_sparse_sketches_promotes() {
    let mut left = sketch_of(8, true, &keys("l", 200));
    let right = sketch_of(8, true, &keys("r", 200));
    assert!(left.is_sparse() && right.is_sparse());
    left.merge(&right).unwrap();
    assert!(!left.is_sparse());
}

#[test]
fn merge_rejects_precision_mismatch() {
    let mut a = Sketch::new(10).unwrap();
    let b = Sketch::new(12).unwrap();
    assert_eq!(
        a.merge(&b),
        Err(SketchError::PrecisionMismatch { left: 10, right: 12 })
    );
}

#[test]
fn clone_is_independent() {
    let mut original = sketch_of(14, true, &keys("c", 10));
    let mut copy = original.clone();
    copy.insert(b"only-in-copy");
    assert_eq!(original.estimate(), 10);
    assert_eq!(copy.estimate(), 11);

    let mut dense = sketch_of(10, false, &keys("d", 100));
    let before = dense.registers().unwrap().to_vec();
    let mut dense_copy = dense.clone();
    for item in keys("more", 1_000) {
        dense_copy.insert(&item);
    }
    assert_eq!(dense.registers().unwrap(), before.as_slice());
    assert!(dense_copy.estimate() > dense.estimate());
}

#[test]
fn dense_estimate_is_bias_corrected_at_every_precision() {
    for p in MIN_PRECISION..=MAX_PRECISION {
        let mut empty = Sketch::new_dense(p).unwrap();
        assert_eq!(empty.estimate(), 0, "p={p}");
    }
    for p in [10u8, 12] {
        let mut sk = sketch_of(p, false, &keys("beta", 10_000));
        let est = sk.estimate();
        assert!(within(est, 10_000, 0.10), "p={p} estimate {est}");
    }
}
