use crate::engine::types::Value;
use crate::test_helpers::factory::Factory;

#[test]
fn byte_arrays_are_distinct_and_prefixed() {
    let values = Factory::values().with_prefix("k").byte_arrays(3);
    assert_eq!(
        values,
        vec![Value::from("k-0"), Value::from("k-1"), Value::from("k-2")]
    );
}

#[test]
fn padded_keeps_empty_letters_empty() {
    let values = Factory::values().padded(&["", "ab"], 3);
    assert_eq!(values, vec![Value::from(""), Value::from("ababab")]);
}

#[test]
fn seeded_generators_are_deterministic() {
    let a = Factory::values().with_seed(9).random_int64(20);
    let b = Factory::values().with_seed(9).random_int64(20);
    assert_eq!(a, b);

    let mixed = Factory::values().sparse_uint64(200);
    assert!(mixed.iter().any(Value::is_null));
    assert!(mixed.iter().any(|v| *v == Value::Uint64(0)));
    assert!(mixed.iter().any(|v| matches!(v, Value::Uint64(n) if *n > 0)));
}
