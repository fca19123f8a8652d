use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engine::types::Value;

pub struct ValueFactory {
    seed: u64,
    prefix: String,
}

impl ValueFactory {
    pub fn new() -> Self {
        Self {
            seed: 42,
            prefix: "value".to_string(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    /// Distinct byte arrays `<prefix>-0`, `<prefix>-1`, ...
    pub fn byte_arrays(&self, count: usize) -> Vec<Value> {
        (0..count)
            .map(|i| Value::from(format!("{}-{i}", self.prefix).as_str()))
            .collect()
    }

    pub fn strings(&self, items: &[&str]) -> Vec<Value> {
        items.iter().map(|s| Value::from(*s)).collect()
    }

    /// Each letter repeated `width` times; `""` stays empty.
    pub fn padded(&self, letters: &[&str], width: usize) -> Vec<Value> {
        letters
            .iter()
            .map(|l| Value::from(l.repeat(width).as_str()))
            .collect()
    }

    pub fn random_int64(&self, count: usize) -> Vec<Value> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..count).map(|_| Value::Int64(rng.r#gen::<i64>())).collect()
    }

    /// A quarter nulls, a quarter zeros, the rest small positive integers.
    pub fn sparse_uint64(&self, count: usize) -> Vec<Value> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        (0..count)
            .map(|_| match rng.gen_range(0..4) {
                0 => Value::Null,
                1 => Value::Uint64(0),
                _ => Value::Uint64(rng.gen_range(1..10_000)),
            })
            .collect()
    }
}
