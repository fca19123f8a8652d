use std::hash::Hasher;
use twox_hash::XxHash64;

/// Seed for every hash that ends up persisted inside a sketch.
pub const SKETCH_HASH_SEED: u64 = 1337;

/// Deterministic 64-bit hash of a byte payload.
/// Sketch registers are derived from this value, so changing it invalidates every
/// serialized sketch.
pub fn stable_hash64(bytes: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(SKETCH_HASH_SEED);
    hasher.write(bytes);
    hasher.finish()
}
