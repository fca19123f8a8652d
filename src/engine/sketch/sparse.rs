//! Hash encodings for the sparse representation.
//!
//! Sparse entries are recorded at a fixed precision of [`SPARSE_PRECISION`]
//! bits so that they can later be folded down to any dense precision `p`.
//! An entry is a `u32`:
//!
//! * `idx << 1` when the bits between `p` and 25 of the hash are not all zero;
//!   the rank at precision `p` can be recovered from `idx` itself.
//! * `idx << 7 | rank << 1 | 1` otherwise, carrying the rank of the bits below
//!   the 25-bit index explicitly.

pub const SPARSE_PRECISION: u8 = 25;
pub const SPARSE_SLOTS: u32 = 1 << SPARSE_PRECISION;

#[inline]
fn bextr(v: u64, start: u8, len: u8) -> u64 {
    (v >> start) & ((1u64 << len) - 1)
}

#[inline]
fn bextr32(v: u32, start: u8, len: u8) -> u32 {
    (v >> start) & ((1u32 << len) - 1)
}

/// Register index and rank of `x` for a dense sketch of precision `p`.
#[inline]
pub fn register_pos(x: u64, p: u8) -> (u32, u8) {
    let idx = (x >> (64 - p)) as u32;
    let w = (x << p) | (1u64 << (p - 1));
    (idx, w.leading_zeros() as u8 + 1)
}

pub fn encode_hash(x: u64, p: u8) -> u32 {
    let pp = SPARSE_PRECISION;
    let idx = bextr(x, 64 - pp, pp) as u32;
    if bextr(x, 64 - pp, pp - p) == 0 {
        let rest = (bextr(x, 0, 64 - pp) << pp) | ((1u64 << pp) - 1);
        let zeros = rest.leading_zeros() + 1;
        return (idx << 7) | (zeros << 1) | 1;
    }
    idx << 1
}

/// Folds a sparse entry down to `(register index, rank)` at precision `p`.
/// Agrees with [`register_pos`] on the original hash.
pub fn decode_hash(k: u32, p: u8) -> (u32, u8) {
    let pp = SPARSE_PRECISION;
    let rank = if k & 1 == 1 {
        bextr32(k, 1, 6) as u8 + pp - p
    } else {
        (k << (32 - pp + p - 1)).leading_zeros() as u8 + 1
    };
    (register_index(k, p), rank)
}

fn register_index(k: u32, p: u8) -> u32 {
    if k & 1 == 1 {
        bextr32(k, 32 - p, p)
    } else {
        bextr32(k, SPARSE_PRECISION - p + 1, p)
    }
}

/// The 25-bit slot an entry occupies, independent of its rank.
#[inline]
pub fn sparse_slot(k: u32) -> u32 {
    if k & 1 == 1 { k >> 7 } else { k >> 1 }
}
