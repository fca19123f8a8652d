use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use super::compressed_list::CompressedList;
use super::estimator::{dense_estimate, sparse_estimate};
use super::sparse::{decode_hash, encode_hash, register_pos, sparse_slot};
use crate::engine::errors::SketchError;
use crate::shared::hash::stable_hash64;

pub const MIN_PRECISION: u8 = 4;
pub const MAX_PRECISION: u8 = 18;
pub const DEFAULT_PRECISION: u8 = 14;

/// HyperLogLog cardinality sketch.
///
/// Starts sparse: a small unsorted set of pending entries plus a sorted
/// compressed list, both at 25-bit precision. Once the list outgrows the
/// register count the sketch is promoted to `2^p` one-byte registers. The
/// promotion never reverses.
#[derive(Debug, Clone)]
pub struct Sketch {
    p: u8,
    m: u32,
    state: State,
}

#[derive(Debug, Clone)]
pub(super) enum State {
    Sparse(SparseState),
    Dense(Vec<u8>),
}

#[derive(Debug, Clone, Default)]
pub(super) struct SparseState {
    pub(super) tmp: FxHashSet<u32>,
    pub(super) list: CompressedList,
}

impl Sketch {
    /// Sparse sketch with `2^precision` registers once promoted.
    pub fn new(precision: u8) -> Result<Self, SketchError> {
        Self::with_mode(precision, true)
    }

    /// Dense from the start; skips the sparse phase entirely.
    pub fn new_dense(precision: u8) -> Result<Self, SketchError> {
        Self::with_mode(precision, false)
    }

    pub fn with_mode(precision: u8, sparse: bool) -> Result<Self, SketchError> {
        check_precision(precision)?;
        let m = 1u32 << precision;
        let state = if sparse {
            State::Sparse(SparseState::default())
        } else {
            State::Dense(vec![0; m as usize])
        };
        Ok(Self {
            p: precision,
            m,
            state,
        })
    }

    pub(super) fn from_parts(p: u8, state: State) -> Self {
        Self {
            p,
            m: 1u32 << p,
            state,
        }
    }

    pub(super) fn state(&self) -> &State {
        &self.state
    }

    pub fn precision(&self) -> u8 {
        self.p
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self.state, State::Sparse(_))
    }

    /// Dense registers, or `None` while the sketch is sparse.
    pub fn registers(&self) -> Option<&[u8]> {
        match &self.state {
            State::Dense(regs) => Some(regs),
            State::Sparse(_) => None,
        }
    }

    pub fn insert(&mut self, bytes: &[u8]) {
        self.insert_hash(stable_hash64(bytes));
    }

    pub fn insert_hash(&mut self, x: u64) {
        match &mut self.state {
            State::Sparse(sparse) => {
                if sparse.tmp.insert(encode_hash(x, self.p)) {
                    self.maybe_promote();
                }
            }
            State::Dense(regs) => {
                let (i, r) = register_pos(x, self.p);
                let slot = &mut regs[i as usize];
                *slot = (*slot).max(r);
            }
        }
    }

    pub fn estimate(&mut self) -> u64 {
        match &mut self.state {
            State::Sparse(sparse) => {
                merge_pending(sparse);
                sparse_estimate(sparse.list.len())
            }
            State::Dense(regs) => dense_estimate(self.p, regs),
        }
    }

    /// Folds `other` into `self`. The result is the sketch that inserting the
    /// union of both inputs would have produced.
    pub fn merge(&mut self, other: &Sketch) -> Result<(), SketchError> {
        if self.p != other.p {
            return Err(SketchError::PrecisionMismatch {
                left: self.p,
                right: other.p,
            });
        }

        if let (State::Sparse(mine), State::Sparse(theirs)) = (&mut self.state, &other.state) {
            mine.tmp.extend(theirs.tmp.iter().copied());
            mine.tmp.extend(theirs.list.iter());
            self.maybe_promote();
            return Ok(());
        }

        self.promote();
        let p = self.p;
        let State::Dense(regs) = &mut self.state else {
            unreachable!("sketch promoted above");
        };
        match &other.state {
            State::Sparse(theirs) => {
                for k in theirs.tmp.iter().copied().chain(theirs.list.iter()) {
                    let (i, r) = decode_hash(k, p);
                    let slot = &mut regs[i as usize];
                    *slot = (*slot).max(r);
                }
            }
            State::Dense(theirs) => {
                for (slot, &r) in regs.iter_mut().zip(theirs.iter()) {
                    *slot = (*slot).max(r);
                }
            }
        }
        Ok(())
    }

    fn maybe_promote(&mut self) {
        let State::Sparse(sparse) = &mut self.state else {
            return;
        };
        if (sparse.tmp.len() as u64) * 100 <= u64::from(self.m) {
            return;
        }
        merge_pending(sparse);
        if sparse.list.len() > self.m as usize {
            self.promote();
        }
    }

    fn promote(&mut self) {
        if let State::Sparse(sparse) = &mut self.state {
            let sparse = std::mem::take(sparse);
            if tracing::enabled!(tracing::Level::TRACE) {
                trace!(
                    target: "logcol::sketch",
                    precision = self.p,
                    entries = sparse.list.len() + sparse.tmp.len(),
                    "Promoting sketch to dense registers"
                );
            }
            self.state = State::Dense(densify(self.p, self.m, sparse));
        }
    }
}

pub(super) fn check_precision(p: u8) -> Result<(), SketchError> {
    if !(MIN_PRECISION..=MAX_PRECISION).contains(&p) {
        return Err(SketchError::InvalidPrecision(p));
    }
    Ok(())
}

impl Default for Sketch {
    fn default() -> Self {
        Self::from_parts(DEFAULT_PRECISION, State::Sparse(SparseState::default()))
    }
}

/// Register array equivalent to a sparse state.
fn densify(p: u8, m: u32, sparse: SparseState) -> Vec<u8> {
    let mut regs = vec![0u8; m as usize];
    for k in sparse.tmp.into_iter().chain(sparse.list.iter()) {
        let (i, r) = decode_hash(k, p);
        let slot = &mut regs[i as usize];
        *slot = (*slot).max(r);
    }
    regs
}

/// Merges the pending set into the sorted list. Exact duplicates collapse,
/// and of several entries for one 25-bit slot only the highest rank survives.
pub(super) fn merge_pending(sparse: &mut SparseState) {
    if sparse.tmp.is_empty() {
        return;
    }

    let mut pending: Vec<u32> = sparse.tmp.drain().collect();
    pending.sort_unstable();

    let mut merged = Vec::with_capacity(pending.len() + sparse.list.len());
    let mut existing = sparse.list.iter().peekable();
    let mut incoming = pending.into_iter().peekable();
    loop {
        let next = match (existing.peek().copied(), incoming.peek().copied()) {
            (None, None) => break,
            (Some(a), None) => {
                existing.next();
                a
            }
            (None, Some(b)) => {
                incoming.next();
                b
            }
            (Some(a), Some(b)) => {
                if a <= b {
                    existing.next();
                }
                if b <= a {
                    incoming.next();
                }
                a.min(b)
            }
        };
        merged.push(next);
    }

    retain_max_rank(&mut merged);
    let mut list = CompressedList::with_capacity(4 * merged.len());
    for k in merged {
        list.push(k);
    }
    sparse.list = list;
}

/// Only entries carrying an explicit rank can share a slot; for a given slot
/// the larger key has the larger rank.
fn retain_max_rank(keys: &mut Vec<u32>) {
    let mut best: FxHashMap<u32, u32> = FxHashMap::default();
    let mut flagged = 0usize;
    for &k in keys.iter().filter(|k| *k & 1 == 1) {
        flagged += 1;
        let entry = best.entry(sparse_slot(k)).or_insert(k);
        *entry = (*entry).max(k);
    }
    if best.len() == flagged {
        return;
    }
    keys.retain(|&k| k & 1 == 0 || best.get(&sparse_slot(k)) == Some(&k));
}
