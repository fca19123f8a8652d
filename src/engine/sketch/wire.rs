//! Binary format of a [`Sketch`].
//!
//! ```text
//! version u8 | precision u8 | base u8 | sparse u8
//! sparse: tmp_len u32 | tmp_len x u32 | count u32 | last u32 | len u32 | len x u8
//! dense:  m u32 | m x u8
//! ```
//!
//! Integers are big endian. Version 1 stored dense registers as nibbles on top
//! of a common base; it is only ever decoded.

use super::compressed_list::CompressedList;
use super::hyperloglog::{Sketch, SparseState, State, check_precision};
use crate::engine::errors::SketchError;
use crate::shared::slice_reader::SliceReader;

pub const SKETCH_VERSION: u8 = 2;
const LEGACY_NIBBLE_VERSION: u8 = 1;
const PREAMBLE_LEN: usize = 8;

impl Sketch {
    pub fn marshal_binary(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        self.append_binary(&mut buf);
        buf
    }

    pub fn append_binary(&self, buf: &mut Vec<u8>) {
        buf.push(SKETCH_VERSION);
        buf.push(self.precision());
        buf.push(0);

        match self.state() {
            State::Sparse(sparse) => {
                buf.push(1);
                let mut pending: Vec<u32> = sparse.tmp.iter().copied().collect();
                pending.sort_unstable();
                buf.reserve(4 + pending.len() * 4);
                buf.extend_from_slice(&(pending.len() as u32).to_be_bytes());
                for k in pending {
                    buf.extend_from_slice(&k.to_be_bytes());
                }
                sparse.list.append_binary(buf);
            }
            State::Dense(regs) => {
                buf.push(0);
                buf.reserve(4 + regs.len());
                buf.extend_from_slice(&(regs.len() as u32).to_be_bytes());
                buf.extend_from_slice(regs);
            }
        }
    }

    pub fn unmarshal_binary(data: &[u8]) -> Result<Sketch, SketchError> {
        if data.len() < PREAMBLE_LEN {
            return Err(SketchError::ErrorTooShort);
        }
        let version = data[0];
        if version != SKETCH_VERSION && version != LEGACY_NIBBLE_VERSION {
            return Err(SketchError::UnsupportedVersion(version));
        }
        let p = data[1];
        let base = data[2];
        let sparse = data[3] == 1;
        check_precision(p)?;
        let m = 1usize << p;

        let mut r = SliceReader::new(&data[4..]);
        let state = if sparse {
            let pending_len = r.read_u32_be().ok_or(SketchError::ErrorTooShort)? as usize;
            if !r.has_bytes(pending_len.saturating_mul(4)) {
                return Err(SketchError::ErrorTooShort);
            }
            let mut state = SparseState::default();
            state.tmp.reserve(pending_len);
            for _ in 0..pending_len {
                let k = r.read_u32_be().ok_or(SketchError::ErrorTooShort)?;
                state.tmp.insert(k);
            }
            state.list = CompressedList::decode(&mut r)?;
            State::Sparse(state)
        } else if version == LEGACY_NIBBLE_VERSION {
            State::Dense(expand_nibbles(&data[PREAMBLE_LEN..], base, m)?)
        } else {
            let len = r.read_u32_be().ok_or(SketchError::ErrorTooShort)? as usize;
            if len != m {
                return Err(SketchError::Corrupt(format!(
                    "{len} registers for precision {p}"
                )));
            }
            let regs = r.read_bytes(len).ok_or(SketchError::ErrorTooShort)?;
            State::Dense(regs.to_vec())
        };

        Ok(Sketch::from_parts(p, state))
    }
}

/// Legacy registers: two per byte, high nibble first, each offset by `base`.
fn expand_nibbles(packed: &[u8], base: u8, m: usize) -> Result<Vec<u8>, SketchError> {
    let needed = m / 2;
    if packed.len() < needed {
        return Err(SketchError::ErrorTooShort);
    }
    let mut regs = Vec::with_capacity(m);
    for &byte in &packed[..needed] {
        regs.push((byte >> 4).wrapping_add(base));
        regs.push((byte & 0x0f).wrapping_add(base));
    }
    Ok(regs)
}
