use crate::engine::errors::SketchError;
use crate::shared::slice_reader::{SliceReader, put_uvarint};

/// Sorted list of sparse entries stored as varint-encoded deltas.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedList {
    count: u32,
    last: u32,
    bytes: Vec<u8>,
}

impl CompressedList {
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            count: 0,
            last: 0,
            bytes: Vec::with_capacity(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.count as usize
    }

    /// Appends `x`, which must not be smaller than the last appended entry.
    pub fn push(&mut self, x: u32) {
        debug_assert!(self.count == 0 || x >= self.last, "entries must be sorted");
        put_uvarint(&mut self.bytes, u64::from(x - self.last));
        self.last = x;
        self.count += 1;
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            reader: SliceReader::new(&self.bytes),
            last: 0,
        }
    }

    pub fn append_binary(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.count.to_be_bytes());
        buf.extend_from_slice(&self.last.to_be_bytes());
        buf.extend_from_slice(&(self.bytes.len() as u32).to_be_bytes());
        buf.extend_from_slice(&self.bytes);
    }

    /// Reads a list written by [`append_binary`](Self::append_binary) and checks
    /// that the encoded deltas agree with the recorded count and last entry.
    pub fn decode(r: &mut SliceReader<'_>) -> Result<Self, SketchError> {
        let count = r.read_u32_be().ok_or(SketchError::ErrorTooShort)?;
        let last = r.read_u32_be().ok_or(SketchError::ErrorTooShort)?;
        let len = r.read_u32_be().ok_or(SketchError::ErrorTooShort)? as usize;
        let bytes = r.read_bytes(len).ok_or(SketchError::ErrorTooShort)?;

        let mut reader = SliceReader::new(bytes);
        let mut seen = 0u32;
        let mut cur = 0u32;
        while reader.remaining() > 0 {
            let delta = reader
                .read_uvarint()
                .and_then(|d| u32::try_from(d).ok())
                .ok_or_else(|| SketchError::Corrupt("bad sparse list varint".into()))?;
            cur = cur
                .checked_add(delta)
                .ok_or_else(|| SketchError::Corrupt("sparse list overflow".into()))?;
            seen += 1;
        }
        if seen != count || (count > 0 && cur != last) {
            return Err(SketchError::Corrupt(format!(
                "sparse list holds {seen} entries ending at {cur}, header says {count} ending at {last}"
            )));
        }

        Ok(Self {
            count,
            last,
            bytes: bytes.to_vec(),
        })
    }
}

impl FromIterator<u32> for CompressedList {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        let mut list = CompressedList::default();
        for x in iter {
            list.push(x);
        }
        list
    }
}

pub struct Iter<'a> {
    reader: SliceReader<'a>,
    last: u32,
}

impl Iterator for Iter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let delta = self.reader.read_uvarint()?;
        self.last = self.last.wrapping_add(delta as u32);
        Some(self.last)
    }
}
