pub const SIZE_U32: usize = 4;
pub const SIZE_U64: usize = 8;

/// Cursor over a borrowed byte slice. Every read returns `None` instead of
/// panicking when the slice is exhausted, so callers can map truncation onto
/// their own error type.
pub struct SliceReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn has_bytes(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        let b = *self.buf.get(self.pos)?;
        self.pos += 1;
        Some(b)
    }

    pub fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        if !self.has_bytes(n) {
            return None;
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Some(out)
    }

    pub fn read_u32_le(&mut self) -> Option<u32> {
        let bytes = self.read_bytes(SIZE_U32)?;
        Some(u32::from_le_bytes(bytes.try_into().ok()?))
    }

    pub fn read_u32_be(&mut self) -> Option<u32> {
        let bytes = self.read_bytes(SIZE_U32)?;
        Some(u32::from_be_bytes(bytes.try_into().ok()?))
    }

    pub fn read_u64_le(&mut self) -> Option<u64> {
        let bytes = self.read_bytes(SIZE_U64)?;
        Some(u64::from_le_bytes(bytes.try_into().ok()?))
    }

    /// LEB128 unsigned varint, at most 10 bytes.
    pub fn read_uvarint(&mut self) -> Option<u64> {
        let mut value = 0u64;
        for i in 0..10 {
            let b = self.read_u8()?;
            if i == 9 && b > 1 {
                return None;
            }
            value |= u64::from(b & 0x7f) << (7 * i);
            if b & 0x80 == 0 {
                return Some(value);
            }
        }
        None
    }

    /// Zig-zag encoded signed varint.
    pub fn read_varint(&mut self) -> Option<i64> {
        self.read_uvarint().map(unzigzag)
    }
}

pub fn put_uvarint(buf: &mut Vec<u8>, mut v: u64) {
    while v >= 0x80 {
        buf.push((v as u8) | 0x80);
        v >>= 7;
    }
    buf.push(v as u8);
}

pub fn put_varint(buf: &mut Vec<u8>, v: i64) {
    put_uvarint(buf, zigzag(v));
}

#[inline]
pub fn zigzag(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

#[inline]
pub fn unzigzag(v: u64) -> i64 {
    ((v >> 1) as i64) ^ -((v & 1) as i64)
}
