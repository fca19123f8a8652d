/// Growable bitmap, one bit per row, least significant bit first.
#[derive(Debug, Clone, Default)]
pub struct BitmapBuilder {
    bits: Vec<u8>,
    len: usize,
    set: usize,
}

impl BitmapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bits.push(0);
        }
        if bit {
            self.bits[self.len / 8] |= 1 << (self.len % 8);
            self.set += 1;
        }
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn any(&self) -> bool {
        self.set > 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }
}

#[inline]
pub fn bitmap_len(rows: usize) -> usize {
    rows.div_ceil(8)
}

pub struct BitmapView<'a> {
    bits: Option<&'a [u8]>,
}

impl<'a> BitmapView<'a> {
    pub fn new(bits: Option<&'a [u8]>) -> Self {
        Self { bits }
    }

    #[inline]
    pub fn is_set(&self, idx: usize) -> bool {
        if let Some(b) = self.bits { (b[idx / 8] & (1 << (idx % 8))) != 0 } else { false }
    }

    /// Set bits, padding included. Writers never set padding bits.
    pub fn count_set(&self) -> usize {
        self.bits
            .map_or(0, |b| b.iter().map(|byte| byte.count_ones() as usize).sum())
    }
}
