use crate::engine::core::column::options::EncodingKind;
use crate::engine::types::ValueType;

/// Fixed header at the start of every uncompressed page.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageHeader {
    pub value_type: u8,
    pub flags: u8,
    pub encoding: u8,
    pub reserved: u8,
    pub row_count: u32,
    pub aux_len: u32,
}

impl PageHeader {
    pub const FLAG_HAS_NULLS: u8 = 0b0000_0001;
    pub const FLAG_HAS_ZEROS: u8 = 0b0000_0010;

    pub const LEN: usize = 1 + 1 + 1 + 1 + 4 + 4; // repr(C) layout

    pub fn new(
        value_type: ValueType,
        encoding: EncodingKind,
        has_nulls: bool,
        has_zeros: bool,
        row_count: u32,
        aux_len: u32,
    ) -> Self {
        let mut flags = 0u8;
        if has_nulls {
            flags |= Self::FLAG_HAS_NULLS;
        }
        if has_zeros {
            flags |= Self::FLAG_HAS_ZEROS;
        }
        Self {
            value_type: value_type.tag(),
            flags,
            encoding: encoding.tag(),
            reserved: 0,
            row_count,
            aux_len,
        }
    }

    #[inline]
    pub fn has_nulls(&self) -> bool {
        self.flags & Self::FLAG_HAS_NULLS != 0
    }

    #[inline]
    pub fn has_zeros(&self) -> bool {
        self.flags & Self::FLAG_HAS_ZEROS != 0
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.push(self.value_type);
        buf.push(self.flags);
        buf.push(self.encoding);
        buf.push(self.reserved);
        buf.extend_from_slice(&self.row_count.to_le_bytes());
        buf.extend_from_slice(&self.aux_len.to_le_bytes());
    }

    pub fn read_from(slice: &[u8]) -> Option<Self> {
        if slice.len() < Self::LEN {
            return None;
        }
        let mut c = [0u8; 4];
        c.copy_from_slice(&slice[4..8]);
        let row_count = u32::from_le_bytes(c);
        c.copy_from_slice(&slice[8..12]);
        let aux_len = u32::from_le_bytes(c);
        Some(Self {
            value_type: slice[0],
            flags: slice[1],
            encoding: slice[2],
            reserved: slice[3],
            row_count,
            aux_len,
        })
    }
}
