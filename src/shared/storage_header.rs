use crc32fast::Hasher as Crc32Hasher;
use std::io::Write;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeaderError {
    #[error("buffer too small for header: {0} bytes")]
    TooShort(usize),

    #[error("header CRC mismatch")]
    CrcMismatch,

    #[error("invalid magic")]
    InvalidMagic,

    #[error("unsupported version {0}")]
    UnsupportedVersion(u16),
}

/// Fixed 20-byte preamble of every file this crate persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryHeader {
    pub magic: [u8; 8],
    pub version: u16,
    pub flags: u16,
    pub reserved: u32,
    pub header_crc32: u32,
}

impl BinaryHeader {
    pub const LEN_WITHOUT_CRC: usize = 8 + 2 + 2 + 4;
    pub const TOTAL_LEN: usize = Self::LEN_WITHOUT_CRC + 4;

    pub fn new(magic: [u8; 8], version: u16, flags: u16) -> Self {
        let mut header = Self {
            magic,
            version,
            flags,
            reserved: 0,
            header_crc32: 0,
        };
        header.header_crc32 = header.compute_crc32();
        header
    }

    fn compute_crc32(&self) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(&self.encode_without_crc());
        hasher.finalize()
    }

    fn encode_without_crc(&self) -> [u8; Self::LEN_WITHOUT_CRC] {
        let mut out = [0u8; Self::LEN_WITHOUT_CRC];
        out[..8].copy_from_slice(&self.magic);
        out[8..10].copy_from_slice(&self.version.to_le_bytes());
        out[10..12].copy_from_slice(&self.flags.to_le_bytes());
        out[12..16].copy_from_slice(&self.reserved.to_le_bytes());
        out
    }

    pub fn encode(&self) -> [u8; Self::TOTAL_LEN] {
        let mut out = [0u8; Self::TOTAL_LEN];
        out[..Self::LEN_WITHOUT_CRC].copy_from_slice(&self.encode_without_crc());
        out[Self::LEN_WITHOUT_CRC..].copy_from_slice(&self.header_crc32.to_le_bytes());
        out
    }

    pub fn write_to<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        w.write_all(&self.encode())
    }

    /// Parses and CRC-checks a header from the front of `bytes`.
    pub fn decode(bytes: &[u8]) -> Result<Self, HeaderError> {
        if bytes.len() < Self::TOTAL_LEN {
            return Err(HeaderError::TooShort(bytes.len()));
        }
        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        let u32_at =
            |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);

        let mut magic = [0u8; 8];
        magic.copy_from_slice(&bytes[..8]);
        let hdr = Self {
            magic,
            version: u16_at(8),
            flags: u16_at(10),
            reserved: u32_at(12),
            header_crc32: u32_at(16),
        };
        if hdr.compute_crc32() != hdr.header_crc32 {
            return Err(HeaderError::CrcMismatch);
        }
        Ok(hdr)
    }
}

pub trait MagicFile {
    const MAGIC: [u8; 8];
    const VERSION: u16 = 1;

    fn header() -> BinaryHeader {
        BinaryHeader::new(Self::MAGIC, Self::VERSION, 0)
    }

    fn validate_header(bytes: &[u8]) -> Result<BinaryHeader, HeaderError> {
        let header = BinaryHeader::decode(bytes)?;
        if header.magic != Self::MAGIC {
            return Err(HeaderError::InvalidMagic);
        }
        if header.version != Self::VERSION {
            return Err(HeaderError::UnsupportedVersion(header.version));
        }
        Ok(header)
    }
}

pub enum FileKind {
    Column,
}

impl FileKind {
    pub const fn magic(&self) -> [u8; 8] {
        match self {
            FileKind::Column => *b"LGCOLMN\0",
        }
    }
}
