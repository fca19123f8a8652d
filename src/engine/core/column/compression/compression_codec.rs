use crate::engine::core::column::options::CompressionKind;
use crate::engine::errors::ColumnError;

use lz4_flex::block::{
    compress_prepend_size as lz4_compress, decompress_size_prepended as lz4_decompress,
};

pub trait CompressionCodec: Send + Sync {
    fn kind(&self) -> CompressionKind;
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, ColumnError>;
    /// `uncompressed_len` is the size recorded at write time; codecs that
    /// frame their own length may ignore it.
    fn decompress(&self, input: &[u8], uncompressed_len: usize) -> Result<Vec<u8>, ColumnError>;
}

pub struct NoneCodec;

impl CompressionCodec for NoneCodec {
    fn kind(&self) -> CompressionKind {
        CompressionKind::None
    }
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, ColumnError> {
        Ok(input.to_vec())
    }
    fn decompress(&self, input: &[u8], _uncompressed_len: usize) -> Result<Vec<u8>, ColumnError> {
        Ok(input.to_vec())
    }
}

pub struct Lz4Codec;

impl CompressionCodec for Lz4Codec {
    fn kind(&self) -> CompressionKind {
        CompressionKind::Lz4
    }
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, ColumnError> {
        Ok(lz4_compress(input))
    }
    fn decompress(&self, input: &[u8], uncompressed_len: usize) -> Result<Vec<u8>, ColumnError> {
        // The size prefix sizes the output buffer.
        if let Some(prefix) = input.get(..4) {
            let declared = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
            if declared != uncompressed_len {
                return Err(ColumnError::Compression(format!(
                    "lz4 size prefix {declared}, expected {uncompressed_len}"
                )));
            }
        }
        lz4_decompress(input).map_err(|e| ColumnError::Compression(format!("lz4 decompress: {e}")))
    }
}

pub struct ZstdCodec {
    pub level: i32,
}

impl CompressionCodec for ZstdCodec {
    fn kind(&self) -> CompressionKind {
        CompressionKind::Zstd
    }
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, ColumnError> {
        zstd::encode_all(input, self.level)
            .map_err(|e| ColumnError::Compression(format!("zstd compress: {e}")))
    }
    fn decompress(&self, input: &[u8], uncompressed_len: usize) -> Result<Vec<u8>, ColumnError> {
        let out = zstd::decode_all(input)
            .map_err(|e| ColumnError::Compression(format!("zstd decompress: {e}")))?;
        if out.len() != uncompressed_len {
            return Err(ColumnError::Compression(format!(
                "zstd produced {} bytes, expected {uncompressed_len}",
                out.len()
            )));
        }
        Ok(out)
    }
}

static NONE_CODEC: NoneCodec = NoneCodec;
static LZ4_CODEC: Lz4Codec = Lz4Codec;

/// Codec used to write pages with `kind`.
pub fn codec_for(kind: CompressionKind, level: i32) -> Box<dyn CompressionCodec> {
    match kind {
        CompressionKind::None => Box::new(NoneCodec),
        CompressionKind::Lz4 => Box::new(Lz4Codec),
        CompressionKind::Zstd => Box::new(ZstdCodec { level }),
    }
}

/// Codec used to read pages. The zstd level only matters on the write side.
pub fn decompressor_for(kind: CompressionKind) -> &'static dyn CompressionCodec {
    static ZSTD_CODEC: ZstdCodec = ZstdCodec { level: 0 };
    match kind {
        CompressionKind::None => &NONE_CODEC,
        CompressionKind::Lz4 => &LZ4_CODEC,
        CompressionKind::Zstd => &ZSTD_CODEC,
    }
}
