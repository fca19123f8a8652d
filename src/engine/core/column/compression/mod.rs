pub mod compression_codec;

pub use compression_codec::{
    CompressionCodec, Lz4Codec, NoneCodec, ZstdCodec, codec_for, decompressor_for,
};
