use crate::engine::errors::AggregateError;

use lz4_flex::block::{
    compress_prepend_size as lz4_compress, decompress_size_prepended as lz4_decompress,
};

pub const FLAG_UNCOMPRESSED: u8 = 0;
pub const FLAG_LZ4: u8 = 1;
/// Upper bound on a declared uncompressed size.
pub const MAX_DECOMPRESSED_LEN: usize = 64 * 1024 * 1024;

const SIZE_PREFIX: usize = 4;

pub trait CompressionCodec {
    fn flag(&self) -> u8;
    fn compress(&self, input: &[u8]) -> Vec<u8>;
    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, AggregateError>;
}

/// LZ4 block with a 4-byte little-endian uncompressed-size prefix.
pub struct Lz4Codec;

impl CompressionCodec for Lz4Codec {
    fn flag(&self) -> u8 {
        FLAG_LZ4
    }

    fn compress(&self, input: &[u8]) -> Vec<u8> {
        lz4_compress(input)
    }

    fn decompress(&self, input: &[u8]) -> Result<Vec<u8>, AggregateError> {
        let Some(prefix) = input.get(..SIZE_PREFIX) else {
            return Err(AggregateError::CorruptPartialState(
                "lz4 block shorter than its size prefix".into(),
            ));
        };
        let declared = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
        if declared > MAX_DECOMPRESSED_LEN {
            return Err(AggregateError::CorruptPartialState(format!(
                "lz4 block declares {declared} bytes, limit is {MAX_DECOMPRESSED_LEN}"
            )));
        }
        lz4_decompress(input)
            .map_err(|e| AggregateError::CorruptPartialState(format!("lz4 decompress: {e}")))
    }
}
