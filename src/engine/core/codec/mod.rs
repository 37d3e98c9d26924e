pub mod be_slice_reader;
pub mod byte_encoder;
pub mod compression_codec;

pub use be_slice_reader::{BeSliceReader, MAX_VARINT_LEN, SIZE_I32};
pub use byte_encoder::ByteEncoder;
pub use compression_codec::{CompressionCodec, Lz4Codec, MAX_DECOMPRESSED_LEN};

#[cfg(test)]
mod byte_encoder_test;
#[cfg(test)]
mod compression_codec_test;
