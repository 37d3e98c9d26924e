use crate::engine::core::codec::compression_codec::{
    CompressionCodec, FLAG_LZ4, Lz4Codec, MAX_DECOMPRESSED_LEN,
};
use crate::engine::errors::AggregateError;

#[test]
fn lz4_roundtrip_prepend_size() {
    let codec = Lz4Codec;
    let data = b"0123456789abcdef0123456789abcdef".to_vec();
    let comp = codec.compress(&data);
    assert_eq!(&comp[..4], &(data.len() as u32).to_le_bytes());
    assert_eq!(codec.decompress(&comp).expect("decompress"), data);
    assert_eq!(codec.flag(), FLAG_LZ4);
}

#[test]
fn rejects_truncated_prefix() {
    assert!(matches!(
        Lz4Codec.decompress(&[1, 0]),
        Err(AggregateError::CorruptPartialState(_))
    ));
}

#[test]
fn rejects_oversized_declaration() {
    let mut input = ((MAX_DECOMPRESSED_LEN + 1) as u32).to_le_bytes().to_vec();
    input.extend_from_slice(&[0x10, b'a']);
    assert!(matches!(
        Lz4Codec.decompress(&input),
        Err(AggregateError::CorruptPartialState(_))
    ));
}

#[test]
fn rejects_garbage_block() {
    let mut input = 100u32.to_le_bytes().to_vec();
    input.extend_from_slice(&[0xff, 0xff, 0xff]);
    assert!(Lz4Codec.decompress(&input).is_err());
}
