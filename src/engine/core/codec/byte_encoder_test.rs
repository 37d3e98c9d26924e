use crate::engine::core::codec::byte_encoder::ByteEncoder;

#[test]
fn varint_uses_seven_bit_groups() {
    let mut buf = Vec::new();
    ByteEncoder::encode_varint(300, &mut buf);
    assert_eq!(buf, vec![0xac, 0x02]);

    buf.clear();
    ByteEncoder::encode_varint(5, &mut buf);
    assert_eq!(buf, vec![0x05]);
}

#[test]
fn bytes_are_length_prefixed() {
    let mut buf = Vec::new();
    ByteEncoder::encode_bytes(&[9, 8, 7], &mut buf);
    assert_eq!(buf, vec![3, 9, 8, 7]);
}

#[test]
fn i32_is_big_endian() {
    let mut buf = Vec::new();
    ByteEncoder::encode_i32(258, &mut buf);
    assert_eq!(buf, vec![0, 0, 1, 2]);
}
