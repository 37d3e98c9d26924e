pub struct ByteEncoder;

impl ByteEncoder {
    pub fn encode_varint(mut value: u64, buffer: &mut Vec<u8>) {
        while value >= 0x80 {
            buffer.push((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        buffer.push(value as u8);
    }

    pub fn encode_bytes(bytes: &[u8], buffer: &mut Vec<u8>) {
        Self::encode_varint(bytes.len() as u64, buffer);
        buffer.extend_from_slice(bytes);
    }

    pub fn encode_i32(value: i32, buffer: &mut Vec<u8>) {
        buffer.extend_from_slice(&value.to_be_bytes());
    }
}
