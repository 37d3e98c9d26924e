pub const SIZE_I32: usize = 4;
/// Longest LEB128 encoding of a `u64`.
pub const MAX_VARINT_LEN: usize = 10;

/// Cursor over big-endian and varint framed bytes. Every read returns
/// `None` on truncated or malformed input and leaves the cursor unusable
/// for further framing decisions.
pub struct BeSliceReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BeSliceReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn has_bytes(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.buf.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    pub fn read_i32(&mut self) -> Option<i32> {
        if !self.has_bytes(SIZE_I32) {
            return None;
        }
        let val = i32::from_be_bytes(self.buf[self.pos..self.pos + SIZE_I32].try_into().ok()?);
        self.pos += SIZE_I32;
        Some(val)
    }

    /// Unsigned LEB128. Rejects encodings longer than [`MAX_VARINT_LEN`]
    /// and values that overflow `u64`.
    pub fn read_varint(&mut self) -> Option<u64> {
        let mut value: u64 = 0;
        for i in 0..MAX_VARINT_LEN {
            let byte = self.read_u8()?;
            let bits = (byte & 0x7f) as u64;
            let shift = 7 * i as u32;
            if i == MAX_VARINT_LEN - 1 && bits > 1 {
                return None;
            }
            value |= bits << shift;
            if byte & 0x80 == 0 {
                return Some(value);
            }
        }
        None
    }

    /// Varint length followed by that many bytes.
    pub fn read_bytes(&mut self) -> Option<&'a [u8]> {
        let len = usize::try_from(self.read_varint()?).ok()?;
        if !self.has_bytes(len) {
            return None;
        }
        let out = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Some(out)
    }
}
