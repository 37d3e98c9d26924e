use num_bigint::BigInt;

use crate::engine::core::decimal::Decimal;
use crate::engine::errors::NumericError;

const SCALE_LEN: usize = 4;

/// Binary form: 4-byte big-endian scale followed by the unscaled value as
/// big-endian two's complement (at least one byte).
impl Decimal {
    pub fn to_bytes(&self) -> Vec<u8> {
        let unscaled = self.unscaled().to_signed_bytes_be();
        let mut out = Vec::with_capacity(SCALE_LEN + unscaled.len());
        out.extend_from_slice(&self.scale().to_be_bytes());
        out.extend_from_slice(&unscaled);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Decimal, NumericError> {
        if bytes.len() <= SCALE_LEN {
            return Err(NumericError::InvalidOperandEncoding(format!(
                "decimal needs more than {SCALE_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let (scale_bytes, unscaled) = bytes.split_at(SCALE_LEN);
        let mut scale = [0u8; SCALE_LEN];
        scale.copy_from_slice(scale_bytes);
        let scale = i32::from_be_bytes(scale);
        Decimal::new(BigInt::from_signed_bytes_be(unscaled), scale).map_err(|_| {
            NumericError::InvalidOperandEncoding(format!("decimal scale {scale} is out of range"))
        })
    }
}
