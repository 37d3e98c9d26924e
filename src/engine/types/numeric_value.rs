use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::core::decimal::Decimal;
use crate::engine::errors::NumericError;
use crate::engine::types::{NumericFamily, NumericType};

/// Runtime numeric value flowing through expression evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NumericValue {
    Exact(Decimal),
    Float(f64),
}

impl NumericValue {
    pub fn is_exact(&self) -> bool {
        matches!(self, NumericValue::Exact(_))
    }

    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            NumericValue::Exact(d) => Some(d),
            NumericValue::Float(_) => None,
        }
    }

    /// Lossy for exact values beyond double precision.
    pub fn to_f64(&self) -> f64 {
        match self {
            NumericValue::Exact(d) => d.to_f64(),
            NumericValue::Float(f) => *f,
        }
    }
}

/// Column bytes of a numeric value: big-endian two's complement for
/// `INTEGER`/`LONG`, big-endian IEEE 754 for `FLOAT`/`DOUBLE`, and the
/// decimal binary form for `DECIMAL`.
impl NumericValue {
    pub fn decode(bytes: &[u8], ty: &NumericType) -> Result<NumericValue, NumericError> {
        match ty.family {
            NumericFamily::Integer => {
                Ok(NumericValue::from(i32::from_be_bytes(fixed::<4>(bytes, ty)?)))
            }
            NumericFamily::Long => {
                Ok(NumericValue::from(i64::from_be_bytes(fixed::<8>(bytes, ty)?)))
            }
            NumericFamily::Float => Ok(NumericValue::Float(
                f32::from_be_bytes(fixed::<4>(bytes, ty)?) as f64,
            )),
            NumericFamily::Double => Ok(NumericValue::Float(f64::from_be_bytes(fixed::<8>(
                bytes, ty,
            )?))),
            NumericFamily::Decimal => Decimal::from_bytes(bytes).map(NumericValue::Exact),
        }
    }

    /// Inverse of [`NumericValue::decode`]; the value must already be
    /// materialized to `ty`.
    pub fn encode(&self, ty: &NumericType) -> Result<Vec<u8>, NumericError> {
        match (ty.family, self) {
            (NumericFamily::Float, v) => Ok((v.to_f64() as f32).to_be_bytes().to_vec()),
            (NumericFamily::Double, v) => Ok(v.to_f64().to_be_bytes().to_vec()),
            (NumericFamily::Decimal, NumericValue::Exact(d)) => Ok(d.to_bytes()),
            (NumericFamily::Integer, NumericValue::Exact(d)) => d
                .to_i64()
                .and_then(|v| i32::try_from(v).ok())
                .map(|v| v.to_be_bytes().to_vec())
                .ok_or_else(|| overflow(d, ty)),
            (NumericFamily::Long, NumericValue::Exact(d)) => d
                .to_i64()
                .map(|v| v.to_be_bytes().to_vec())
                .ok_or_else(|| overflow(d, ty)),
            (_, NumericValue::Float(f)) => Err(NumericError::IncompatibleOperands(format!(
                "floating value {f} cannot be stored as {ty}"
            ))),
        }
    }
}

fn fixed<const N: usize>(bytes: &[u8], ty: &NumericType) -> Result<[u8; N], NumericError> {
    bytes.try_into().map_err(|_| {
        NumericError::InvalidOperandEncoding(format!(
            "{ty} expects {N} bytes, got {}",
            bytes.len()
        ))
    })
}

fn overflow(value: &Decimal, ty: &NumericType) -> NumericError {
    NumericError::ArithmeticOverflow {
        digits: value.precision(),
        precision: ty.effective_precision(),
    }
}

impl From<Decimal> for NumericValue {
    fn from(value: Decimal) -> Self {
        NumericValue::Exact(value)
    }
}

impl From<i32> for NumericValue {
    fn from(value: i32) -> Self {
        NumericValue::Exact(Decimal::from(value))
    }
}

impl From<i64> for NumericValue {
    fn from(value: i64) -> Self {
        NumericValue::Exact(Decimal::from(value))
    }
}

impl From<f64> for NumericValue {
    fn from(value: f64) -> Self {
        NumericValue::Float(value)
    }
}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Exact(d) => write!(f, "{d}"),
            NumericValue::Float(v) => write!(f, "{v}"),
        }
    }
}
