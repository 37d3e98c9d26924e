use std::fmt;

use serde::{Deserialize, Serialize};

/// Hard ceiling on significant digits of a materialized DECIMAL.
pub const MAX_PRECISION: u32 = 38;
/// Minimum fractional digits produced by division and AVG.
pub const MIN_DIVIDE_SCALE: u32 = 4;
pub const DEFAULT_INTEGER_PRECISION: u32 = 10;
pub const DEFAULT_LONG_PRECISION: u32 = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericFamily {
    Integer,
    Long,
    Double,
    Float,
    Decimal,
}

impl NumericFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericFamily::Integer => "INTEGER",
            NumericFamily::Long => "LONG",
            NumericFamily::Double => "DOUBLE",
            NumericFamily::Float => "FLOAT",
            NumericFamily::Decimal => "DECIMAL",
        }
    }

    pub fn is_floating(&self) -> bool {
        matches!(self, NumericFamily::Double | NumericFamily::Float)
    }

    pub fn is_integral(&self) -> bool {
        matches!(self, NumericFamily::Integer | NumericFamily::Long)
    }
}

/// Numeric type descriptor.
///
/// `precision == None` is unbounded (capped at [`MAX_PRECISION`] only when a
/// value is materialized). `scale == None` is unscaled: coercion never
/// truncates the fractional part of such a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumericType {
    pub family: NumericFamily,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
}

impl NumericType {
    pub const fn integer() -> Self {
        Self {
            family: NumericFamily::Integer,
            precision: Some(DEFAULT_INTEGER_PRECISION),
            scale: Some(0),
        }
    }

    pub const fn long() -> Self {
        Self {
            family: NumericFamily::Long,
            precision: Some(DEFAULT_LONG_PRECISION),
            scale: Some(0),
        }
    }

    pub const fn double() -> Self {
        Self {
            family: NumericFamily::Double,
            precision: None,
            scale: None,
        }
    }

    pub const fn float() -> Self {
        Self {
            family: NumericFamily::Float,
            precision: None,
            scale: None,
        }
    }

    pub const fn decimal(precision: u32, scale: u32) -> Self {
        Self {
            family: NumericFamily::Decimal,
            precision: Some(precision),
            scale: Some(scale),
        }
    }

    /// `DECIMAL` with no declared precision nor scale.
    pub const fn unbounded_decimal() -> Self {
        Self {
            family: NumericFamily::Decimal,
            precision: None,
            scale: None,
        }
    }

    pub const fn decimal_with(precision: Option<u32>, scale: Option<u32>) -> Self {
        Self {
            family: NumericFamily::Decimal,
            precision,
            scale,
        }
    }

    pub fn is_floating(&self) -> bool {
        self.family.is_floating()
    }

    /// Precision and scale as seen by the fixed-point rules.
    /// Integral families report their implicit `(10, 0)` / `(19, 0)`.
    pub fn fixed_point_bounds(&self) -> (Option<u32>, Option<u32>) {
        match self.family {
            NumericFamily::Integer => (Some(DEFAULT_INTEGER_PRECISION), Some(0)),
            NumericFamily::Long => (Some(DEFAULT_LONG_PRECISION), Some(0)),
            _ => (self.precision, self.scale),
        }
    }

    /// Precision enforced when a value is bound to this type.
    pub fn effective_precision(&self) -> u32 {
        self.precision
            .map(|p| p.min(MAX_PRECISION))
            .unwrap_or(MAX_PRECISION)
    }
}

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.family, self.precision, self.scale) {
            (NumericFamily::Decimal, Some(p), Some(s)) => write!(f, "DECIMAL({p},{s})"),
            (NumericFamily::Decimal, Some(p), None) => write!(f, "DECIMAL({p})"),
            (family, _, _) => f.write_str(family.as_str()),
        }
    }
}
