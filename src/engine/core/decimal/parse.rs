use std::borrow::Cow;
use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::engine::core::decimal::{Decimal, MAX_SCALE};
use crate::engine::errors::NumericError;

impl FromStr for Decimal {
    type Err = NumericError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let needs_trimming = raw
            .as_bytes()
            .first()
            .is_some_and(|b| b.is_ascii_whitespace())
            || raw
                .as_bytes()
                .last()
                .is_some_and(|b| b.is_ascii_whitespace());
        let has_underscores = raw.as_bytes().contains(&b'_');

        let text = match (needs_trimming, has_underscores) {
            (false, false) => Cow::Borrowed(raw),
            (true, false) => Cow::Borrowed(raw.trim()),
            (false, true) => Cow::Owned(raw.replace('_', "")),
            (true, true) => Cow::Owned(raw.trim().replace('_', "")),
        };

        if text.is_empty() {
            return Err(NumericError::InvalidOperandEncoding(
                "empty decimal literal".to_string(),
            ));
        }

        let parsed = BigDecimal::from_str(&text).map_err(|_| {
            NumericError::InvalidOperandEncoding(format!("'{raw}' is not a decimal number"))
        })?;
        let (unscaled, scale) = parsed.as_bigint_and_exponent();
        if scale.abs() > MAX_SCALE as i64 {
            return Err(NumericError::InvalidOperandEncoding(format!(
                "exponent of '{raw}' is out of range"
            )));
        }
        Decimal::new(unscaled, scale as i32)
    }
}
