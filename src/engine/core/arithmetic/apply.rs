use tracing::{debug, trace};

use crate::engine::core::arithmetic::resolve::ArithmeticOp;
use crate::engine::core::decimal::Decimal;
use crate::engine::errors::NumericError;
use crate::engine::types::{
    MAX_PRECISION, MIN_DIVIDE_SCALE, NumericFamily, NumericType, NumericValue,
};

/// Evaluates `left op right` into the representation chosen by
/// [`resolve_result_type`](super::resolve_result_type).
///
/// Fixed-point results are exact and may exceed 38 digits; overflow is
/// only detected by [`materialize`]. Division is the exception: its
/// quotient is fitted to the ceiling by dropping fractional digits.
pub fn apply(
    op: ArithmeticOp,
    left: &NumericValue,
    right: &NumericValue,
    result: &NumericType,
) -> Result<NumericValue, NumericError> {
    if result.is_floating() {
        let (l, r) = (left.to_f64(), right.to_f64());
        let value = match op {
            ArithmeticOp::Add => l + r,
            ArithmeticOp::Subtract => l - r,
            ArithmeticOp::Multiply => l * r,
            ArithmeticOp::Divide => l / r,
        };
        return Ok(NumericValue::Float(narrow(value, result)));
    }

    let (Some(l), Some(r)) = (left.as_decimal(), right.as_decimal()) else {
        return Err(NumericError::IncompatibleOperands(format!(
            "floating operand in fixed-point '{}' resolved as {}",
            op.as_str(),
            result
        )));
    };

    let value = match op {
        ArithmeticOp::Add => l.add(r),
        ArithmeticOp::Subtract => l.sub(r),
        ArithmeticOp::Multiply => l.mul(r)?,
        ArithmeticOp::Divide => divide(l, r, result.scale)?,
    };
    Ok(NumericValue::Exact(value))
}

/// Average of `count` values summing to `sum`; `None` when nothing was
/// counted.
pub fn avg(
    sum: &NumericValue,
    count: u64,
    result: &NumericType,
) -> Result<Option<NumericValue>, NumericError> {
    if count == 0 {
        return Ok(None);
    }
    if result.is_floating() {
        return Ok(Some(NumericValue::Float(narrow(
            sum.to_f64() / count as f64,
            result,
        ))));
    }
    let sum = match sum {
        NumericValue::Exact(d) => d.clone(),
        NumericValue::Float(f) => Decimal::from_f64(*f)?,
    };
    let quotient = divide(&sum, &Decimal::from(count), result.scale)?;
    Ok(Some(NumericValue::Exact(quotient)))
}

fn divide(
    dividend: &Decimal,
    divisor: &Decimal,
    scale: Option<u32>,
) -> Result<Decimal, NumericError> {
    let scale = match scale {
        Some(s) => i32::try_from(s).map_err(|_| NumericError::ScaleOutOfRange)?,
        None => dividend.scale().max(MIN_DIVIDE_SCALE as i32),
    };
    let quotient = dividend.div_to_scale(divisor, scale)?;
    if quotient.precision() <= MAX_PRECISION {
        return Ok(quotient);
    }
    let fitted = quotient.round_to_precision(MAX_PRECISION).trim_fraction_zeros();
    debug!(
        target: "kvsql::arithmetic",
        digits = quotient.precision(),
        scale = fitted.scale(),
        "Quotient fitted to precision ceiling"
    );
    Ok(fitted)
}

fn narrow(value: f64, result: &NumericType) -> f64 {
    if result.family == NumericFamily::Float {
        value as f32 as f64
    } else {
        value
    }
}

/// Binds `value` to a typed column or cast target.
///
/// Exact targets rescale half-up to a declared scale, then enforce the
/// declared precision (capped at 38) or the integral range. Floating
/// sources become exact through their shortest decimal text; exact values
/// cast to floating targets may lose precision.
pub fn materialize(
    value: &NumericValue,
    target: &NumericType,
) -> Result<NumericValue, NumericError> {
    if target.is_floating() {
        return Ok(NumericValue::Float(narrow(value.to_f64(), target)));
    }

    let exact = match value {
        NumericValue::Exact(d) => d.clone(),
        NumericValue::Float(f) => Decimal::from_f64(*f)?,
    };
    let (_, scale) = target.fixed_point_bounds();
    let exact = match scale {
        Some(s) => {
            let scale = i32::try_from(s).map_err(|_| NumericError::ScaleOutOfRange)?;
            exact.rescale(scale)?
        }
        None => exact,
    };

    match target.family {
        NumericFamily::Integer => {
            check_range(&exact, i32::MIN as i64, i32::MAX as i64, target)?
        }
        NumericFamily::Long => check_range(&exact, i64::MIN, i64::MAX, target)?,
        _ => {
            let precision = target.effective_precision();
            if exact.precision() > precision {
                trace!(
                    target: "kvsql::arithmetic",
                    value = %exact,
                    column_type = %target,
                    "Value exceeds target precision"
                );
                return Err(NumericError::ArithmeticOverflow {
                    digits: exact.precision(),
                    precision,
                });
            }
        }
    }
    Ok(NumericValue::Exact(exact))
}

fn check_range(
    value: &Decimal,
    min: i64,
    max: i64,
    target: &NumericType,
) -> Result<(), NumericError> {
    match value.to_i64() {
        Some(v) if v >= min && v <= max => Ok(()),
        _ => Err(NumericError::ArithmeticOverflow {
            digits: value.precision(),
            precision: target.effective_precision(),
        }),
    }
}
