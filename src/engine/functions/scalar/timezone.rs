use chrono::{DateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::engine::errors::FunctionError;
use crate::engine::functions::datum::Datum;
use crate::engine::types::NumericValue;

const MILLIS_PER_SECOND: i64 = 1_000;
const SECONDS_PER_MINUTE: i32 = 60;

/// Exact, case-sensitive IANA zone id.
fn parse_timezone(id: &str) -> Result<Tz, FunctionError> {
    id.parse::<Tz>()
        .map_err(|_| FunctionError::UnknownTimezoneOrUnit(id.to_string()))
}

/// UTC offset of `tz` at the instant `millis`, in seconds.
fn offset_seconds(tz: Tz, millis: i64) -> Result<i32, FunctionError> {
    let instant = DateTime::from_timestamp_millis(millis).ok_or_else(|| {
        FunctionError::InvalidOperandEncoding(format!("date {millis} is out of range"))
    })?;
    Ok(tz
        .offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc())
}

/// `CONVERT_TZ(date, from, to)`: reads `date` as wall-clock time in
/// `from` and returns the same instant as wall-clock time in `to`.
pub fn convert_tz(args: &[Datum]) -> Result<Datum, FunctionError> {
    let [Datum::Date(date), Datum::Text(from), Datum::Text(to)] = args else {
        return Err(FunctionError::InvalidOperandEncoding(
            "CONVERT_TZ expects (date, varchar, varchar)".to_string(),
        ));
    };
    let from = parse_timezone(from)?;
    let to = parse_timezone(to)?;

    let utc = date - offset_seconds(from, *date)? as i64 * MILLIS_PER_SECOND;
    let converted = utc + offset_seconds(to, utc)? as i64 * MILLIS_PER_SECOND;
    Ok(Datum::Date(converted))
}

/// `TIMEZONE_OFFSET(tz, date)`: offset of `tz` from UTC at `date`, in
/// minutes.
pub fn timezone_offset(args: &[Datum]) -> Result<Datum, FunctionError> {
    let [Datum::Text(tz), Datum::Date(date)] = args else {
        return Err(FunctionError::InvalidOperandEncoding(
            "TIMEZONE_OFFSET expects (varchar, date)".to_string(),
        ));
    };
    let minutes = offset_seconds(parse_timezone(tz)?, *date)? / SECONDS_PER_MINUTE;
    Ok(Datum::Number(NumericValue::from(minutes)))
}
