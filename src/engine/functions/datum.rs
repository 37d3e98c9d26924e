use serde::{Deserialize, Serialize};

use crate::engine::types::{NumericType, NumericValue};

/// Declared type of a function argument or result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SqlType {
    Varchar,
    Varbinary,
    /// Milliseconds since the Unix epoch
    Date,
    Numeric(NumericType),
}

/// Runtime argument or result of a scalar function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Datum {
    Null,
    Text(String),
    Bytes(Vec<u8>),
    Date(i64),
    Number(NumericValue),
}

impl Datum {
    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }

    /// `None` for NULL, which fits any declared type.
    pub fn sql_type(&self) -> Option<SqlType> {
        match self {
            Datum::Null => None,
            Datum::Text(_) => Some(SqlType::Varchar),
            Datum::Bytes(_) => Some(SqlType::Varbinary),
            Datum::Date(_) => Some(SqlType::Date),
            Datum::Number(NumericValue::Exact(d)) if d.scale() <= 0 => {
                Some(SqlType::Numeric(NumericType::long()))
            }
            Datum::Number(NumericValue::Exact(_)) => {
                Some(SqlType::Numeric(NumericType::unbounded_decimal()))
            }
            Datum::Number(NumericValue::Float(_)) => Some(SqlType::Numeric(NumericType::double())),
        }
    }
}
