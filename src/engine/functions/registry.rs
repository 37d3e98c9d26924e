use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

use crate::engine::core::arithmetic::{resolve_avg_type, resolve_sum_type};
use crate::engine::core::read::aggregate::plan::AggregateOpSpec;
use crate::engine::errors::FunctionError;
use crate::engine::functions::aggregate::{
    AggregateCall, plan_avg, plan_first_by, plan_first_value, plan_last_by, plan_last_value,
    plan_sum,
};
use crate::engine::functions::datum::{Datum, SqlType};
use crate::engine::functions::scalar::{convert_tz, hex_to_bytes, timezone_offset};
use crate::engine::types::NumericType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionMode {
    Scalar,
    Aggregate,
}

impl fmt::Display for FunctionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FunctionMode::Scalar => "Scalar",
            FunctionMode::Aggregate => "Aggregate",
        };
        write!(f, "{}", label)
    }
}

/// What an argument position accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgConstraint {
    Varchar,
    Varbinary,
    Date,
    Numeric,
    Integral,
    Any,
}

impl ArgConstraint {
    pub fn accepts(&self, ty: &SqlType) -> bool {
        match (self, ty) {
            (ArgConstraint::Any, _) => true,
            (ArgConstraint::Varchar, SqlType::Varchar) => true,
            (ArgConstraint::Varbinary, SqlType::Varbinary) => true,
            (ArgConstraint::Date, SqlType::Date) => true,
            (ArgConstraint::Numeric, SqlType::Numeric(_)) => true,
            (ArgConstraint::Integral, SqlType::Numeric(n)) => {
                n.family.is_integral() || (!n.is_floating() && n.scale == Some(0))
            }
            _ => false,
        }
    }
}

type ScalarFn = fn(&[Datum]) -> Result<Datum, FunctionError>;
type AggregatePlanner = fn(&AggregateCall) -> Result<AggregateOpSpec, FunctionError>;
type ResultResolver = fn(&[SqlType]) -> SqlType;

#[derive(Clone, Copy)]
enum FunctionImpl {
    Scalar(ScalarFn),
    Aggregate(AggregatePlanner),
}

/// One built-in: argument constraints, result-type resolver, and the
/// evaluator (scalar) or plan builder (aggregate).
#[derive(Clone, Copy)]
pub struct FunctionDef {
    pub name: &'static str,
    pub args: &'static [ArgConstraint],
    /// Leading arguments that must be present; the rest are optional.
    pub required: usize,
    resolve: ResultResolver,
    imp: FunctionImpl,
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .field("mode", &self.mode())
            .field("args", &self.args)
            .field("required", &self.required)
            .finish()
    }
}

impl FunctionDef {
    pub fn mode(&self) -> FunctionMode {
        match self.imp {
            FunctionImpl::Scalar(_) => FunctionMode::Scalar,
            FunctionImpl::Aggregate(_) => FunctionMode::Aggregate,
        }
    }

    pub fn check_args(&self, types: &[Option<SqlType>]) -> Result<(), FunctionError> {
        if types.len() < self.required || types.len() > self.args.len() {
            let expected = if self.required == self.args.len() {
                self.required.to_string()
            } else {
                format!("{}..={}", self.required, self.args.len())
            };
            return Err(FunctionError::ArgumentCount {
                name: self.name.to_string(),
                expected,
                got: types.len(),
            });
        }
        for (position, (constraint, ty)) in self.args.iter().zip(types).enumerate() {
            if let Some(ty) = ty {
                if !constraint.accepts(ty) {
                    return Err(FunctionError::ArgumentType {
                        name: self.name.to_string(),
                        position,
                        detail: format!("{ty:?} does not satisfy {constraint:?}"),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn result_type(&self, types: &[SqlType]) -> Result<SqlType, FunctionError> {
        let declared: Vec<Option<SqlType>> = types.iter().copied().map(Some).collect();
        self.check_args(&declared)?;
        Ok((self.resolve)(types))
    }

    pub fn evaluate(&self, args: &[Datum]) -> Result<Datum, FunctionError> {
        let FunctionImpl::Scalar(eval) = self.imp else {
            return Err(FunctionError::UnknownFunction(format!(
                "{} is not a scalar function",
                self.name
            )));
        };
        let types: Vec<Option<SqlType>> = args.iter().map(Datum::sql_type).collect();
        self.check_args(&types)?;
        if args.iter().any(Datum::is_null) {
            return Ok(Datum::Null);
        }
        eval(args)
    }

    pub fn plan_aggregate(&self, call: &AggregateCall) -> Result<AggregateOpSpec, FunctionError> {
        let FunctionImpl::Aggregate(plan) = self.imp else {
            return Err(FunctionError::UnknownFunction(format!(
                "{} is not an aggregate function",
                self.name
            )));
        };
        self.check_args(&call.arg_types())?;
        plan(call)
    }
}

pub struct FunctionRegistry {
    functions: HashMap<&'static str, FunctionDef>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    pub fn register(&mut self, def: FunctionDef) {
        self.functions.insert(def.name, def);
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name.to_ascii_uppercase().as_str())
    }

    pub fn lookup(&self, name: &str) -> Result<&FunctionDef, FunctionError> {
        self.get(name)
            .ok_or_else(|| FunctionError::UnknownFunction(name.to_string()))
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn first_arg(types: &[SqlType]) -> SqlType {
    types.first().copied().unwrap_or(SqlType::Varbinary)
}

fn sum_result(types: &[SqlType]) -> SqlType {
    match types.first() {
        Some(SqlType::Numeric(n)) => SqlType::Numeric(resolve_sum_type(n)),
        _ => SqlType::Numeric(NumericType::double()),
    }
}

fn avg_result(types: &[SqlType]) -> SqlType {
    match types.first() {
        Some(SqlType::Numeric(n)) => SqlType::Numeric(resolve_avg_type(n)),
        _ => SqlType::Numeric(NumericType::double()),
    }
}

const ORDER_STAT_BY_ARGS: &[ArgConstraint] =
    &[ArgConstraint::Any, ArgConstraint::Any, ArgConstraint::Integral];
const ORDER_STAT_VALUE_ARGS: &[ArgConstraint] = &[ArgConstraint::Any, ArgConstraint::Integral];

/// Built-in functions, assembled once.
pub static BUILTINS: Lazy<FunctionRegistry> = Lazy::new(|| {
    let mut registry = FunctionRegistry::new();
    registry.register(FunctionDef {
        name: "HEX_TO_BYTES",
        args: &[ArgConstraint::Varchar],
        required: 1,
        resolve: |_| SqlType::Varbinary,
        imp: FunctionImpl::Scalar(hex_to_bytes),
    });
    registry.register(FunctionDef {
        name: "CONVERT_TZ",
        args: &[ArgConstraint::Date, ArgConstraint::Varchar, ArgConstraint::Varchar],
        required: 3,
        resolve: |_| SqlType::Date,
        imp: FunctionImpl::Scalar(convert_tz),
    });
    registry.register(FunctionDef {
        name: "TIMEZONE_OFFSET",
        args: &[ArgConstraint::Varchar, ArgConstraint::Date],
        required: 2,
        resolve: |_| SqlType::Numeric(NumericType::integer()),
        imp: FunctionImpl::Scalar(timezone_offset),
    });
    registry.register(FunctionDef {
        name: "FIRST_BY",
        args: ORDER_STAT_BY_ARGS,
        required: 2,
        resolve: first_arg,
        imp: FunctionImpl::Aggregate(plan_first_by),
    });
    registry.register(FunctionDef {
        name: "LAST_BY",
        args: ORDER_STAT_BY_ARGS,
        required: 2,
        resolve: first_arg,
        imp: FunctionImpl::Aggregate(plan_last_by),
    });
    registry.register(FunctionDef {
        name: "FIRST_VALUE",
        args: ORDER_STAT_VALUE_ARGS,
        required: 1,
        resolve: first_arg,
        imp: FunctionImpl::Aggregate(plan_first_value),
    });
    registry.register(FunctionDef {
        name: "LAST_VALUE",
        args: ORDER_STAT_VALUE_ARGS,
        required: 1,
        resolve: first_arg,
        imp: FunctionImpl::Aggregate(plan_last_value),
    });
    registry.register(FunctionDef {
        name: "SUM",
        args: &[ArgConstraint::Numeric],
        required: 1,
        resolve: sum_result,
        imp: FunctionImpl::Aggregate(plan_sum),
    });
    registry.register(FunctionDef {
        name: "AVG",
        args: &[ArgConstraint::Numeric],
        required: 1,
        resolve: avg_result,
        imp: FunctionImpl::Aggregate(plan_avg),
    });
    registry
});
