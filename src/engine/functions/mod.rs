pub mod aggregate;
pub mod datum;
pub mod registry;
pub mod scalar;

pub use aggregate::{AggregateArg, AggregateCall, ColumnRef, WithinGroup};
pub use datum::{Datum, SqlType};
pub use registry::{ArgConstraint, BUILTINS, FunctionDef, FunctionMode, FunctionRegistry};
