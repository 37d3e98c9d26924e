use crate::engine::core::read::aggregate::order_key::SortDirection;
use crate::engine::core::read::aggregate::plan::{
    AggregateOpSpec, OrderStatSpec, effective_direction,
};
use crate::engine::errors::{AggregateError, FunctionError};
use crate::engine::functions::datum::{Datum, SqlType};
use crate::engine::types::{ExprId, NumericType, NumericValue};

/// A column-valued argument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRef {
    pub expr: ExprId,
    pub ty: SqlType,
    /// Byte layout of the column; `Desc` keys are stored inverted.
    pub storage: SortDirection,
}

impl ColumnRef {
    pub fn new(expr: ExprId, ty: SqlType) -> Self {
        Self {
            expr,
            ty,
            storage: SortDirection::Asc,
        }
    }

    pub fn stored_desc(mut self) -> Self {
        self.storage = SortDirection::Desc;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AggregateArg {
    Column(ColumnRef),
    Literal(Datum),
}

/// `WITHIN GROUP (ORDER BY <order> [ASC|DESC])`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WithinGroup {
    pub order: ColumnRef,
    pub direction: SortDirection,
}

/// An aggregate invocation as handed over by the planner.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateCall {
    pub name: String,
    pub args: Vec<AggregateArg>,
    pub within_group: Option<WithinGroup>,
}

impl AggregateCall {
    pub fn new(name: impl Into<String>, args: Vec<AggregateArg>) -> Self {
        Self {
            name: name.into(),
            args,
            within_group: None,
        }
    }

    pub fn within_group(mut self, order: ColumnRef, direction: SortDirection) -> Self {
        self.within_group = Some(WithinGroup { order, direction });
        self
    }

    pub fn arg_types(&self) -> Vec<Option<SqlType>> {
        self.args
            .iter()
            .map(|arg| match arg {
                AggregateArg::Column(col) => Some(col.ty),
                AggregateArg::Literal(datum) => datum.sql_type(),
            })
            .collect()
    }

    fn column(&self, position: usize) -> Result<&ColumnRef, FunctionError> {
        match self.args.get(position) {
            Some(AggregateArg::Column(col)) => Ok(col),
            Some(AggregateArg::Literal(_)) => Err(self.type_error(position, "expected a column")),
            None => Err(self.type_error(position, "missing argument")),
        }
    }

    /// Optional positive offset literal; absent means no offset.
    fn offset(&self, position: usize) -> Result<i32, FunctionError> {
        match self.args.get(position) {
            None => Ok(0),
            Some(AggregateArg::Literal(Datum::Number(NumericValue::Exact(d)))) => {
                let n = d
                    .to_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .ok_or_else(|| self.type_error(position, "offset out of range"))?;
                if n < 1 {
                    return Err(AggregateError::InvalidOffset(n).into());
                }
                Ok(n)
            }
            Some(_) => Err(self.type_error(position, "offset must be an integer literal")),
        }
    }

    fn type_error(&self, position: usize, detail: &str) -> FunctionError {
        FunctionError::ArgumentType {
            name: self.name.clone(),
            position,
            detail: detail.to_string(),
        }
    }
}

fn order_stat_by(call: &AggregateCall, first: bool) -> Result<OrderStatSpec, FunctionError> {
    let value = call.column(0)?;
    let order = call.column(1)?;
    Ok(OrderStatSpec {
        value: value.expr,
        order: order.expr,
        direction: effective_direction(first, SortDirection::Asc, order.storage),
        offset: call.offset(2)?,
    })
}

fn order_stat_within(call: &AggregateCall, first: bool) -> Result<OrderStatSpec, FunctionError> {
    let value = call.column(0)?;
    let Some(group) = call.within_group else {
        return Err(call.type_error(0, "requires WITHIN GROUP (ORDER BY ..)"));
    };
    Ok(OrderStatSpec {
        value: value.expr,
        order: group.order.expr,
        direction: effective_direction(first, group.direction, group.order.storage),
        offset: call.offset(1)?,
    })
}

fn numeric_input(call: &AggregateCall) -> Result<(ExprId, NumericType), FunctionError> {
    let col = call.column(0)?;
    match col.ty {
        SqlType::Numeric(n) => Ok((col.expr, n)),
        _ => Err(call.type_error(0, "expected a numeric column")),
    }
}

pub fn plan_first_by(call: &AggregateCall) -> Result<AggregateOpSpec, FunctionError> {
    order_stat_by(call, true).map(AggregateOpSpec::FirstBy)
}

pub fn plan_last_by(call: &AggregateCall) -> Result<AggregateOpSpec, FunctionError> {
    order_stat_by(call, false).map(AggregateOpSpec::LastBy)
}

pub fn plan_first_value(call: &AggregateCall) -> Result<AggregateOpSpec, FunctionError> {
    order_stat_within(call, true).map(AggregateOpSpec::FirstValue)
}

pub fn plan_last_value(call: &AggregateCall) -> Result<AggregateOpSpec, FunctionError> {
    order_stat_within(call, false).map(AggregateOpSpec::LastValue)
}

pub fn plan_sum(call: &AggregateCall) -> Result<AggregateOpSpec, FunctionError> {
    let (value, input) = numeric_input(call)?;
    Ok(AggregateOpSpec::Sum { value, input })
}

pub fn plan_avg(call: &AggregateCall) -> Result<AggregateOpSpec, FunctionError> {
    let (value, input) = numeric_input(call)?;
    Ok(AggregateOpSpec::Avg { value, input })
}
