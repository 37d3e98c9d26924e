use crate::engine::core::read::aggregate::order_key::SortDirection;
use crate::engine::core::read::aggregate::plan::OrderStatSpec;
use crate::engine::types::ExprId;

pub struct OrderStatSpecFactory {
    spec: OrderStatSpec,
}

impl OrderStatSpecFactory {
    pub fn new() -> Self {
        Self {
            spec: OrderStatSpec {
                value: ExprId(1),
                order: ExprId(2),
                direction: SortDirection::Asc,
                offset: 0,
            },
        }
    }

    pub fn with_direction(mut self, direction: SortDirection) -> Self {
        self.spec.direction = direction;
        self
    }

    pub fn with_offset(mut self, offset: i32) -> Self {
        self.spec.offset = offset;
        self
    }

    pub fn first() -> OrderStatSpec {
        Self::new().create()
    }

    pub fn last() -> OrderStatSpec {
        Self::new().with_direction(SortDirection::Desc).create()
    }

    pub fn create(self) -> OrderStatSpec {
        self.spec
    }
}
