mod codec;
mod decimal;
mod parse;

pub use decimal::{Decimal, MAX_SCALE};
