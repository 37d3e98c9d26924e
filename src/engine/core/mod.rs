pub mod arithmetic;
pub mod codec;
pub mod decimal;
pub mod read;
