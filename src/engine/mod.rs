pub mod core;
pub mod errors;
pub mod functions;
pub mod types;

pub use errors::*;
