mod hex;
mod timezone;

pub use hex::hex_to_bytes;
pub use timezone::{convert_tz, timezone_offset};
