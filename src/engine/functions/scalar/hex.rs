use crate::engine::errors::FunctionError;
use crate::engine::functions::datum::Datum;

/// `HEX_TO_BYTES(varchar) -> varbinary`; either digit case is accepted.
pub fn hex_to_bytes(args: &[Datum]) -> Result<Datum, FunctionError> {
    let [Datum::Text(text)] = args else {
        return Err(FunctionError::InvalidOperandEncoding(
            "HEX_TO_BYTES expects one varchar".to_string(),
        ));
    };
    hex::decode(text)
        .map(Datum::Bytes)
        .map_err(|e| FunctionError::InvalidOperandEncoding(format!("'{text}': {e}")))
}
