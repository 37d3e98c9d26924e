use std::borrow::Cow;

use tracing::{debug, warn};

use crate::engine::core::codec::compression_codec::{FLAG_LZ4, FLAG_UNCOMPRESSED};
use crate::engine::core::codec::{BeSliceReader, ByteEncoder, CompressionCodec, Lz4Codec};
use crate::engine::core::read::aggregate::order_key::SortDirection;
use crate::engine::core::read::aggregate::state::{Extreme, OrderStatState};
use crate::engine::core::read::aggregate::top_k::TopK;
use crate::engine::errors::AggregateError;
use crate::shared::config::{AggregateConfig, CONFIG};

const HEADER_LEN: usize = 2;

/// Which decoder to apply; the caller knows it from the aggregate's
/// declared arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateLayout {
    NoOffset,
    WithOffset,
}

impl StateLayout {
    pub fn for_offset(offset: i32) -> Self {
        if offset == 0 {
            StateLayout::NoOffset
        } else {
            StateLayout::WithOffset
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WireOptions {
    pub compression_enabled: bool,
    pub compression_threshold_bytes: usize,
}

impl WireOptions {
    pub fn from_config(cfg: &AggregateConfig) -> Self {
        Self {
            compression_enabled: cfg.compression_enabled,
            compression_threshold_bytes: cfg.compression_threshold_bytes,
        }
    }

    pub fn uncompressed() -> Self {
        Self {
            compression_enabled: false,
            compression_threshold_bytes: usize::MAX,
        }
    }
}

impl Default for WireOptions {
    fn default() -> Self {
        Self::from_config(&CONFIG.aggregate)
    }
}

/// Encodes a partial state.
///
/// ```text
/// byte 0  compression flag (0 | 1)
/// byte 1  direction (0 = ASC, 1 = DESC)
/// no offset:   varint len + key, varint len + payload   (empty = no entry)
/// with offset: i32 BE offset, varint count, count x (key, payload) ascending
/// ```
pub fn serialize(state: &OrderStatState, options: &WireOptions) -> Vec<u8> {
    let mut body = Vec::new();
    match state {
        OrderStatState::NoOffset { best, .. } => {
            if let Some(entry) = best {
                ByteEncoder::encode_bytes(&entry.key, &mut body);
                ByteEncoder::encode_bytes(&entry.payload, &mut body);
            }
        }
        OrderStatState::WithOffset { offset, entries } => {
            ByteEncoder::encode_i32(*offset, &mut body);
            ByteEncoder::encode_varint(entries.len() as u64, &mut body);
            for (key, payload) in entries.iter() {
                ByteEncoder::encode_bytes(key, &mut body);
                ByteEncoder::encode_bytes(payload, &mut body);
            }
        }
    }

    let (flag, body) = maybe_compress(body, options);
    let mut out = Vec::with_capacity(HEADER_LEN + body.len());
    out.push(flag);
    out.push(state.direction().as_byte());
    out.extend_from_slice(&body);
    out
}

fn maybe_compress(body: Vec<u8>, options: &WireOptions) -> (u8, Vec<u8>) {
    if !options.compression_enabled || body.len() <= options.compression_threshold_bytes {
        return (FLAG_UNCOMPRESSED, body);
    }
    let compressed = Lz4Codec.compress(&body);
    if compressed.len() < body.len() {
        debug!(
            target: "kvsql::aggregate::wire",
            raw = body.len(),
            compressed = compressed.len(),
            "Compressing partial state"
        );
        (Lz4Codec.flag(), compressed)
    } else {
        (FLAG_UNCOMPRESSED, body)
    }
}

pub fn deserialize(bytes: &[u8], layout: StateLayout) -> Result<OrderStatState, AggregateError> {
    decode(bytes, layout).inspect_err(|e| {
        warn!(
            target: "kvsql::aggregate::wire",
            len = bytes.len(),
            error = %e,
            "Rejected partial state"
        );
    })
}

fn decode(bytes: &[u8], layout: StateLayout) -> Result<OrderStatState, AggregateError> {
    if bytes.len() < HEADER_LEN {
        return Err(corrupt(format!(
            "{} bytes is shorter than the header",
            bytes.len()
        )));
    }
    let direction = SortDirection::from_byte(bytes[1])
        .ok_or_else(|| corrupt(format!("unknown direction byte {}", bytes[1])))?;
    let body: Cow<[u8]> = match bytes[0] {
        FLAG_UNCOMPRESSED => Cow::Borrowed(&bytes[HEADER_LEN..]),
        FLAG_LZ4 => Cow::Owned(Lz4Codec.decompress(&bytes[HEADER_LEN..])?),
        other => return Err(corrupt(format!("unknown compression flag {other}"))),
    };

    let mut reader = BeSliceReader::new(&body);
    let state = match layout {
        StateLayout::NoOffset => decode_no_offset(&mut reader, direction)?,
        StateLayout::WithOffset => decode_with_offset(&mut reader, direction)?,
    };
    if !reader.is_empty() {
        return Err(corrupt(format!("{} trailing bytes", reader.remaining())));
    }
    Ok(state)
}

fn decode_no_offset(
    reader: &mut BeSliceReader<'_>,
    direction: SortDirection,
) -> Result<OrderStatState, AggregateError> {
    if reader.is_empty() {
        return Ok(OrderStatState::NoOffset {
            direction,
            best: None,
        });
    }
    let key = reader
        .read_bytes()
        .ok_or_else(|| corrupt("truncated order key".into()))?;
    let payload = reader
        .read_bytes()
        .ok_or_else(|| corrupt("truncated payload".into()))?;
    Ok(OrderStatState::NoOffset {
        direction,
        best: Some(Extreme {
            key: key.to_vec(),
            payload: payload.to_vec(),
        }),
    })
}

fn decode_with_offset(
    reader: &mut BeSliceReader<'_>,
    direction: SortDirection,
) -> Result<OrderStatState, AggregateError> {
    let offset = reader
        .read_i32()
        .ok_or_else(|| corrupt("truncated offset".into()))?;
    if offset <= 0 {
        return Err(corrupt(format!("offset {offset} is not positive")));
    }
    let count = reader
        .read_varint()
        .ok_or_else(|| corrupt("truncated entry count".into()))?;
    if count > offset as u64 {
        return Err(corrupt(format!("{count} entries exceed offset {offset}")));
    }

    let mut entries = TopK::new(offset as usize, direction);
    let mut previous: Option<(&[u8], &[u8])> = None;
    for i in 0..count {
        let key = reader
            .read_bytes()
            .ok_or_else(|| corrupt(format!("truncated key of entry {i}")))?;
        let payload = reader
            .read_bytes()
            .ok_or_else(|| corrupt(format!("truncated payload of entry {i}")))?;
        if previous.is_some_and(|prev| prev > (key, payload)) {
            return Err(corrupt(format!("entry {i} is out of order")));
        }
        previous = Some((key, payload));
        entries.observe(key.to_vec(), payload.to_vec());
    }
    Ok(OrderStatState::WithOffset { offset, entries })
}

fn corrupt(msg: String) -> AggregateError {
    AggregateError::CorruptPartialState(msg)
}
