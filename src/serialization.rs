use super::error::AttributeError;
use super::types::{BlobFormat, RawMap};
use tracing::trace;

// ─── Writer ─────────────────────────────────────────────────────────────────

/// Encode a raw mapping into a CBOR blob.
///
/// Encoding is structure preserving: every key is written, whether or not a
/// schema declares it, and values keep their scalar kind.
pub fn encode(map: &RawMap) -> Result<Vec<u8>, AttributeError> {
    encode_with(BlobFormat::Cbor, map)
}

pub fn encode_with(format: BlobFormat, map: &RawMap) -> Result<Vec<u8>, AttributeError> {
    let mut buf = Vec::with_capacity(map.len() * 16);
    encode_into(format, map, &mut buf)?;
    Ok(buf)
}

/// Encode into a reusable buffer.
///
/// Identical to `encode_with`, but reuses the caller's Vec when many records
/// are flushed in sequence. The buffer is cleared but retains its capacity.
pub fn encode_into(
    format: BlobFormat,
    map: &RawMap,
    buf: &mut Vec<u8>,
) -> Result<(), AttributeError> {
    buf.clear();
    match format {
        BlobFormat::Cbor => cbor4ii::serde::to_writer(&mut *buf, map)
            .map_err(|e| AttributeError::Encode(e.to_string()))?,
        BlobFormat::Json => serde_json::to_writer(&mut *buf, map)
            .map_err(|e| AttributeError::Encode(e.to_string()))?,
    }
    trace!(?format, fields = map.len(), bytes = buf.len(), "encoded attribute blob");
    Ok(())
}
