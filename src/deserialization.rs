use super::error::AttributeError;
use super::raw_value::RawValue;
use super::types::{BlobFormat, RawMap};
use smol_str::SmolStr;
use tracing::trace;

// ─── Reader ─────────────────────────────────────────────────────────────────

/// Decode a CBOR blob into a raw mapping.
///
/// An absent or zero-length blob decodes to an empty mapping. Anything that is
/// not a string-keyed map at the top level is rejected.
pub fn decode(blob: Option<&[u8]>) -> Result<RawMap, AttributeError> {
    decode_with(BlobFormat::Cbor, blob)
}

pub fn decode_with(format: BlobFormat, blob: Option<&[u8]>) -> Result<RawMap, AttributeError> {
    let data = match blob {
        Some(data) if !data.is_empty() => data,
        _ => return Ok(RawMap::new()),
    };
    let map = match format {
        BlobFormat::Cbor => decode_cbor(data)?,
        BlobFormat::Json => decode_json(data)?,
    };
    trace!(?format, fields = map.len(), bytes = data.len(), "decoded attribute blob");
    Ok(map)
}

fn decode_cbor(data: &[u8]) -> Result<RawMap, AttributeError> {
    let value: cbor4ii::core::Value =
        cbor4ii::serde::from_slice(data).map_err(|e| AttributeError::Decode(e.to_string()))?;
    let entries = match value {
        cbor4ii::core::Value::Map(entries) => entries,
        _ => return Err(AttributeError::NotAMap),
    };

    let mut map = RawMap::new();
    for (k, v) in entries {
        let key = match k {
            cbor4ii::core::Value::Text(s) => SmolStr::from(s),
            _ => return Err(AttributeError::NonStringKey),
        };
        map.insert(key, RawValue::from(v));
    }
    Ok(map)
}

fn decode_json(data: &[u8]) -> Result<RawMap, AttributeError> {
    let value: serde_json::Value =
        serde_json::from_slice(data).map_err(|e| AttributeError::Decode(e.to_string()))?;
    match value {
        serde_json::Value::Object(obj) => Ok(obj
            .into_iter()
            .map(|(k, v)| (SmolStr::from(k), RawValue::from(v)))
            .collect()),
        _ => Err(AttributeError::NotAMap),
    }
}
