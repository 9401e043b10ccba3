// ─── Error ──────────────────────────────────────────────────────────────────
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttributeError {
    /// The blob is not valid for its serialization format.
    #[error("Decode error: {0}")]
    Decode(String),
    #[error("Encode error: {0}")]
    Encode(String),
    #[error("Blob does not contain a map at the top level")]
    NotAMap,
    #[error("Blob map keys must be strings")]
    NonStringKey,
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(SmolStr),
    #[error("Invalid schema: {0}")]
    InvalidSchema(String),
}
