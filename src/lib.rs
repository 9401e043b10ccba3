//! Typed, dirty-tracked attributes stored in a single serialized blob.
//!
//! A record declares its attributes once with [`serialized_attributes!`]; the
//! values live in one blob column (CBOR by default, JSON optionally). Reads
//! and writes go through a decoded raw mapping, setters coerce loosely typed
//! input, and change tracking compares against the mapping as last loaded or
//! flushed.

#[macro_use]
mod macros;

pub mod attribute_store;
pub mod cast;
pub mod deserialization;
pub mod error;
pub mod kind;
pub mod raw_value;
pub mod record;
pub mod serialization;
pub mod types;

pub use attribute_store::{AttributeStore, Changes, RawChange};
pub use cast::AttributeInput;
pub use deserialization::{decode, decode_with};
pub use error::AttributeError;
pub use kind::{AttributeType, TypedValue};
pub use raw_value::{RawNumber, RawValue};
pub use record::{BlobRecord, SerializedRecord};
pub use serialization::{encode, encode_into, encode_with};
pub use types::{AttributeConfig, AttributeDef, AttributeKind, BlobFormat, RawMap, Schema};

#[doc(hidden)]
pub use paste;
#[doc(hidden)]
pub use smol_str;
