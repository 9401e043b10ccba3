//! Marker types naming each attribute kind at the type level.
//!
//! `serialized_attributes!` resolves the kind written next to each field
//! (`title: String`, `age: Integer`, ...) to one of these markers, which fixes
//! the Rust type its accessors return.

use super::cast;
use super::raw_value::RawValue;
use super::types::AttributeKind;
use chrono::{DateTime, Utc};

pub trait AttributeType {
    /// The Rust type the getter returns.
    type Value: Clone + PartialEq + std::fmt::Debug;

    const KIND: AttributeKind;

    /// Read a stored value back as `Self::Value`.
    fn from_raw(raw: &RawValue) -> Option<Self::Value>;
}

pub enum String {}
pub enum Integer {}
pub enum Float {}
pub enum Boolean {}
pub enum Timestamp {}

impl AttributeType for String {
    type Value = std::string::String;
    const KIND: AttributeKind = AttributeKind::String;

    #[inline]
    fn from_raw(raw: &RawValue) -> Option<Self::Value> {
        cast::read_string(raw)
    }
}

impl AttributeType for Integer {
    type Value = i64;
    const KIND: AttributeKind = AttributeKind::Integer;

    #[inline]
    fn from_raw(raw: &RawValue) -> Option<Self::Value> {
        cast::read_integer(raw)
    }
}

impl AttributeType for Float {
    type Value = f64;
    const KIND: AttributeKind = AttributeKind::Float;

    #[inline]
    fn from_raw(raw: &RawValue) -> Option<Self::Value> {
        cast::read_float(raw)
    }
}

impl AttributeType for Boolean {
    type Value = bool;
    const KIND: AttributeKind = AttributeKind::Boolean;

    #[inline]
    fn from_raw(raw: &RawValue) -> Option<Self::Value> {
        cast::read_boolean(raw)
    }
}

impl AttributeType for Timestamp {
    type Value = DateTime<Utc>;
    const KIND: AttributeKind = AttributeKind::Timestamp;

    #[inline]
    fn from_raw(raw: &RawValue) -> Option<Self::Value> {
        cast::read_timestamp(raw)
    }
}

// ─── TypedValue ─────────────────────────────────────────────────────────────

/// A typed attribute value when the kind is only known at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    String(std::string::String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

impl TypedValue {
    pub fn from_raw(kind: AttributeKind, raw: &RawValue) -> Option<Self> {
        match kind {
            AttributeKind::String => String::from_raw(raw).map(TypedValue::String),
            AttributeKind::Integer => Integer::from_raw(raw).map(TypedValue::Integer),
            AttributeKind::Float => Float::from_raw(raw).map(TypedValue::Float),
            AttributeKind::Boolean => Boolean::from_raw(raw).map(TypedValue::Boolean),
            AttributeKind::Timestamp => Timestamp::from_raw(raw).map(TypedValue::Timestamp),
        }
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            TypedValue::String(_) => AttributeKind::String,
            TypedValue::Integer(_) => AttributeKind::Integer,
            TypedValue::Float(_) => AttributeKind::Float,
            TypedValue::Boolean(_) => AttributeKind::Boolean,
            TypedValue::Timestamp(_) => AttributeKind::Timestamp,
        }
    }
}
