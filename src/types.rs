use super::error::AttributeError;
use super::raw_value::RawValue;
use chrono::SecondsFormat;
use rustc_hash::FxHasher;
use smol_str::SmolStr;
use std::collections::{BTreeMap, HashSet};
use std::hash::BuildHasherDefault;

pub type FastMap<K, V> = std::collections::HashMap<K, V, BuildHasherDefault<FxHasher>>;
pub type FastHashSet<T> = HashSet<T, BuildHasherDefault<FxHasher>>;

/// Decoded contents of a blob. Sorted, so encoding and change keys are
/// deterministic.
pub type RawMap = BTreeMap<SmolStr, RawValue>;

// ─── Attribute Kinds ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    String,
    Integer,
    Float,
    Boolean,
    Timestamp,
}

impl AttributeKind {
    pub fn name(self) -> &'static str {
        match self {
            AttributeKind::String => "string",
            AttributeKind::Integer => "integer",
            AttributeKind::Float => "float",
            AttributeKind::Boolean => "boolean",
            AttributeKind::Timestamp => "timestamp",
        }
    }

    /// What `*_before_type_cast` reports for an attribute that was never set.
    pub fn unset_before_type_cast(self) -> &'static str {
        match self {
            AttributeKind::Boolean => "0",
            _ => "",
        }
    }
}

// ─── Schema ─────────────────────────────────────────────────────────────────

/// A single declared attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeDef {
    pub name: &'static str,
    pub kind: AttributeKind,
}

impl AttributeDef {
    pub const fn new(name: &'static str, kind: AttributeKind) -> Self {
        Self { name, kind }
    }
}

/// The ordered attribute declarations of one record type.
///
/// Built once, usually by [`serialized_attributes!`](crate::serialized_attributes),
/// and never mutated afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub attributes: &'static [AttributeDef],
}

impl Schema {
    pub const fn new(name: &'static str, attributes: &'static [AttributeDef]) -> Self {
        Self { name, attributes }
    }

    pub fn kind_of(&self, name: &str) -> Option<AttributeKind> {
        self.attributes
            .iter()
            .find(|def| def.name == name)
            .map(|def| def.kind)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Reject empty and duplicate attribute names.
    pub fn validate(&self) -> Result<(), AttributeError> {
        let mut seen = FastHashSet::default();
        for def in self.attributes {
            if def.name.is_empty() {
                return Err(AttributeError::InvalidSchema(format!(
                    "{}: empty attribute name",
                    self.name
                )));
            }
            if !seen.insert(def.name) {
                return Err(AttributeError::InvalidSchema(format!(
                    "{}: attribute `{}` declared twice",
                    self.name, def.name
                )));
            }
        }
        Ok(())
    }
}

// ─── Configuration ──────────────────────────────────────────────────────────

/// Serialization format of the blob column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlobFormat {
    #[default]
    Cbor,
    Json,
}

/// Per-store settings. `AttributeConfig::default()` is CBOR blobs and
/// timestamps rendered at full precision.
#[derive(Debug, Clone, Copy)]
pub struct AttributeConfig {
    pub format: BlobFormat,
    /// Precision used when a timestamp is written into the raw mapping.
    pub timestamp_format: SecondsFormat,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            format: BlobFormat::Cbor,
            timestamp_format: SecondsFormat::AutoSi,
        }
    }
}
