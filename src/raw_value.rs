use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use smol_str::SmolStr;
use std::collections::BTreeMap;
use std::convert::TryFrom;

// ─── RawNumber ──────────────────────────────────────────────────────────────

/// Numbers compare by value, except that NaN equals NaN so a decoded blob
/// never looks dirty against itself.
#[derive(Debug, Clone, Copy)]
pub enum RawNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl PartialEq for RawNumber {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RawNumber::I64(a), RawNumber::I64(b)) => a == b,
            (RawNumber::U64(a), RawNumber::U64(b)) => a == b,
            (RawNumber::F64(a), RawNumber::F64(b)) => a == b || (a.is_nan() && b.is_nan()),
            _ => false,
        }
    }
}

impl RawNumber {
    pub fn as_f64(self) -> f64 {
        match self {
            RawNumber::I64(i) => i as f64,
            RawNumber::U64(u) => u as f64,
            RawNumber::F64(f) => f,
        }
    }

    /// Integer view, truncating floats toward zero.
    pub fn trunc_i64(self) -> i64 {
        match self {
            RawNumber::I64(i) => i,
            RawNumber::U64(u) => i64::try_from(u).unwrap_or(i64::MAX),
            RawNumber::F64(f) => f.trunc() as i64,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            RawNumber::I64(i) => i == 0,
            RawNumber::U64(u) => u == 0,
            RawNumber::F64(f) => f == 0.0,
        }
    }
}

// ─── RawValue ───────────────────────────────────────────────────────────────

/// An untyped value as it sits in a decoded blob.
///
/// Declared attributes only ever store scalars. `Array` and `Object` exist so
/// that values written by other producers survive a decode/encode cycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    #[default]
    Null,
    Bool(bool),
    Number(RawNumber),
    Str(SmolStr),
    Array(Vec<RawValue>),
    Object(BTreeMap<SmolStr, RawValue>),
}

impl RawValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RawValue::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RawValue::Number(RawNumber::I64(i)) => Some(*i),
            RawValue::Number(RawNumber::U64(u)) => i64::try_from(*u).ok(),
            _ => None,
        }
    }
}

// ─── Serialize ──────────────────────────────────────────────────────────────

impl Serialize for RawValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawValue::Null => serializer.serialize_none(),
            RawValue::Bool(b) => serializer.serialize_bool(*b),
            RawValue::Number(n) => match n {
                RawNumber::I64(i) => serializer.serialize_i64(*i),
                RawNumber::U64(u) => serializer.serialize_u64(*u),
                RawNumber::F64(f) => serializer.serialize_f64(*f),
            },
            RawValue::Str(s) => serializer.serialize_str(s.as_str()),
            RawValue::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for v in arr {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            RawValue::Object(map) => {
                let mut m = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    m.serialize_entry(k.as_str(), v)?;
                }
                m.end()
            }
        }
    }
}

// ─── From impls ─────────────────────────────────────────────────────────────

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(RawNumber::F64(n))
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        RawValue::Number(RawNumber::I64(n))
    }
}

impl From<u64> for RawValue {
    fn from(n: u64) -> Self {
        RawValue::Number(RawNumber::U64(n))
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Str(SmolStr::from(s))
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Str(SmolStr::from(s))
    }
}

// ─── From cbor4ii::core::Value ──────────────────────────────────────────────

impl From<cbor4ii::core::Value> for RawValue {
    fn from(v: cbor4ii::core::Value) -> Self {
        match v {
            cbor4ii::core::Value::Null => RawValue::Null,
            cbor4ii::core::Value::Bool(b) => RawValue::Bool(b),
            cbor4ii::core::Value::Integer(i) => {
                if let Ok(val) = i64::try_from(i) {
                    RawValue::Number(RawNumber::I64(val))
                } else if let Ok(val) = u64::try_from(i) {
                    RawValue::Number(RawNumber::U64(val))
                } else {
                    RawValue::Number(RawNumber::F64(i as f64))
                }
            }
            cbor4ii::core::Value::Float(f) => RawValue::Number(RawNumber::F64(f)),
            cbor4ii::core::Value::Text(s) => RawValue::Str(SmolStr::from(s)),
            cbor4ii::core::Value::Array(arr) => {
                RawValue::Array(arr.into_iter().map(RawValue::from).collect())
            }
            cbor4ii::core::Value::Map(map) => RawValue::Object(
                map.into_iter()
                    .map(|(k, v)| {
                        let key = match k {
                            cbor4ii::core::Value::Text(s) => SmolStr::from(s),
                            cbor4ii::core::Value::Integer(i) => SmolStr::from(i.to_string()),
                            other => SmolStr::from(format!("{:?}", other)),
                        };
                        (key, RawValue::from(v))
                    })
                    .collect(),
            ),
            _ => RawValue::Null,
        }
    }
}

// ─── From serde_json::Value ─────────────────────────────────────────────────

impl From<serde_json::Value> for RawValue {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => RawValue::Null,
            serde_json::Value::Bool(b) => RawValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    RawValue::Number(RawNumber::I64(i))
                } else if let Some(u) = n.as_u64() {
                    RawValue::Number(RawNumber::U64(u))
                } else {
                    RawValue::Number(RawNumber::F64(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::String(s) => RawValue::Str(SmolStr::from(s)),
            serde_json::Value::Array(arr) => {
                RawValue::Array(arr.into_iter().map(RawValue::from).collect())
            }
            serde_json::Value::Object(obj) => RawValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (SmolStr::from(k), RawValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Build a [`RawMap`](crate::types::RawMap) from `key => value` pairs.
#[macro_export]
macro_rules! raw_map {
    ({ $($key:expr => $val:expr),* $(,)? }) => {{
        let mut map = $crate::types::RawMap::new();
        $(
            map.insert(
                $crate::smol_str::SmolStr::new($key),
                $crate::raw_value::RawValue::from($val),
            );
        )*
        map
    }};
}
