//! Setter inputs and the per-kind coercion table.
//!
//! Every function here is total: input that does not parse degrades to the
//! kind's zero value (or clears the attribute) instead of failing. Callers rely
//! on attribute writes always succeeding.

use super::raw_value::{RawNumber, RawValue};
use super::types::AttributeKind;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use smol_str::SmolStr;
use std::fmt;

// ─── AttributeInput ─────────────────────────────────────────────────────────

/// Anything a setter accepts.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AttributeInput {
    #[default]
    Nil,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Time(DateTime<Utc>),
}

impl AttributeInput {
    pub fn is_nil(&self) -> bool {
        matches!(self, AttributeInput::Nil)
    }

    /// Nil, or a string that is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        match self {
            AttributeInput::Nil => true,
            AttributeInput::Str(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Renders the input verbatim; this is what `*_before_type_cast` reports.
impl fmt::Display for AttributeInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeInput::Nil => Ok(()),
            AttributeInput::Str(s) => f.write_str(s),
            AttributeInput::Int(i) => write!(f, "{i}"),
            AttributeInput::Float(v) => f.write_str(&format_float(*v)),
            AttributeInput::Bool(b) => write!(f, "{b}"),
            AttributeInput::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        }
    }
}

impl From<&str> for AttributeInput {
    fn from(s: &str) -> Self {
        AttributeInput::Str(s.to_owned())
    }
}

impl From<String> for AttributeInput {
    fn from(s: String) -> Self {
        AttributeInput::Str(s)
    }
}

impl From<&String> for AttributeInput {
    fn from(s: &String) -> Self {
        AttributeInput::Str(s.clone())
    }
}

impl From<SmolStr> for AttributeInput {
    fn from(s: SmolStr) -> Self {
        AttributeInput::Str(s.to_string())
    }
}

impl From<i64> for AttributeInput {
    fn from(n: i64) -> Self {
        AttributeInput::Int(n)
    }
}

impl From<i32> for AttributeInput {
    fn from(n: i32) -> Self {
        AttributeInput::Int(n.into())
    }
}

impl From<u32> for AttributeInput {
    fn from(n: u32) -> Self {
        AttributeInput::Int(n.into())
    }
}

impl From<f64> for AttributeInput {
    fn from(n: f64) -> Self {
        AttributeInput::Float(n)
    }
}

impl From<bool> for AttributeInput {
    fn from(b: bool) -> Self {
        AttributeInput::Bool(b)
    }
}

impl From<DateTime<Utc>> for AttributeInput {
    fn from(t: DateTime<Utc>) -> Self {
        AttributeInput::Time(t)
    }
}

impl<T: Into<AttributeInput>> From<Option<T>> for AttributeInput {
    fn from(v: Option<T>) -> Self {
        v.map_or(AttributeInput::Nil, Into::into)
    }
}

impl From<()> for AttributeInput {
    fn from(_: ()) -> Self {
        AttributeInput::Nil
    }
}

// ─── Coercion table ─────────────────────────────────────────────────────────

/// Coerce a setter input into the value stored for `kind`.
///
/// `None` means the attribute is cleared (its key removed from the raw
/// mapping).
pub fn cast(kind: AttributeKind, input: &AttributeInput, ts_format: SecondsFormat) -> Option<RawValue> {
    if input.is_nil() {
        return None;
    }
    match kind {
        AttributeKind::Boolean => Some(RawValue::Bool(cast_boolean(input))),
        _ if input.is_blank() => None,
        AttributeKind::String => Some(RawValue::Str(cast_string(input))),
        AttributeKind::Integer => Some(RawValue::from(cast_integer(input))),
        AttributeKind::Float => Some(RawValue::from(cast_float(input))),
        AttributeKind::Timestamp => {
            cast_timestamp(input).map(|t| RawValue::from(t.to_rfc3339_opts(ts_format, true)))
        }
    }
}

pub fn cast_string(input: &AttributeInput) -> SmolStr {
    match input {
        AttributeInput::Str(s) => SmolStr::from(s.as_str()),
        other => SmolStr::from(other.to_string()),
    }
}

pub fn cast_integer(input: &AttributeInput) -> i64 {
    match input {
        AttributeInput::Nil => 0,
        AttributeInput::Int(i) => *i,
        AttributeInput::Float(f) => finite_or_zero(*f).trunc() as i64,
        AttributeInput::Bool(b) => *b as i64,
        AttributeInput::Str(s) => parse_integer(s),
        AttributeInput::Time(t) => t.timestamp(),
    }
}

pub fn cast_float(input: &AttributeInput) -> f64 {
    match input {
        AttributeInput::Nil => 0.0,
        AttributeInput::Int(i) => *i as f64,
        AttributeInput::Float(f) => finite_or_zero(*f),
        AttributeInput::Bool(b) => f64::from(u8::from(*b)),
        AttributeInput::Str(s) => leading_float(s),
        AttributeInput::Time(t) => unix_seconds(t),
    }
}

pub fn cast_boolean(input: &AttributeInput) -> bool {
    match input {
        AttributeInput::Nil => false,
        AttributeInput::Int(i) => *i != 0,
        AttributeInput::Float(f) => *f != 0.0,
        AttributeInput::Bool(b) => *b,
        AttributeInput::Str(s) => parse_boolean(s),
        AttributeInput::Time(_) => true,
    }
}

/// `None` when the input does not describe an instant.
pub fn cast_timestamp(input: &AttributeInput) -> Option<DateTime<Utc>> {
    match input {
        AttributeInput::Time(t) => Some(*t),
        AttributeInput::Str(s) => parse_timestamp(s),
        AttributeInput::Int(i) => DateTime::from_timestamp(*i, 0),
        AttributeInput::Float(f) => from_unix_seconds(*f),
        AttributeInput::Nil | AttributeInput::Bool(_) => None,
    }
}

// ─── Read-side coercion (stored value → typed value) ────────────────────────

pub fn read_string(raw: &RawValue) -> Option<String> {
    match raw {
        RawValue::Str(s) => Some(s.to_string()),
        RawValue::Bool(b) => Some(b.to_string()),
        RawValue::Number(RawNumber::F64(f)) => Some(format_float(*f)),
        RawValue::Number(RawNumber::I64(i)) => Some(i.to_string()),
        RawValue::Number(RawNumber::U64(u)) => Some(u.to_string()),
        _ => None,
    }
}

pub fn read_integer(raw: &RawValue) -> Option<i64> {
    match raw {
        RawValue::Number(n) => Some(n.trunc_i64()),
        RawValue::Str(s) => Some(parse_integer(s)),
        RawValue::Bool(b) => Some(*b as i64),
        _ => None,
    }
}

pub fn read_float(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Number(n) => Some(n.as_f64()),
        RawValue::Str(s) => Some(leading_float(s)),
        RawValue::Bool(b) => Some(f64::from(u8::from(*b))),
        _ => None,
    }
}

pub fn read_boolean(raw: &RawValue) -> Option<bool> {
    match raw {
        RawValue::Bool(b) => Some(*b),
        RawValue::Number(n) => Some(!n.is_zero()),
        RawValue::Str(s) => Some(parse_boolean(s)),
        _ => None,
    }
}

pub fn read_timestamp(raw: &RawValue) -> Option<DateTime<Utc>> {
    match raw {
        RawValue::Str(s) => parse_timestamp(s),
        RawValue::Number(RawNumber::F64(f)) => from_unix_seconds(*f),
        RawValue::Number(n) => DateTime::from_timestamp(n.trunc_i64(), 0),
        _ => None,
    }
}

// ─── Parsing helpers ────────────────────────────────────────────────────────

/// Strings that read as `false`. Anything else non-nil is `true`.
const FALSE_STRINGS: &[&str] = &["", "0", "f", "false", "n", "no", "off"];

fn parse_boolean(s: &str) -> bool {
    let s = s.trim();
    !FALSE_STRINGS.iter().any(|f| s.eq_ignore_ascii_case(f))
}

fn parse_integer(s: &str) -> i64 {
    // Plain integers keep full i64 precision; everything else goes through
    // the float prefix and is truncated.
    match s.trim().parse::<i64>() {
        Ok(i) => i,
        Err(_) => leading_float(s).trunc() as i64,
    }
}

/// XML-schema date-times. A missing offset means UTC and a bare date is
/// midnight.
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    if let Some(t) = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(t.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

/// Parse the leading numeric portion of `s`: `"5.5kg"` is 5.5, `"abc"` is 0.
///
/// Accepts leading whitespace, a sign, digits, a fraction and an exponent.
/// Values that overflow to infinity read as 0.
pub fn leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') && bytes.get(end + 1).is_some_and(u8::is_ascii_digit) {
        end = digits_from(end + 1);
        has_digits = true;
    }
    if !has_digits {
        return 0.0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().map_or(0.0, finite_or_zero)
}

/// NaN and the infinities count as non-numeric.
#[inline]
fn finite_or_zero(f: f64) -> f64 {
    if f.is_finite() { f } else { 0.0 }
}

fn unix_seconds(t: &DateTime<Utc>) -> f64 {
    t.timestamp() as f64 + f64::from(t.timestamp_subsec_nanos()) / 1e9
}

fn from_unix_seconds(f: f64) -> Option<DateTime<Utc>> {
    if !f.is_finite() {
        return None;
    }
    let secs = f.floor();
    let nanos = ((f - secs) * 1e9).round() as u32;
    DateTime::from_timestamp(secs as i64, nanos.min(999_999_999))
}

/// Floats always carry a fractional part when rendered: `5.0`, not `5`.
pub fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}
