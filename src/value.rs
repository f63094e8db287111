// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recursive document field values.
//!
//! A [`Value`] is the content of one field of a document. Values can be nested through arrays
//! and maps, where maps are an _unordered_ collection of [`FieldEntry`] items which may contain
//! the same key more than once.
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Earliest second which can be represented by a checked [`Timestamp`]
/// (0001-01-01T00:00:00Z).
pub const MIN_TIMESTAMP_SECONDS: i64 = -62_135_596_800;

/// Latest second which can be represented by a checked [`Timestamp`]
/// (9999-12-31T23:59:59Z).
pub const MAX_TIMESTAMP_SECONDS: i64 = 253_402_300_799;

const NANOS_PER_SECOND: i32 = 1_000_000_000;

/// Value of a single document field.
///
/// Two values are equal when they are of the same type and have the same contents. Maps are
/// compared independent of the order of their entries, arrays are not.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// Null value.
    Null,

    /// Boolean value.
    Boolean(bool),

    /// 64-bit signed integer value.
    Integer(i64),

    /// 64-bit floating point value.
    Double(f64),

    /// Point in time with nanosecond precision.
    Timestamp(Timestamp),

    /// UTF-8 string value.
    String(String),

    /// Raw bytes.
    #[serde(with = "serde_bytes")]
    Bytes(Vec<u8>),

    /// Path to another document.
    Reference(String),

    /// Geographic location.
    GeoPoint(GeoPoint),

    /// Ordered list of values.
    Array(Vec<Value>),

    /// Unordered collection of field entries.
    Map(MapValue),
}

impl Value {
    /// Returns a reference to the document at the given path.
    pub fn reference(path: impl Into<String>) -> Self {
        Self::Reference(path.into())
    }

    /// Returns the type of this value.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Double(_) => ValueType::Double,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::String(_) => ValueType::String,
            Value::Bytes(_) => ValueType::Bytes,
            Value::Reference(_) => ValueType::Reference,
            Value::GeoPoint(_) => ValueType::GeoPoint,
            Value::Array(_) => ValueType::Array,
            Value::Map(_) => ValueType::Map,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Bytes(value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::Bytes(value.to_owned())
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Value::Timestamp(value)
    }
}

impl From<GeoPoint> for Value {
    fn from(value: GeoPoint) -> Self {
        Value::GeoPoint(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<MapValue> for Value {
    fn from(value: MapValue) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Value::Null,
        }
    }
}

/// Type of a [`Value`].
///
/// The variants are declared in precedence order: when two values of different types get
/// compared, the one whose type comes first is the smaller one, regardless of the contents.
///
/// Tags follow the field numbers of the document value wire format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ValueType {
    Boolean = 1,
    Integer = 2,
    Double = 3,
    Reference = 5,
    Map = 6,
    GeoPoint = 8,
    Array = 9,
    Timestamp = 10,
    Null = 11,
    String = 17,
    Bytes = 18,
}

impl ValueType {
    /// Returns the tag identifying this type.
    pub const fn tag(&self) -> u8 {
        *self as u8
    }

    /// Returns the string representation of this type.
    ///
    /// This is useful for composing error messages or debug logs.
    pub fn name(&self) -> &'static str {
        match self {
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Double => "double",
            ValueType::Reference => "reference",
            ValueType::Map => "map",
            ValueType::GeoPoint => "geo_point",
            ValueType::Array => "array",
            ValueType::Timestamp => "timestamp",
            ValueType::Null => "null",
            ValueType::String => "string",
            ValueType::Bytes => "bytes",
        }
    }
}

impl TryFrom<u8> for ValueType {
    type Error = ValueError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        let value_type = match tag {
            1 => ValueType::Boolean,
            2 => ValueType::Integer,
            3 => ValueType::Double,
            5 => ValueType::Reference,
            6 => ValueType::Map,
            8 => ValueType::GeoPoint,
            9 => ValueType::Array,
            10 => ValueType::Timestamp,
            11 => ValueType::Null,
            17 => ValueType::String,
            18 => ValueType::Bytes,
            _ => return Err(ValueError::UnknownValueType(tag)),
        };

        Ok(value_type)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Point in time, represented as seconds and nanoseconds since the UNIX epoch.
///
/// Timestamps are ordered by seconds first and nanoseconds second.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp {
    pub seconds: i64,
    pub nanos: i32,
}

impl Timestamp {
    /// Returns a timestamp after checking that it lies between 0001-01-01 and 9999-12-31 and
    /// that the nanoseconds do not exceed one second.
    pub fn new(seconds: i64, nanos: i32) -> Result<Self, ValueError> {
        if !(0..NANOS_PER_SECOND).contains(&nanos) {
            return Err(ValueError::InvalidNanos(nanos));
        }

        if !(MIN_TIMESTAMP_SECONDS..=MAX_TIMESTAMP_SECONDS).contains(&seconds) {
            return Err(ValueError::TimestampOutOfRange(seconds));
        }

        Ok(Self { seconds, nanos })
    }
}

/// Geographic location given by latitude and longitude in degrees.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Returns a geo point after checking that both coordinates are within their valid range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValueError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValueError::InvalidLatitude(latitude));
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValueError::InvalidLongitude(longitude));
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Single key/value pair of a [`MapValue`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldEntry {
    pub key: String,
    pub value: Value,
}

impl FieldEntry {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Map of field entries.
///
/// The order of entries is not significant for comparison and hashing. Entries are kept as they
/// were given: a map can contain multiple entries with the same key and none of them gets
/// dropped or overwritten.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MapValue(Vec<FieldEntry>);

impl MapValue {
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends an entry, even if another entry with the same key already exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.push(FieldEntry::new(key, value));
    }

    pub fn push(&mut self, entry: FieldEntry) {
        self.0.push(entry);
    }

    /// Returns the value of the first stored entry with the given key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Returns the entries in stored order.
    pub fn entries(&self) -> &[FieldEntry] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<FieldEntry> {
        self.0
    }

    /// Returns an iterator over the entries in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldEntry> {
        self.0.iter()
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Vec<FieldEntry> {
        &mut self.0
    }
}

impl From<Vec<FieldEntry>> for MapValue {
    fn from(entries: Vec<FieldEntry>) -> Self {
        Self(entries)
    }
}

impl<K, V> FromIterator<(K, V)> for MapValue
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| FieldEntry::new(key, value))
                .collect(),
        )
    }
}

impl FromIterator<FieldEntry> for MapValue {
    fn from_iter<I: IntoIterator<Item = FieldEntry>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a MapValue {
    type Item = &'a FieldEntry;
    type IntoIter = std::slice::Iter<'a, FieldEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Error types for values.
#[derive(Error, Debug, PartialEq)]
pub enum ValueError {
    /// Type tag does not belong to any known value type.
    #[error("unknown value type tag {0}")]
    UnknownValueType(u8),

    /// Nanoseconds of a timestamp need to be within `0..1_000_000_000`.
    #[error("invalid timestamp nanoseconds {0}, expected value between 0 and 999999999")]
    InvalidNanos(i32),

    /// Timestamp lies before 0001-01-01 or after 9999-12-31.
    #[error("timestamp seconds {0} out of range")]
    TimestampOutOfRange(i64),

    /// Latitude needs to be within `-90..=90` degrees.
    #[error("invalid latitude {0}, expected value between -90 and 90")]
    InvalidLatitude(f64),

    /// Longitude needs to be within `-180..=180` degrees.
    #[error("invalid longitude {0}, expected value between -180 and 180")]
    InvalidLongitude(f64),
}
