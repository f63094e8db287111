// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical total order over [`Value`].
//!
//! Values of different types are ordered by their [`ValueType`] alone. Values of the same type
//! are ordered by their contents:
//!
//! - strings, references and bytes compare byte-wise
//! - arrays and maps with fewer items always come first, regardless of their contents; if the
//!   sizes match, arrays compare item by item in stored order and maps compare entry by entry in
//!   canonical order
//! - doubles compare after mapping every NaN to one canonical NaN and `-0.0` to `0.0`, using the
//!   IEEE 754 total order. This makes all NaNs equal to each other and greater than any other
//!   double
//!
//! This order is meant for sorting, deduplication and lookups in local data structures and is
//! not the order in which query results are presented to users.
//!
//! [`ValueType`]: crate::ValueType
use std::cmp::Ordering;

use crate::value::{FieldEntry, GeoPoint, MapValue, Value};

/// Compares two values of any type.
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Boolean(left), Value::Boolean(right)) => left.cmp(right),
        (Value::Integer(left), Value::Integer(right)) => left.cmp(right),
        (Value::Double(left), Value::Double(right)) => compare_doubles(*left, *right),
        (Value::Timestamp(left), Value::Timestamp(right)) => left.cmp(right),
        (Value::String(left), Value::String(right)) => left.as_bytes().cmp(right.as_bytes()),
        (Value::Bytes(left), Value::Bytes(right)) => left.cmp(right),
        (Value::Reference(left), Value::Reference(right)) => {
            left.as_bytes().cmp(right.as_bytes())
        }
        (Value::GeoPoint(left), Value::GeoPoint(right)) => compare_geo_points(left, right),
        (Value::Array(left), Value::Array(right)) => compare_arrays(left, right),
        (Value::Map(left), Value::Map(right)) => compare_maps(left, right),
        _ => left.value_type().cmp(&right.value_type()),
    }
}

/// Compares two field entries by key first and by value second.
///
/// Two distinct entries with the same key and an equal value are equal.
pub fn compare_entries(left: &FieldEntry, right: &FieldEntry) -> Ordering {
    left.key
        .as_bytes()
        .cmp(right.key.as_bytes())
        .then_with(|| compare_values(&left.value, &right.value))
}

/// Compares two arrays.
///
/// The shorter array comes first. Arrays of the same length are ordered by their first unequal
/// item.
pub fn compare_arrays(left: &[Value], right: &[Value]) -> Ordering {
    left.len().cmp(&right.len()).then_with(|| {
        left.iter()
            .zip(right)
            .map(|(left, right)| compare_values(left, right))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

/// Compares two maps independent of the order of their entries.
///
/// The map with fewer entries comes first. Maps of the same size are ordered by their first
/// unequal entry after both got sorted into canonical order.
pub fn compare_maps(left: &MapValue, right: &MapValue) -> Ordering {
    left.len().cmp(&right.len()).then_with(|| {
        let left = left.sorted_entries();
        let right = right.sorted_entries();

        left.iter()
            .zip(right.iter())
            .map(|(left, right)| compare_entries(left, right))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    })
}

/// Maps all NaNs to one NaN and negative zero to zero.
pub(crate) fn canonical_double(value: f64) -> f64 {
    if value.is_nan() {
        f64::NAN
    } else if value == 0.0 {
        0.0
    } else {
        value
    }
}

fn compare_doubles(left: f64, right: f64) -> Ordering {
    canonical_double(left).total_cmp(&canonical_double(right))
}

fn compare_geo_points(left: &GeoPoint, right: &GeoPoint) -> Ordering {
    compare_doubles(left.latitude, right.latitude)
        .then_with(|| compare_doubles(left.longitude, right.longitude))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        compare_values(self, other).is_eq()
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_values(self, other)
    }
}

impl PartialEq for FieldEntry {
    fn eq(&self, other: &Self) -> bool {
        compare_entries(self, other).is_eq()
    }
}

impl Eq for FieldEntry {}

impl PartialOrd for FieldEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FieldEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_entries(self, other)
    }
}

impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        compare_maps(self, other).is_eq()
    }
}

impl Eq for MapValue {}

impl PartialOrd for MapValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MapValue {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_maps(self, other)
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        compare_geo_points(self, other).is_eq()
    }
}

impl Eq for GeoPoint {}

impl PartialOrd for GeoPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GeoPoint {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_geo_points(self, other)
    }
}
