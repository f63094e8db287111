// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hashing of values, consistent with their canonical order.
//!
//! Any two values which compare as equal produce the same hash for every [`Hasher`]. This makes
//! [`Value`] usable as a key in hash maps and sets, even when maps with the same entries were
//! built in different order.
use std::hash::{Hash as StdHash, Hasher};

use crate::ordering::canonical_double;
use crate::value::{FieldEntry, GeoPoint, MapValue, Value};

/// Feeds the value into the given hasher.
///
/// The type tag of the value is written first, followed by its contents. Maps are written in
/// canonical entry order, prefixed by their number of entries.
pub fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    state.write_u8(value.value_type().tag());

    match value {
        Value::Null => (),
        Value::Boolean(value) => value.hash(state),
        Value::Integer(value) => value.hash(state),
        Value::Double(value) => hash_double(*value, state),
        Value::Timestamp(value) => value.hash(state),
        Value::String(value) => value.hash(state),
        Value::Bytes(value) => value.hash(state),
        Value::Reference(value) => value.hash(state),
        Value::GeoPoint(value) => value.hash(state),
        Value::Array(values) => {
            state.write_usize(values.len());
            for value in values {
                hash_value(value, state);
            }
        }
        Value::Map(map) => hash_map(map, state),
    }
}

fn hash_map<H: Hasher>(map: &MapValue, state: &mut H) {
    let entries = map.sorted_entries();

    state.write_usize(entries.len());
    for entry in entries {
        entry.hash(state);
    }
}

fn hash_double<H: Hasher>(value: f64, state: &mut H) {
    state.write_u64(canonical_double(value).to_bits());
}

impl StdHash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_value(self, state);
    }
}

impl StdHash for FieldEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        hash_value(&self.value, state);
    }
}

impl StdHash for MapValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_map(self, state);
    }
}

impl StdHash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_double(self.latitude, state);
        hash_double(self.longitude, state);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use crate::value::{GeoPoint, MapValue, Timestamp, Value};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    fn map(entries: &[(&str, Value)]) -> Value {
        Value::Map(entries.iter().cloned().collect())
    }

    #[test]
    fn equal_values_hash_equal() {
        let values = vec![
            Value::Null,
            Value::Boolean(true),
            Value::Integer(42),
            Value::Double(5.0),
            Value::Timestamp(Timestamp {
                seconds: 1,
                nanos: 2,
            }),
            Value::from("string"),
            Value::Bytes(b"bytes".to_vec()),
            Value::reference("a/b"),
            Value::GeoPoint(GeoPoint {
                latitude: 1.0,
                longitude: 2.0,
            }),
            Value::Array(vec![1.into(), "two".into()]),
            map(&[("key", 42.into()), ("other", Value::Null)]),
        ];

        for value in values {
            assert_eq!(hash_of(&value), hash_of(&value.clone()));
        }
    }

    #[test]
    fn map_entry_order_is_ignored() {
        let left = map(&[
            ("a", 1.into()),
            ("b", map(&[("x", true.into()), ("y", false.into())])),
            ("c", "three".into()),
        ]);
        let right = map(&[
            ("c", "three".into()),
            ("a", 1.into()),
            ("b", map(&[("y", false.into()), ("x", true.into())])),
        ]);

        assert_eq!(left, right);
        assert_eq!(hash_of(&left), hash_of(&right));
    }

    #[test]
    fn duplicate_keys() {
        let left = map(&[("k", 1.into()), ("k", 2.into())]);
        let right = map(&[("k", 2.into()), ("k", 1.into())]);
        assert_eq!(hash_of(&left), hash_of(&right));

        let twice = map(&[("k", 1.into()), ("k", 1.into())]);
        let once = map(&[("k", 1.into())]);
        assert_ne!(hash_of(&twice), hash_of(&once));
    }

    #[test]
    fn array_order_changes_hash() {
        let left = Value::Array(vec![1.into(), 2.into()]);
        let right = Value::Array(vec![2.into(), 1.into()]);
        assert_ne!(hash_of(&left), hash_of(&right));
    }

    #[test]
    fn types_are_distinguished() {
        assert_ne!(hash_of(&Value::from("a/b")), hash_of(&Value::reference("a/b")));
        assert_ne!(hash_of(&Value::from("ab")), hash_of(&Value::Bytes(b"ab".to_vec())));
        assert_ne!(hash_of(&Value::Integer(0)), hash_of(&Value::Boolean(false)));
    }

    #[test]
    fn byte_boundaries_are_unambiguous() {
        let left = Value::Array(vec!["ab".into(), "c".into()]);
        let right = Value::Array(vec!["a".into(), "bc".into()]);
        assert_ne!(hash_of(&left), hash_of(&right));

        let left = map(&[("ab", "c".into())]);
        let right = map(&[("a", "bc".into())]);
        assert_ne!(hash_of(&left), hash_of(&right));
    }

    #[test]
    fn nan_and_signed_zero() {
        assert_eq!(
            hash_of(&Value::Double(f64::NAN)),
            hash_of(&Value::Double(-f64::NAN))
        );
        assert_eq!(hash_of(&Value::Double(-0.0)), hash_of(&Value::Double(0.0)));
    }

    #[test]
    fn values_in_hash_set() {
        let mut set = HashSet::new();
        assert!(set.insert(map(&[("a", 1.into()), ("b", 2.into())])));
        assert!(!set.insert(map(&[("b", 2.into()), ("a", 1.into())])));
        assert!(set.insert(map(&[("a", 2.into()), ("b", 1.into())])));
        assert!(set.insert(Value::Double(f64::NAN)));
        assert!(!set.insert(Value::Double(f64::NAN)));

        assert_eq!(set.len(), 3);

        let map_value: MapValue = [("b", 2), ("a", 1)].into_iter().collect();
        assert!(set.contains(&Value::Map(map_value)));
    }
}
