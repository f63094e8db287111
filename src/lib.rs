// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical ordering and hashing of recursive document field values.
//!
//! [`Value`] represents the content of a single document field: booleans, numbers, timestamps,
//! strings, bytes, references, geo points and arbitrarily nested arrays and maps. This crate
//! gives these values
//!
//! - a total order ([`Ord`]), with a fixed precedence between value types
//! - a [`Hash`](std::hash::Hash) implementation which is consistent with that order
//! - a stable BLAKE3 [`Digest`] for persistent indexes
//!
//! Maps are unordered: two maps holding the same entries in different order are equal and hash
//! the same. Maps may contain the same key more than once and are treated as a multiset of
//! entries, nothing gets dropped.
//!
//! ```
//! use p2panda_value::{MapValue, Value};
//!
//! let left: MapValue = [("a", 1), ("b", 2)].into_iter().collect();
//! let right: MapValue = [("b", 2), ("a", 1)].into_iter().collect();
//! assert_eq!(Value::Map(left.clone()).digest(), Value::Map(right.clone()).digest());
//! assert_eq!(left, right);
//!
//! // Values of different types are ordered by their type alone
//! assert!(Value::Boolean(true) < Value::Integer(42));
//! assert!(Value::Null < Value::from("x"));
//! ```
pub mod canonical;
pub mod cbor;
pub mod digest;
pub mod hash;
pub mod ordering;
#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
#[cfg(test)]
mod tests;
pub mod value;

pub use canonical::sorted_entries;
pub use cbor::{DecodeError, EncodeError, decode_snapshot, encode_snapshot};
pub use digest::{DIGEST_LEN, Digest, DigestHasher};
pub use hash::hash_value;
pub use ordering::{compare_arrays, compare_entries, compare_maps, compare_values};
pub use value::{FieldEntry, GeoPoint, MapValue, Timestamp, Value, ValueError, ValueType};
