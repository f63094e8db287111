// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strategies and helpers for testing code which compares or hashes values.
use proptest::collection::vec;
use proptest::prelude::*;

use crate::value::{FieldEntry, GeoPoint, MapValue, Timestamp, Value};

/// Installs a `tracing` subscriber printing to stdout when `RUST_LOG` is set.
pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_ok() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }
}

/// Generates scalar values of every type, including NaN and signed zero doubles.
pub fn arb_scalar() -> impl Strategy<Value = Value> {
    // Small alphabets make equal strings, keys and bytes likely
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Boolean),
        (-3i64..3).prop_map(Value::Integer),
        any::<i64>().prop_map(Value::Integer),
        prop_oneof![
            Just(f64::NAN),
            Just(-f64::NAN),
            Just(0.0),
            Just(-0.0),
            Just(f64::INFINITY),
            any::<f64>(),
        ]
        .prop_map(Value::Double),
        (-2i64..2, 0i32..3).prop_map(|(seconds, nanos)| Value::Timestamp(Timestamp {
            seconds,
            nanos
        })),
        "[ab]{0,3}".prop_map(Value::String),
        vec(0u8..3, 0..3).prop_map(Value::Bytes),
        "[ab]/[ab]".prop_map(Value::Reference),
        (-1i8..2, -1i8..2).prop_map(|(latitude, longitude)| Value::GeoPoint(GeoPoint {
            latitude: latitude.into(),
            longitude: longitude.into(),
        })),
    ]
}

/// Generates nested values, maps may contain duplicate keys.
pub fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(Value::Array),
            vec(("[abc]", inner), 0..4).prop_map(|entries| {
                Value::Map(
                    entries
                        .into_iter()
                        .map(|(key, value)| FieldEntry { key, value })
                        .collect(),
                )
            }),
        ]
    })
}

/// Generates a map together with a random permutation of its entries.
pub fn arb_permuted_map() -> impl Strategy<Value = (MapValue, MapValue)> {
    vec(("[abc]", arb_value()), 0..6)
        .prop_flat_map(|entries| {
            let shuffled = Just(entries.clone()).prop_shuffle();
            (Just(entries), shuffled)
        })
        .prop_map(|(entries, shuffled)| (to_map(entries), to_map(shuffled)))
}

fn to_map(entries: Vec<(String, Value)>) -> MapValue {
    entries.into_iter().collect()
}
