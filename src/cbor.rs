// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local snapshots of values in [CBOR] format.
//!
//! Values are externally tagged by their type name, maps are encoded as a list of entries. This
//! keeps the stored order of map entries and any duplicate keys intact.
//!
//! A snapshot stores the [`Digest`] of the value next to it. The digest is recomputed when the
//! snapshot is decoded, a snapshot whose value does not match its digest is rejected. Decoding
//! raw messages received from a server is not handled here.
//!
//! [CBOR]: https://cbor.io/
use serde::{Deserialize, Serialize};
use serde_bytes::{ByteBuf, Bytes};
use thiserror::Error;
use tracing::debug;

use crate::digest::{DIGEST_LEN, Digest};
use crate::value::Value;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    digest: &'a Bytes,
    value: &'a Value,
}

#[derive(Deserialize)]
struct Snapshot {
    digest: ByteBuf,
    value: Value,
}

/// Encodes the value together with its digest.
pub fn encode_snapshot(value: &Value) -> Result<Vec<u8>, EncodeError> {
    let digest = value.digest();
    let snapshot = SnapshotRef {
        digest: Bytes::new(digest.as_bytes()),
        value,
    };

    let mut bytes = Vec::new();
    ciborium::ser::into_writer(&snapshot, &mut bytes)?;
    Ok(bytes)
}

/// Decodes a snapshot and checks that the contained value matches its digest.
pub fn decode_snapshot(bytes: &[u8]) -> Result<Value, DecodeError> {
    let snapshot: Snapshot = ciborium::from_reader(bytes).inspect_err(|err| {
        debug!("failed decoding value snapshot: {err}");
    })?;

    let digest_len = snapshot.digest.len();
    let expected: [u8; DIGEST_LEN] = snapshot
        .digest
        .into_vec()
        .try_into()
        .map_err(|_| DecodeError::InvalidDigestLength(digest_len))?;
    let expected = Digest::from_bytes(expected);

    let actual = snapshot.value.digest();
    if actual != expected {
        debug!(%expected, %actual, "value snapshot does not match its digest");
        return Err(DecodeError::DigestMismatch { expected, actual });
    }

    Ok(snapshot.value)
}

/// Value snapshot could not be encoded.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed encoding value snapshot: {0}")]
    Cbor(#[from] ciborium::ser::Error<std::io::Error>),
}

/// Value snapshot could not be decoded or was corrupted.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Bytes are not valid CBOR or contain an unknown value type.
    #[error("failed decoding value snapshot: {0}")]
    Cbor(#[from] ciborium::de::Error<std::io::Error>),

    #[error("invalid digest length {0} bytes, expected {DIGEST_LEN} bytes")]
    InvalidDigestLength(usize),

    /// The stored value does not hash to the stored digest.
    #[error("value snapshot digest {expected} does not match value digest {actual}")]
    DigestMismatch { expected: Digest, actual: Digest },
}

#[cfg(test)]
mod tests {
    use ciborium::Value as CborValue;

    use crate::value::{GeoPoint, MapValue, Timestamp, Value};

    use super::{DecodeError, decode_snapshot, encode_snapshot};

    fn to_cbor(value: &CborValue) -> Vec<u8> {
        let mut bytes = Vec::new();
        ciborium::ser::into_writer(value, &mut bytes).unwrap();
        bytes
    }

    fn from_cbor(bytes: &[u8]) -> CborValue {
        ciborium::from_reader(bytes).unwrap()
    }

    /// Replaces the value of a decoded snapshot while keeping its digest.
    fn replace_value(bytes: &[u8], value: CborValue) -> Vec<u8> {
        let CborValue::Map(mut fields) = from_cbor(bytes) else {
            panic!("expected cbor map");
        };

        for (key, field) in fields.iter_mut() {
            if key == &CborValue::Text("value".into()) {
                *field = value.clone();
            }
        }

        to_cbor(&CborValue::Map(fields))
    }

    #[test]
    fn encode_decode() {
        let mut map = MapValue::new();
        map.insert("k", 2);
        map.insert("a", b"bytes".to_vec());
        map.insert("k", 1);
        map.insert("when", Timestamp::new(1_700_000_000, 5).unwrap());
        map.insert("where", GeoPoint::new(52.5, 13.4).unwrap());
        map.insert("refs", vec![Value::reference("a/b"), Value::Null]);

        let bytes = encode_snapshot(&Value::Map(map.clone())).unwrap();
        let Value::Map(map_again) = decode_snapshot(&bytes).unwrap() else {
            panic!("expected map value");
        };

        // Stored order and duplicates survive
        let keys: Vec<&str> = map_again.iter().map(|entry| entry.key.as_str()).collect();
        assert_eq!(keys, vec!["k", "a", "k", "when", "where", "refs"]);
        assert_eq!(map_again.entries(), map.entries());
    }

    #[test]
    fn snapshot_layout() {
        let value = Value::Bytes(vec![1, 2, 3]);
        let bytes = encode_snapshot(&value).unwrap();

        assert_eq!(
            from_cbor(&bytes),
            CborValue::Map(vec![
                (
                    CborValue::Text("digest".into()),
                    CborValue::Bytes(value.digest().as_bytes().to_vec())
                ),
                (
                    CborValue::Text("value".into()),
                    CborValue::Map(vec![(
                        CborValue::Text("bytes".into()),
                        CborValue::Bytes(vec![1, 2, 3])
                    )])
                ),
            ])
        );
    }

    #[test]
    fn tampered_value() {
        let bytes = encode_snapshot(&Value::Integer(1)).unwrap();
        let tampered = replace_value(
            &bytes,
            CborValue::Map(vec![(
                CborValue::Text("integer".into()),
                CborValue::Integer(2.into()),
            )]),
        );

        let result = decode_snapshot(&tampered);
        assert!(matches!(
            result,
            Err(DecodeError::DigestMismatch { expected, actual })
                if expected == Value::Integer(1).digest() && actual == Value::Integer(2).digest()
        ));
    }

    #[test]
    fn reordered_map_keeps_digest() {
        let value: MapValue = [("a", 1), ("b", 2)].into_iter().collect();
        let reordered: MapValue = [("b", 2), ("a", 1)].into_iter().collect();

        let bytes = encode_snapshot(&Value::Map(value)).unwrap();
        let CborValue::Map(fields) = from_cbor(&encode_snapshot(&Value::Map(reordered)).unwrap())
        else {
            panic!("expected cbor map");
        };

        // Entry order is not part of the digest, the snapshot still verifies
        let reordered_value = fields[1].1.clone();
        assert!(decode_snapshot(&replace_value(&bytes, reordered_value)).is_ok());
    }

    #[test]
    fn unknown_value_type() {
        let bytes = encode_snapshot(&Value::Null).unwrap();
        let unknown = replace_value(
            &bytes,
            CborValue::Map(vec![(
                CborValue::Text("decimal".into()),
                CborValue::Text("1.5".into()),
            )]),
        );

        let result = decode_snapshot(&unknown);
        assert!(matches!(
            result,
            Err(DecodeError::Cbor(ciborium::de::Error::Semantic(_, _)))
        ));
    }

    #[test]
    fn invalid_digest_length() {
        let snapshot = CborValue::Map(vec![
            (CborValue::Text("digest".into()), CborValue::Bytes(vec![1, 2])),
            (CborValue::Text("value".into()), CborValue::Text("null".into())),
        ]);

        let result = decode_snapshot(&to_cbor(&snapshot));
        assert!(matches!(result, Err(DecodeError::InvalidDigestLength(2))));
    }

    #[test]
    fn truncated_input() {
        let bytes = encode_snapshot(&Value::from("panda")).unwrap();
        let result = decode_snapshot(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(DecodeError::Cbor(_))));
    }

    #[test]
    fn json_representation() {
        let value = Value::Array(vec![Value::Null, 1.into(), "two".into()]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"array":["null",{"integer":1},{"string":"two"}]}"#);
    }
}
