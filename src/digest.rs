// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stable BLAKE3 content digests of values.
//!
//! Hashes produced through `std`'s default hasher are randomly seeded per process and can not be
//! persisted. A [`Digest`] is derived from the same hashing routine as the [`Hash`] implementation
//! of [`Value`] but is independent of the process, platform and pointer width, so it can be
//! stored and used as a key in persistent indexes.
//!
//! Like the `Hash` implementation, the digest does not depend on the order of map entries.
//!
//! [`Hash`]: std::hash::Hash
use std::fmt;
use std::hash::Hasher;

use crate::hash::hash_value;
use crate::value::Value;

/// Size of BLAKE3 digests.
pub const DIGEST_LEN: usize = blake3::OUT_LEN;

/// 32-byte BLAKE3 digest of a value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest(blake3::Hash);

impl Digest {
    /// Calculate the digest of the given value.
    pub fn new(value: &Value) -> Self {
        let mut hasher = DigestHasher::new();
        hash_value(value, &mut hasher);
        hasher.finalize()
    }

    pub(crate) const fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(blake3::Hash::from_bytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        self.0.as_bytes()
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex().to_string()
    }
}

impl Value {
    /// Returns the stable content digest of this value.
    pub fn digest(&self) -> Digest {
        Digest::new(self)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Digest").field(&self.to_hex()).finish()
    }
}

/// [`Hasher`] writing into a BLAKE3 hash state.
///
/// All integers are written in little-endian byte order and `usize` is widened to 64 bits, the
/// resulting digest does not depend on the platform.
#[derive(Clone, Debug, Default)]
pub struct DigestHasher(blake3::Hasher);

impl DigestHasher {
    pub fn new() -> Self {
        Self(blake3::Hasher::new())
    }

    /// Returns the digest of everything written so far.
    pub fn finalize(&self) -> Digest {
        Digest(self.0.finalize())
    }
}

impl Hasher for DigestHasher {
    fn finish(&self) -> u64 {
        let mut bytes = [0; 8];
        bytes.copy_from_slice(&self.0.finalize().as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }

    fn write(&mut self, bytes: &[u8]) {
        self.0.update(bytes);
    }

    fn write_u8(&mut self, i: u8) {
        self.write(&[i]);
    }

    fn write_u16(&mut self, i: u16) {
        self.write(&i.to_le_bytes());
    }

    fn write_u32(&mut self, i: u32) {
        self.write(&i.to_le_bytes());
    }

    fn write_u64(&mut self, i: u64) {
        self.write(&i.to_le_bytes());
    }

    fn write_u128(&mut self, i: u128) {
        self.write(&i.to_le_bytes());
    }

    fn write_usize(&mut self, i: usize) {
        self.write_u64(i as u64);
    }

    fn write_i8(&mut self, i: i8) {
        self.write(&i.to_le_bytes());
    }

    fn write_i16(&mut self, i: i16) {
        self.write(&i.to_le_bytes());
    }

    fn write_i32(&mut self, i: i32) {
        self.write(&i.to_le_bytes());
    }

    fn write_i64(&mut self, i: i64) {
        self.write(&i.to_le_bytes());
    }

    fn write_i128(&mut self, i: i128) {
        self.write(&i.to_le_bytes());
    }

    fn write_isize(&mut self, i: isize) {
        self.write_i64(i as i64);
    }
}
