// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical order of map entries.
//!
//! Comparison and hashing of maps both go through [`sorted_entries`], this is what makes them
//! independent of the order in which entries were inserted.
use tracing::trace;

use crate::ordering::compare_entries;
use crate::value::{FieldEntry, MapValue};

/// Returns references to all entries of the map, sorted by key first and value second.
///
/// Every entry of the map is contained exactly once, duplicates included. The sort is stable,
/// calling this repeatedly on the same map always returns the same sequence.
///
/// The result is not cached, callers comparing the same map many times should keep it around
/// themselves.
pub fn sorted_entries(map: &MapValue) -> Vec<&FieldEntry> {
    let mut entries: Vec<&FieldEntry> = map.iter().collect();
    entries.sort_by(|left, right| compare_entries(left, right));
    entries
}

/// Emits one event per key which occurs more than once. Keys need to be in sorted order.
fn trace_duplicate_keys<'a>(keys: impl Iterator<Item = &'a str>) {
    let mut previous: Option<&str> = None;
    let mut reported: Option<&str> = None;

    for key in keys {
        if previous == Some(key) && reported != Some(key) {
            trace!(key, "map value contains duplicate key");
            reported = Some(key);
        }
        previous = Some(key);
    }
}

impl MapValue {
    /// Returns references to all entries in canonical order.
    pub fn sorted_entries(&self) -> Vec<&FieldEntry> {
        sorted_entries(self)
    }

    /// Sorts the stored entries into canonical order.
    ///
    /// This does not change the outcome of any comparison or hash. Duplicate entries are kept.
    pub fn canonicalize(&mut self) {
        self.entries_mut()
            .sort_by(|left, right| compare_entries(left, right));
        trace_duplicate_keys(self.iter().map(|entry| entry.key.as_str()));
    }

    /// Returns a copy of this map with its entries in canonical order.
    pub fn to_canonical(&self) -> MapValue {
        let entries = self.sorted_entries();
        trace_duplicate_keys(entries.iter().map(|entry| entry.key.as_str()));
        entries.into_iter().cloned().collect()
    }

    /// Returns true if the stored entries already are in canonical order.
    pub fn is_canonical(&self) -> bool {
        self.entries()
            .windows(2)
            .all(|pair| compare_entries(&pair[0], &pair[1]).is_le())
    }
}
