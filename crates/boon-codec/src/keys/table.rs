//! Per-message key table: collection pre-pass and cost estimate.

use std::collections::HashMap;

use crate::json_value::JsonValue;
use crate::varint::varint_size;

use super::{literal_key_cost, CommonKeys};

/// An ordered, deduplicated sequence of key strings.
///
/// Decode needs `index -> key`, encode needs `key -> index`; both are
/// kept. The table is written once, before any value bytes that
/// reference it.
#[derive(Debug, Clone, Default)]
pub struct KeyTable {
    keys: Vec<String>,
    lookup: HashMap<String, u32>,
}

impl KeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key text. Returns the existing index if already present.
    pub fn add(&mut self, key: &str) -> u32 {
        if let Some(&id) = self.lookup.get(key) {
            return id;
        }
        let id = self.keys.len() as u32;
        self.keys.push(key.to_string());
        self.lookup.insert(key.to_string(), id);
        id
    }

    /// Returns the index for a key, if present.
    pub fn get_id(&self, key: &str) -> Option<u32> {
        self.lookup.get(key).copied()
    }

    /// Returns the key at `index`, if in range.
    pub fn get_text(&self, index: u32) -> Option<&str> {
        self.keys.get(index as usize).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|s| s.as_str())
    }
}

/// Scratch state of one encode call: distinct non-common keys in
/// first-encounter order plus per-key occurrence counts.
#[derive(Debug, Default)]
pub struct KeyUsage {
    table: KeyTable,
    counts: Vec<u32>,
}

impl KeyUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one occurrence of `key`.
    pub fn touch(&mut self, key: &str) {
        let id = self.table.add(key) as usize;
        if id == self.counts.len() {
            self.counts.push(1);
        } else {
            self.counts[id] += 1;
        }
    }

    /// Number of distinct keys seen.
    pub fn distinct(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Consumes the usage and returns the collected table.
    pub fn into_table(self) -> KeyTable {
        self.table
    }
}

/// Pre-order traversal collecting every object key not covered by the
/// common dictionary.
pub fn collect_keys(value: &JsonValue, common: &CommonKeys, usage: &mut KeyUsage) {
    match value {
        JsonValue::Array(items) => {
            for item in items {
                collect_keys(item, common, usage);
            }
        }
        JsonValue::Object(pairs) => {
            for (key, item) in pairs {
                if common.get_code(key).is_none() {
                    usage.touch(key);
                }
                collect_keys(item, common, usage);
            }
        }
        _ => {}
    }
}

/// Decides whether table mode is a provable net win.
///
/// No-table cost: per distinct key, `occurrences x literal cost`.
/// Table cost: the one-time table (string-table tag byte, varint key
/// count, then varint length + bytes per key) plus, per occurrence, the
/// table-reference marker byte and the varint index. Table mode is
/// refused outright when more than half of distinct keys occur exactly
/// once; otherwise it is chosen only when projected savings are
/// strictly positive.
///
/// The decision is pure and deterministic: it depends only on the
/// collected first-encounter order and counts, so equal inputs always
/// produce equal output bytes.
pub fn should_use_table(usage: &KeyUsage) -> bool {
    let distinct = usage.distinct();
    if distinct == 0 {
        return false;
    }
    let singles = usage.counts.iter().filter(|&&c| c == 1).count();
    if singles * 2 > distinct {
        return false;
    }
    let mut no_table_cost = 0usize;
    let mut table_cost = 1 + varint_size(distinct as u64);
    for (index, key) in usage.table.iter().enumerate() {
        let occurrences = usage.counts[index] as usize;
        let len = key.len();
        no_table_cost += occurrences * literal_key_cost(len);
        table_cost += varint_size(len as u64) + len;
        table_cost += occurrences * (1 + varint_size(index as u64));
    }
    table_cost < no_table_cost
}
