//! The static common-key dictionary.
//!
//! A fixed, ordered list of frequent object keys agreed upon by encoders
//! and decoders ahead of time; it is not part of the wire payload. The
//! table is immutable and identical across all implementations of format
//! version 1 — changing an entry is a breaking format change that
//! requires a new version byte.

use std::collections::HashMap;

/// Keys encodable as a single byte (`0x80 | index`).
///
/// Ordered by rough frequency in service and model-API payloads.
pub const COMMON_KEYS: [&str; 128] = [
    "id", "name", "type", "value", "key", "data", "items", "index", //
    "count", "total", "size", "length", "status", "state", "error", "message", //
    "code", "result", "results", "meta", "metadata", "info", "label", "title", //
    "description", "content", "text", "body", "url", "uri", "path", "query", //
    "params", "args", "options", "config", "settings", "version", "format", "kind", //
    "tag", "tags", "category", "group", "level", "score", "rank", "order", //
    "sort", "limit", "offset", "page", "next", "prev", "first", "last", //
    "user", "users", "author", "owner", "email", "phone", "address", "token", //
    "session", "account", "profile", "role", "roles", "permissions", "created", "updated", //
    "created_at", "updated_at", "deleted_at", "timestamp", "time", "date", "start", "end", //
    "duration", "expires", "ttl", "source", "target", "parent", "children", "node", //
    "nodes", "edges", "input", "output", "request", "response", "headers", "method", //
    "success", "active", "enabled", "visible", "default", "required", "unique", "schema", //
    "model", "provider", "prompt", "completion", "choices", "delta", "usage", "temperature", //
    "max_tokens", "tokens", "finish_reason", "stop", "stream", "tools", "tool_calls", "function", //
    "arguments", "object", "fields", "properties", "values", "entries", "links", "extra", //
];

/// Reverse lookup over [`COMMON_KEYS`].
///
/// The static array serves decode (`code -> text`); this map serves
/// encode (`text -> code`). Built once at construction, never mutated.
#[derive(Debug)]
pub struct CommonKeys {
    lookup: HashMap<&'static str, u8>,
}

impl CommonKeys {
    pub fn new() -> Self {
        let mut lookup = HashMap::with_capacity(COMMON_KEYS.len());
        for (i, &key) in COMMON_KEYS.iter().enumerate() {
            lookup.insert(key, i as u8);
        }
        Self { lookup }
    }

    /// Returns the single-byte code for `key`, if it is a common key.
    pub fn get_code(&self, key: &str) -> Option<u8> {
        self.lookup.get(key).copied()
    }

    /// Returns the key text for a dictionary code.
    ///
    /// Every 7-bit code is valid: the dictionary fills the whole band.
    pub fn get_text(&self, code: u8) -> &'static str {
        COMMON_KEYS[code as usize & 0x7f]
    }
}

impl Default for CommonKeys {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_fills_the_code_band() {
        assert_eq!(COMMON_KEYS.len(), 128);
    }

    #[test]
    fn test_entries_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for key in COMMON_KEYS {
            assert!(seen.insert(key), "duplicate common key: {key}");
        }
    }

    #[test]
    fn test_lookup_round_trip() {
        let common = CommonKeys::new();
        for (i, &key) in COMMON_KEYS.iter().enumerate() {
            assert_eq!(common.get_code(key), Some(i as u8));
            assert_eq!(common.get_text(i as u8), key);
        }
        assert_eq!(common.get_code("definitely-not-a-common-key"), None);
    }
}
