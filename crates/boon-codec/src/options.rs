//! Encoder and decoder options records.
//!
//! All optimization toggles and header expectations arrive through these
//! structs; the codec reads no environment or persisted configuration.

/// Controls the per-message key-table optimization of the primary scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyTableMode {
    /// Run the collection pre-pass and switch to table mode only when the
    /// cost estimate says it is a net win.
    #[default]
    Auto,
    /// Force table mode whenever at least one non-common key exists.
    Always,
    /// Never emit a key table.
    Never,
}

/// Options for an encode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Write the magic + version header. Disable only for embedding a
    /// value as a sub-fragment inside another protocol, by mutual
    /// agreement with the decoder. Headerless messages cannot carry a
    /// key table.
    pub include_header: bool,
    /// Initial size of the output buffer in bytes.
    pub initial_buffer_size: usize,
    /// Key-table mode (primary scheme only).
    pub use_key_table: KeyTableMode,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            include_header: true,
            initial_buffer_size: 4 * 1024,
            use_key_table: KeyTableMode::Auto,
        }
    }
}

/// Options for a decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Require and validate the magic + version header. Must match the
    /// encoder's `include_header` by mutual agreement.
    pub expect_header: bool,
    /// Reject application-reserved tags. When `false`, their
    /// self-delimited payloads are skipped and decode as null.
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            expect_header: true,
            strict: true,
        }
    }
}
