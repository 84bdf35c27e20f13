//! Configuration for sftp-packet
//!
//! Codec behavior that peers disagree on and callers need to pick.

/// Codec configuration attached to every packet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecConfig {
    // -------------------------------------------------------------------------
    // String Configuration
    // -------------------------------------------------------------------------
    /// How `read_string` treats bytes that are not well-formed UTF-8
    pub string_decoding: StringDecoding,
}

/// Policy for decoding string fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StringDecoding {
    /// Replace malformed sequences with U+FFFD (never fails)
    #[default]
    Lossy,

    /// Fail with `PacketError::InvalidString` and leave the cursor in place
    Strict,
}

impl CodecConfig {
    /// Create a new config builder
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }
}

/// Builder for CodecConfig
#[derive(Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    /// Set the string decoding policy
    pub fn string_decoding(mut self, policy: StringDecoding) -> Self {
        self.config.string_decoding = policy;
        self
    }

    /// Shorthand for `string_decoding(StringDecoding::Strict)`
    pub fn strict_strings(self) -> Self {
        self.string_decoding(StringDecoding::Strict)
    }

    pub fn build(self) -> CodecConfig {
        self.config
    }
}
