//! Error types for sftp-packet
//!
//! Bounds failures are the only errors the codec raises on its own. The other
//! variants exist for opt-in checks (strict string decoding, typed op codes).

use thiserror::Error;

/// Result type alias using PacketError
pub type Result<T> = std::result::Result<T, PacketError>;

/// Unified error type for packet operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PacketError {
    // -------------------------------------------------------------------------
    // Bounds Errors
    // -------------------------------------------------------------------------
    /// A read or write needed more bytes than remain between the cursor and
    /// the end of the buffer. Nothing was read, written or advanced.
    #[error(
        "Premature end of packet encountered: needed {needed} bytes at offset {offset}, {remaining} remaining"
    )]
    PrematureEnd {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    /// String bytes were not valid UTF-8 under `StringDecoding::Strict`
    #[error("Invalid UTF-8 in string field at offset {offset}")]
    InvalidString { offset: usize },

    /// Byte is not part of the operation-code catalogue
    #[error("Unknown operation code: {0}")]
    UnknownOpCode(u8),
}

impl PacketError {
    /// True for the bounds error, the one every accessor can raise
    pub fn is_premature_end(&self) -> bool {
        matches!(self, PacketError::PrematureEnd { .. })
    }
}
