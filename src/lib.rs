//! # sftp-packet
//!
//! Binary message codec for an SFTP-style file transfer protocol:
//! - Bounds-checked cursor over a caller-owned buffer
//! - Big-endian 32-bit integers, 64-bit integers split into two words
//! - Length-prefixed strings, data blocks and 4-byte handles
//! - The operation-code catalogue
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Protocol logic / Transport (caller)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ typed reads / writes
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Packet                                │
//! │           (cursor, length, id, codec config)                 │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │  byte buffer  │
//!               └───────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use sftp_packet::{OpCode, Packet};
//!
//! let mut buf = vec![0u8; 64];
//! let mut packet = Packet::new(&mut buf[..]);
//! packet.reset().unwrap();
//! packet.write_opcode(OpCode::Open).unwrap();
//! packet.write_int32(7).unwrap();
//! packet.write_string("/tmp/file").unwrap();
//! let end = packet.offset();
//!
//! let mut reader = Packet::new(&buf[..end]);
//! reader.seek(4);
//! assert_eq!(reader.read_opcode().unwrap(), OpCode::Open);
//! assert_eq!(reader.read_int32().unwrap(), 7);
//! assert_eq!(reader.read_string().unwrap(), "/tmp/file");
//! assert!(reader.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{PacketError, Result};
pub use config::{CodecConfig, StringDecoding};
pub use protocol::{OpCode, Packet};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of sftp-packet
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
