//! Protocol Module
//!
//! The packet codec every protocol message is built from.
//!
//! ## Message Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Len (4)  │  Op (1)  │   id / fields per op code   │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Op Code Ranges
//! - 1-2:     session setup (INIT, VERSION)
//! - 3-20:    requests (OPEN .. SYMLINK)
//! - 101-105: replies (STATUS, HANDLE, DATA, NAME, ATTRS)
//!
//! Fields carry no type tags; callers read them back in the order the op
//! code dictates.

pub mod opcode;
pub mod mutf8;
mod packet;

pub use opcode::{OpCode, REQUEST_MAX, REQUEST_MIN};
pub use packet::{Packet, FOREIGN_HANDLE, HANDLE_SIZE, LENGTH_PREFIX_SIZE};
