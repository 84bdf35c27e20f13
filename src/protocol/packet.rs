//! Packet buffer
//!
//! A cursor over a caller-owned byte buffer with typed, bounds-checked field
//! accessors.
//!
//! ## Field Layouts
//! ```text
//! byte     ┌──────────┐
//!          │ value(1) │
//!          └──────────┘
//! int32    ┌──────────────────┐
//!          │ big-endian (4)   │
//!          └──────────────────┘
//! int64    ┌──────────┬──────────┐
//!          │ high (4) │ low (4)  │
//!          └──────────┴──────────┘
//! string   ┌──────────┬─────────────────────────────┐
//!          │ Len (4)  │ encoded units (Len bytes)   │
//!          └──────────┴─────────────────────────────┘
//! handle   ┌──────────┬──────────┐
//!          │ Len = 4  │ int32    │
//!          └──────────┴──────────┘
//! ```
//!
//! Every accessor checks the remaining capacity before touching the buffer or
//! the cursor. A call that fails has no effect.

use crate::config::{CodecConfig, StringDecoding};
use crate::error::{PacketError, Result};

use super::mutf8;
use super::OpCode;

/// Size of every length prefix (strings, data, handles, whole messages)
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Size of a locally representable handle
pub const HANDLE_SIZE: usize = 4;

/// Returned by `read_handle` when the peer's handle is not 4 bytes long
pub const FOREIGN_HANDLE: i32 = -1;

/// A message buffer with a read/write cursor
///
/// The buffer is borrowed or owned as `B` and never resized. Reads need
/// `B: AsRef<[u8]>`, writes additionally need `B: AsMut<[u8]>`, so the same
/// type wraps `&mut [u8]`, `Vec<u8>`, `BytesMut` or a read-only `Bytes`.
///
/// Not synchronized; use one packet per in-flight message.
#[derive(Debug, Clone)]
pub struct Packet<B> {
    /// Backing bytes
    buffer: B,

    /// Usable byte count, fixed at construction
    length: usize,

    /// Cursor position
    offset: usize,

    /// Correlation tag set by the caller; the codec never interprets it
    pub id: u32,

    config: CodecConfig,
}

// =============================================================================
// Construction, Cursor and Reads
// =============================================================================

impl<B: AsRef<[u8]>> Packet<B> {
    /// Wrap a buffer with the default codec config
    pub fn new(buffer: B) -> Self {
        Self::with_config(buffer, CodecConfig::default())
    }

    /// Wrap a buffer with an explicit codec config
    pub fn with_config(buffer: B, config: CodecConfig) -> Self {
        let length = buffer.as_ref().len();
        Self {
            buffer,
            length,
            offset: 0,
            id: 0,
            config,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Bytes left between the cursor and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.length.saturating_sub(self.offset)
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn get_ref(&self) -> &B {
        &self.buffer
    }

    /// Bytes from the start of the buffer up to the cursor
    pub fn written(&self) -> &[u8] {
        &self.buffer.as_ref()[..self.offset.min(self.length)]
    }

    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// Move the cursor without a bounds check; the next access enforces bounds.
    pub fn seek(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Advance the cursor by `count` bytes, returning the position before the
    /// advance (the slot can be backfilled later).
    pub fn ignore(&mut self, count: usize) -> Result<usize> {
        self.check_size(count)?;
        let offset = self.offset;
        self.offset += count;
        Ok(offset)
    }

    /// True once the cursor has reached the end of the buffer
    pub fn is_empty(&self) -> bool {
        self.offset >= self.length
    }

    fn check_size(&self, size: usize) -> Result<()> {
        let remaining = self.remaining();
        if size > remaining {
            tracing::trace!(
                offset = self.offset,
                needed = size,
                remaining,
                "premature end of packet"
            );
            return Err(PacketError::PrematureEnd {
                offset: self.offset,
                needed: size,
                remaining,
            });
        }
        Ok(())
    }

    /// Consume `count` bytes and borrow them
    fn take(&mut self, count: usize) -> Result<&[u8]> {
        self.check_size(count)?;
        let start = self.offset;
        self.offset += count;
        Ok(&self.buffer.as_ref()[start..start + count])
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Declared length of the length-prefixed field at the cursor.
    ///
    /// Verifies prefix and body both fit, without moving the cursor.
    fn frame(&self) -> Result<usize> {
        self.check_size(LENGTH_PREFIX_SIZE)?;
        let at = self.offset;
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        prefix.copy_from_slice(&self.buffer.as_ref()[at..at + LENGTH_PREFIX_SIZE]);
        let len = u32::from_be_bytes(prefix) as usize;
        self.check_size(LENGTH_PREFIX_SIZE.saturating_add(len))?;
        Ok(len)
    }

    // -------------------------------------------------------------------------
    // Primitives
    // -------------------------------------------------------------------------

    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    pub fn read_int32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.take_array()?))
    }

    pub fn read_uint32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.take_array()?))
    }

    /// Read a 64-bit integer sent as a signed high word then an unsigned low word
    pub fn read_int64(&mut self) -> Result<i64> {
        self.check_size(8)?;
        let hi = self.read_int32()? as i64;
        let lo = self.read_uint32()? as i64;
        Ok((hi << 32) | lo)
    }

    /// Read an operation code byte; unknown codes leave the cursor in place
    pub fn read_opcode(&mut self) -> Result<OpCode> {
        self.check_size(1)?;
        let op = OpCode::try_from(self.buffer.as_ref()[self.offset])?;
        self.offset += 1;
        Ok(op)
    }

    // -------------------------------------------------------------------------
    // Length-prefixed fields
    // -------------------------------------------------------------------------

    /// Read a string field, decoding its bytes per the configured policy
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.frame()?;
        let start = self.offset + LENGTH_PREFIX_SIZE;
        let bytes = &self.buffer.as_ref()[start..start + len];

        let value = match self.config.string_decoding {
            StringDecoding::Lossy => String::from_utf8_lossy(bytes).into_owned(),
            StringDecoding::Strict => match std::str::from_utf8(bytes) {
                Ok(s) => s.to_owned(),
                Err(_) => return Err(PacketError::InvalidString { offset: start }),
            },
        };

        self.offset = start + len;
        Ok(value)
    }

    /// Step over a string field without decoding it
    pub fn skip_string(&mut self) -> Result<()> {
        let len = self.frame()?;
        self.offset += LENGTH_PREFIX_SIZE + len;
        Ok(())
    }

    /// Read a length-prefixed block of opaque bytes
    pub fn read_data(&mut self) -> Result<&[u8]> {
        let len = self.frame()?;
        self.offset += LENGTH_PREFIX_SIZE;
        self.take(len)
    }

    /// Read a handle.
    ///
    /// Handles longer or shorter than 4 bytes come from peers with their own
    /// handle format; they are skipped and reported as `FOREIGN_HANDLE`.
    pub fn read_handle(&mut self) -> Result<i32> {
        let len = self.frame()?;
        self.offset += LENGTH_PREFIX_SIZE;
        if len == HANDLE_SIZE {
            return self.read_int32();
        }

        tracing::debug!(len, offset = self.offset, "skipping foreign handle");
        self.offset += len;
        Ok(FOREIGN_HANDLE)
    }
}

// =============================================================================
// Writes
// =============================================================================

impl<B: AsRef<[u8]> + AsMut<[u8]>> Packet<B> {
    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        self.check_size(bytes.len())?;
        let start = self.offset;
        self.buffer.as_mut()[start..start + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
        Ok(())
    }

    /// Rewind to the start and lay down a zero length prefix, leaving the
    /// cursor at 4. The real length is patched in by whoever sends the buffer.
    pub fn reset(&mut self) -> Result<()> {
        if self.length < LENGTH_PREFIX_SIZE {
            return Err(PacketError::PrematureEnd {
                offset: 0,
                needed: LENGTH_PREFIX_SIZE,
                remaining: self.length,
            });
        }
        self.offset = 0;
        self.write_int32(0)
    }

    // -------------------------------------------------------------------------
    // Primitives
    // -------------------------------------------------------------------------

    pub fn write_byte(&mut self, value: u8) -> Result<()> {
        self.put(&[value])
    }

    pub fn write_int32(&mut self, value: i32) -> Result<()> {
        self.put(&value.to_be_bytes())
    }

    pub fn write_uint32(&mut self, value: u32) -> Result<()> {
        self.put(&value.to_be_bytes())
    }

    /// Write a 64-bit integer as two 32-bit words, high word first.
    ///
    /// The high word is `floor(value / 2^32)`, the low word `value mod 2^32`.
    /// Peers that hold these values as doubles only agree with us up to 2^53.
    pub fn write_int64(&mut self, value: i64) -> Result<()> {
        self.check_size(8)?;
        let hi = (value >> 32) as i32;
        let lo = value as u32;
        self.write_int32(hi)?;
        self.write_uint32(lo)
    }

    pub fn write_opcode(&mut self, op: OpCode) -> Result<()> {
        self.write_byte(op.code())
    }

    // -------------------------------------------------------------------------
    // Length-prefixed fields
    // -------------------------------------------------------------------------

    /// Write a string field from its UTF-16 code units (see `mutf8`)
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_units(value.encode_utf16().map(u32::from))
    }

    /// Write a string field from raw UTF-16 code units, unpaired surrogates
    /// included
    pub fn write_utf16(&mut self, units: &[u16]) -> Result<()> {
        self.write_units(units.iter().map(|&u| u32::from(u)))
    }

    fn write_units<I>(&mut self, units: I) -> Result<()>
    where
        I: Iterator<Item = u32> + Clone,
    {
        let byte_len = mutf8::total_len(units.clone());
        self.check_size(LENGTH_PREFIX_SIZE.saturating_add(byte_len))?;

        let prefix_at = self.ignore(LENGTH_PREFIX_SIZE)?;
        let start = self.offset;
        let buf = self.buffer.as_mut();
        let mut pos = start;
        for code in units {
            pos += mutf8::encode(code, &mut buf[pos..]);
        }

        let written = (pos - start) as u32;
        buf[prefix_at..prefix_at + LENGTH_PREFIX_SIZE].copy_from_slice(&written.to_be_bytes());
        self.offset = pos;
        Ok(())
    }

    /// Write a length-prefixed block of opaque bytes
    pub fn write_data(&mut self, data: &[u8]) -> Result<()> {
        self.check_size(LENGTH_PREFIX_SIZE.saturating_add(data.len()))?;
        self.write_uint32(data.len() as u32)?;
        self.put(data)
    }

    /// Write a handle: a length of 4 followed by the handle itself
    pub fn write_handle(&mut self, handle: i32) -> Result<()> {
        self.check_size(LENGTH_PREFIX_SIZE + HANDLE_SIZE)?;
        self.write_int32(HANDLE_SIZE as i32)?;
        self.write_int32(handle)
    }
}
