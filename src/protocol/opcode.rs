//! Operation codes
//!
//! The first body byte of every message. Three disjoint ranges:
//! session setup (1-2), requests (3-20) and replies (101-105).

use std::fmt;

use crate::error::PacketError;

// =============================================================================
// Raw Codes
// =============================================================================

// initialization
pub const INIT: u8 = 1;
pub const VERSION: u8 = 2;

// requests
pub const REQUEST_MIN: u8 = 3;
pub const OPEN: u8 = 3;
pub const CLOSE: u8 = 4;
pub const READ: u8 = 5;
pub const WRITE: u8 = 6;
pub const LSTAT: u8 = 7;
pub const FSTAT: u8 = 8;
pub const SETSTAT: u8 = 9;
pub const FSETSTAT: u8 = 10;
pub const OPENDIR: u8 = 11;
pub const READDIR: u8 = 12;
pub const REMOVE: u8 = 13;
pub const MKDIR: u8 = 14;
pub const RMDIR: u8 = 15;
pub const REALPATH: u8 = 16;
pub const STAT: u8 = 17;
pub const RENAME: u8 = 18;
pub const READLINK: u8 = 19;
pub const SYMLINK: u8 = 20;
pub const REQUEST_MAX: u8 = 20;

// replies
pub const STATUS: u8 = 101;
pub const HANDLE: u8 = 102;
pub const DATA: u8 = 103;
pub const NAME: u8 = 104;
pub const ATTRS: u8 = 105;

/// True if `code` falls in the request range
pub fn is_request_code(code: u8) -> bool {
    (REQUEST_MIN..=REQUEST_MAX).contains(&code)
}

// =============================================================================
// Typed Codes
// =============================================================================

/// Operation code of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    Init = INIT,
    Version = VERSION,

    Open = OPEN,
    Close = CLOSE,
    Read = READ,
    Write = WRITE,
    Lstat = LSTAT,
    Fstat = FSTAT,
    Setstat = SETSTAT,
    Fsetstat = FSETSTAT,
    Opendir = OPENDIR,
    Readdir = READDIR,
    Remove = REMOVE,
    Mkdir = MKDIR,
    Rmdir = RMDIR,
    Realpath = REALPATH,
    Stat = STAT,
    Rename = RENAME,
    Readlink = READLINK,
    Symlink = SYMLINK,

    Status = STATUS,
    Handle = HANDLE,
    Data = DATA,
    Name = NAME,
    Attrs = ATTRS,
}

impl OpCode {
    /// Every code in catalogue order
    pub const ALL: [OpCode; 25] = [
        OpCode::Init,
        OpCode::Version,
        OpCode::Open,
        OpCode::Close,
        OpCode::Read,
        OpCode::Write,
        OpCode::Lstat,
        OpCode::Fstat,
        OpCode::Setstat,
        OpCode::Fsetstat,
        OpCode::Opendir,
        OpCode::Readdir,
        OpCode::Remove,
        OpCode::Mkdir,
        OpCode::Rmdir,
        OpCode::Realpath,
        OpCode::Stat,
        OpCode::Rename,
        OpCode::Readlink,
        OpCode::Symlink,
        OpCode::Status,
        OpCode::Handle,
        OpCode::Data,
        OpCode::Name,
        OpCode::Attrs,
    ];

    /// Wire byte for this code
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Protocol name, upper case
    pub fn name(self) -> &'static str {
        match self {
            OpCode::Init => "INIT",
            OpCode::Version => "VERSION",
            OpCode::Open => "OPEN",
            OpCode::Close => "CLOSE",
            OpCode::Read => "READ",
            OpCode::Write => "WRITE",
            OpCode::Lstat => "LSTAT",
            OpCode::Fstat => "FSTAT",
            OpCode::Setstat => "SETSTAT",
            OpCode::Fsetstat => "FSETSTAT",
            OpCode::Opendir => "OPENDIR",
            OpCode::Readdir => "READDIR",
            OpCode::Remove => "REMOVE",
            OpCode::Mkdir => "MKDIR",
            OpCode::Rmdir => "RMDIR",
            OpCode::Realpath => "REALPATH",
            OpCode::Stat => "STAT",
            OpCode::Rename => "RENAME",
            OpCode::Readlink => "READLINK",
            OpCode::Symlink => "SYMLINK",
            OpCode::Status => "STATUS",
            OpCode::Handle => "HANDLE",
            OpCode::Data => "DATA",
            OpCode::Name => "NAME",
            OpCode::Attrs => "ATTRS",
        }
    }

    /// INIT or VERSION
    pub fn is_init(self) -> bool {
        matches!(self, OpCode::Init | OpCode::Version)
    }

    pub fn is_request(self) -> bool {
        is_request_code(self.code())
    }

    pub fn is_reply(self) -> bool {
        (STATUS..=ATTRS).contains(&self.code())
    }
}

impl TryFrom<u8> for OpCode {
    type Error = PacketError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        let op = match code {
            INIT => OpCode::Init,
            VERSION => OpCode::Version,
            OPEN => OpCode::Open,
            CLOSE => OpCode::Close,
            READ => OpCode::Read,
            WRITE => OpCode::Write,
            LSTAT => OpCode::Lstat,
            FSTAT => OpCode::Fstat,
            SETSTAT => OpCode::Setstat,
            FSETSTAT => OpCode::Fsetstat,
            OPENDIR => OpCode::Opendir,
            READDIR => OpCode::Readdir,
            REMOVE => OpCode::Remove,
            MKDIR => OpCode::Mkdir,
            RMDIR => OpCode::Rmdir,
            REALPATH => OpCode::Realpath,
            STAT => OpCode::Stat,
            RENAME => OpCode::Rename,
            READLINK => OpCode::Readlink,
            SYMLINK => OpCode::Symlink,
            STATUS => OpCode::Status,
            HANDLE => OpCode::Handle,
            DATA => OpCode::Data,
            NAME => OpCode::Name,
            ATTRS => OpCode::Attrs,
            other => return Err(PacketError::UnknownOpCode(other)),
        };
        Ok(op)
    }
}

impl From<OpCode> for u8 {
    fn from(op: OpCode) -> u8 {
        op.code()
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
