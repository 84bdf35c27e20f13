//! Op Code Tests
//!
//! Tests for the operation-code catalogue and its ranges.

use sftp_packet::protocol::opcode::{self, is_request_code};
use sftp_packet::protocol::{REQUEST_MAX, REQUEST_MIN};
use sftp_packet::{OpCode, PacketError};

#[test]
fn test_catalogue_values() {
    assert_eq!(opcode::INIT, 1);
    assert_eq!(opcode::VERSION, 2);
    assert_eq!(opcode::OPEN, 3);
    assert_eq!(opcode::READDIR, 12);
    assert_eq!(opcode::SYMLINK, 20);
    assert_eq!(opcode::STATUS, 101);
    assert_eq!(opcode::ATTRS, 105);
    assert_eq!(REQUEST_MIN, 3);
    assert_eq!(REQUEST_MAX, 20);
}

#[test]
fn test_enum_matches_raw_codes() {
    assert_eq!(OpCode::Init.code(), opcode::INIT);
    assert_eq!(OpCode::Write.code(), opcode::WRITE);
    assert_eq!(OpCode::Realpath.code(), opcode::REALPATH);
    assert_eq!(OpCode::Handle.code(), opcode::HANDLE);
    assert_eq!(u8::from(OpCode::Name), opcode::NAME);
}

#[test]
fn test_ranges_are_disjoint() {
    for op in OpCode::ALL {
        let kinds = [op.is_init(), op.is_request(), op.is_reply()];
        assert_eq!(
            kinds.iter().filter(|&&k| k).count(),
            1,
            "{} must be in exactly one range",
            op
        );
    }
}

#[test]
fn test_request_range() {
    let requests: Vec<u8> = OpCode::ALL
        .iter()
        .filter(|op| op.is_request())
        .map(|op| op.code())
        .collect();
    let expected: Vec<u8> = (REQUEST_MIN..=REQUEST_MAX).collect();
    assert_eq!(requests, expected);

    assert!(!is_request_code(2));
    assert!(is_request_code(3));
    assert!(is_request_code(20));
    assert!(!is_request_code(21));
    assert!(!is_request_code(101));
}

#[test]
fn test_try_from_every_code() {
    for op in OpCode::ALL {
        assert_eq!(OpCode::try_from(op.code()).unwrap(), op);
    }
}

#[test]
fn test_try_from_unknown() {
    for code in [0u8, 21, 100, 106, 255] {
        assert_eq!(OpCode::try_from(code), Err(PacketError::UnknownOpCode(code)));
    }
}

#[test]
fn test_names() {
    assert_eq!(OpCode::Fsetstat.name(), "FSETSTAT");
    assert_eq!(OpCode::Readlink.to_string(), "READLINK");
    assert_eq!(format!("{}", OpCode::Status), "STATUS");
}
