//! String Codec Tests
//!
//! Tests for string framing, the code-unit encoder and decode policies.

use sftp_packet::protocol::mutf8::SUBSTITUTE;
use sftp_packet::{CodecConfig, Packet, PacketError, StringDecoding};

fn encode(value: &str) -> Vec<u8> {
    let mut packet = Packet::new(vec![0u8; 4 + value.len() * 3]);
    packet.write_string(value).unwrap();
    packet.written().to_vec()
}

// =============================================================================
// Encoding Tests
// =============================================================================

#[test]
fn test_ascii_string_layout() {
    assert_eq!(encode("abc"), vec![0, 0, 0, 3, b'a', b'b', b'c']);
}

#[test]
fn test_empty_string() {
    assert_eq!(encode(""), vec![0, 0, 0, 0]);

    let buf = [0u8; 4];
    let mut packet = Packet::new(&buf[..]);
    assert_eq!(packet.read_string().unwrap(), "");
    assert!(packet.is_empty());
}

#[test]
fn test_prefix_counts_bytes_not_characters() {
    let bytes = encode("é€");
    assert_eq!(&bytes[..4], &[0, 0, 0, 5]);
    assert_eq!(&bytes[4..], "é€".as_bytes());
}

#[test]
fn test_astral_character_becomes_two_substitutes() {
    let bytes = encode("a😀b");
    assert_eq!(bytes, vec![0, 0, 0, 4, b'a', SUBSTITUTE, SUBSTITUTE, b'b']);
}

#[test]
fn test_unpaired_surrogate_units() {
    let mut packet = Packet::new(vec![0u8; 16]);
    packet.write_utf16(&[0x0041, 0xD800, 0x00E9]).unwrap();
    assert_eq!(packet.written(), &[0, 0, 0, 4, 0x41, SUBSTITUTE, 0xC3, 0xA9]);
}

#[test]
fn test_string_overflow_writes_nothing() {
    let mut buf = [0u8; 8];
    let mut packet = Packet::new(&mut buf[..]);
    packet.write_byte(1).unwrap();

    // 4-byte prefix + 6 encoded bytes do not fit in the 7 remaining
    let err = packet.write_string("€€").unwrap_err();
    assert!(err.is_premature_end());
    assert_eq!(packet.offset(), 1);
    assert_eq!(buf, [1, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn test_string_exact_fit() {
    let mut buf = [0u8; 8];
    let mut packet = Packet::new(&mut buf[..]);
    packet.write_string("x€").unwrap();
    assert!(packet.is_empty());
    assert_eq!(buf, [0, 0, 0, 4, b'x', 0xE2, 0x82, 0xAC]);
}

// =============================================================================
// Decoding Tests
// =============================================================================

#[test]
fn test_string_round_trip() {
    let values = ["/home/user/file.txt", "naïve café", "日本語"];
    let mut packet = Packet::new(vec![0u8; 128]);
    for v in values {
        packet.write_string(v).unwrap();
    }

    packet.seek(0);
    for v in values {
        assert_eq!(packet.read_string().unwrap(), v);
    }
}

#[test]
fn test_truncated_string_consumes_nothing() {
    let buf = [0u8, 0, 0, 10, b'a', b'b'];
    let mut packet = Packet::new(&buf[..]);

    let err = packet.read_string().unwrap_err();
    assert_eq!(
        err,
        PacketError::PrematureEnd {
            offset: 0,
            needed: 14,
            remaining: 6
        }
    );
    assert_eq!(packet.offset(), 0);
}

#[test]
fn test_missing_prefix_fails() {
    let buf = [0u8, 0, 1];
    let mut packet = Packet::new(&buf[..]);
    assert!(packet.read_string().is_err());
    assert!(packet.skip_string().is_err());
    assert_eq!(packet.offset(), 0);
}

#[test]
fn test_length_prefix_is_unsigned() {
    let buf = [0xFFu8, 0xFF, 0xFF, 0xFF, 0];
    let mut packet = Packet::new(&buf[..]);
    let err = packet.read_string().unwrap_err();
    assert!(matches!(
        err,
        PacketError::PrematureEnd { needed, .. } if needed == 4 + 0xFFFF_FFFF
    ));
}

#[test]
fn test_skip_string() {
    let mut packet = Packet::new(vec![0u8; 32]);
    packet.write_string("skip me").unwrap();
    packet.write_string("keep").unwrap();

    packet.seek(0);
    packet.skip_string().unwrap();
    assert_eq!(packet.offset(), 11);
    assert_eq!(packet.read_string().unwrap(), "keep");
}

#[test]
fn test_lossy_decoding_replaces_invalid_bytes() {
    let buf = [0u8, 0, 0, 3, b'a', 0xFF, b'b'];
    let mut packet = Packet::new(&buf[..]);
    assert_eq!(packet.read_string().unwrap(), "a\u{FFFD}b");
    assert!(packet.is_empty());
}

#[test]
fn test_strict_decoding_rejects_invalid_bytes() {
    let buf = [0u8, 0, 0, 3, b'a', 0xFF, b'b'];
    let config = CodecConfig::builder().strict_strings().build();
    let mut packet = Packet::with_config(&buf[..], config);

    assert_eq!(
        packet.read_string(),
        Err(PacketError::InvalidString { offset: 4 })
    );
    assert_eq!(packet.offset(), 0);

    // The field can still be stepped over
    packet.skip_string().unwrap();
    assert!(packet.is_empty());
}

#[test]
fn test_strict_decoding_accepts_valid_bytes() {
    let config = CodecConfig::builder()
        .string_decoding(StringDecoding::Strict)
        .build();
    let mut packet = Packet::with_config(vec![0u8; 32], config);
    packet.write_string("ok ✓").unwrap();

    packet.seek(0);
    assert_eq!(packet.read_string().unwrap(), "ok ✓");
}

#[test]
fn test_default_config_is_lossy() {
    let packet = Packet::new(vec![0u8; 1]);
    assert_eq!(packet.config().string_decoding, StringDecoding::Lossy);
}
