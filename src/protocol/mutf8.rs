//! String code-unit encoder
//!
//! Strings go on the wire one input unit at a time:
//!
//! | unit range              | bytes | form                                  |
//! |-------------------------|-------|---------------------------------------|
//! | `0x0000..=0x007F`       | 1     | `0xxxxxxx`                            |
//! | `0x0080..=0x07FF`       | 2     | `110xxxxx 10xxxxxx`                   |
//! | `0x0800..=0xFFFF`       | 3     | `1110xxxx 10xxxxxx 10xxxxxx`          |
//! | `0x10000..=0x1FFFFF`    | 4     | `11110xxx 10xxxxxx 10xxxxxx 10xxxxxx` |
//! | surrogates, `> 0x1FFFFF`| 1     | `0x3F` (`?`)                          |
//!
//! Surrogate halves (`0xD800..=0xDFFF`) are never joined into a pair, so a
//! character outside the BMP fed as UTF-16 becomes `??`. The 4-byte row accepts
//! values past U+10FFFF; peers depend on those exact bytes.

/// Substitute byte for units that have no encoding
pub const SUBSTITUTE: u8 = 0x3F;

const SURROGATES: std::ops::RangeInclusive<u32> = 0xD800..=0xDFFF;

/// Number of bytes `code` occupies on the wire
#[inline]
pub fn encoded_len(code: u32) -> usize {
    match code {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        c if SURROGATES.contains(&c) => 1,
        0x800..=0xFFFF => 3,
        0x10000..=0x1FFFFF => 4,
        _ => 1,
    }
}

/// Write the encoding of `code` to the front of `out`, returning the byte count.
///
/// `out` must hold at least `encoded_len(code)` bytes.
#[inline]
pub fn encode(code: u32, out: &mut [u8]) -> usize {
    match code {
        0..=0x7F => {
            out[0] = code as u8;
            1
        }
        0x80..=0x7FF => {
            out[0] = 0xC0 | (code >> 6) as u8;
            out[1] = 0x80 | (code & 0x3F) as u8;
            2
        }
        c if SURROGATES.contains(&c) => {
            out[0] = SUBSTITUTE;
            1
        }
        0x800..=0xFFFF => {
            out[0] = 0xE0 | (code >> 12) as u8;
            out[1] = 0x80 | ((code >> 6) & 0x3F) as u8;
            out[2] = 0x80 | (code & 0x3F) as u8;
            3
        }
        0x10000..=0x1FFFFF => {
            out[0] = 0xF0 | (code >> 18) as u8;
            out[1] = 0x80 | ((code >> 12) & 0x3F) as u8;
            out[2] = 0x80 | ((code >> 6) & 0x3F) as u8;
            out[3] = 0x80 | (code & 0x3F) as u8;
            4
        }
        _ => {
            out[0] = SUBSTITUTE;
            1
        }
    }
}

/// Total wire size of a sequence of units
pub fn total_len<I>(units: I) -> usize
where
    I: IntoIterator<Item = u32>,
{
    units.into_iter().map(encoded_len).sum()
}
