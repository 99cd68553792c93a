//! UCS-2 / UTF-8 / ASCII conversions and name comparison.
//!
//! Long file name slots store UTF-16 code units (UCS-2 for any name actually reachable
//! from an 8.3 alias, since surrogate pairs never round-trip through a short name
//! checksum anyway). This module converts between that wire form and the UTF-8 `str`
//! the rest of the crate works with, and supplies the name-comparison primitives the
//! scanner and resolver need.

use crate::lfn::error::LfnError;

/// Size of the per-codepoint case-fold buffer used by [`utf8casecmp`].
///
/// The reference implementation folds through `utf8proc_decompose_char` into a
/// fixed `int32_t[10]` stack buffer per codepoint; no FAT-reachable character folds
/// into more than a handful of codepoints, so 10 is kept as a generous, explicit bound
/// rather than allocating.
const FOLD_BUFFER_LEN: usize = 10;

/// Decodes a UCS-2LE code-unit sequence (as stored in LFN slots) into a `char` buffer.
///
/// Lone surrogates and unpaired surrogate halves are not translatable to a single
/// `char` and are counted as non-convertible, matching `utf8toucs2`'s "nonconv" count
/// being reported back to the caller rather than silently dropped.
pub fn ucs2_to_utf8(units: &[u16], out: &mut alloc::string::String) -> Result<(), LfnError> {
    let mut nonconv = 0u32;
    for unit in units.iter().copied() {
        if let Some(c) = char::from_u32(unit as u32) {
            out.push(c);
        } else {
            nonconv += 1;
        }
    }
    if nonconv > 0 {
        Err(LfnError::Encoding(nonconv))
    } else {
        Ok(())
    }
}

/// Encodes a `str` into UCS-2LE code units, appending to `out`.
///
/// Characters outside the Basic Multilingual Plane cannot be represented as a single
/// UCS-2 code unit and are counted as non-convertible, same as `utf8toucs2`'s handling
/// of codepoints above `0xFFFF`.
pub fn utf8_to_ucs2(s: &str, out: &mut alloc::vec::Vec<u16>) -> Result<(), LfnError> {
    let mut nonconv = 0u32;
    for c in s.chars() {
        let cp = c as u32;
        if cp <= 0xFFFF {
            out.push(cp as u16);
        } else {
            nonconv += 1;
        }
    }
    if nonconv > 0 {
        Err(LfnError::Encoding(nonconv))
    } else {
        Ok(())
    }
}

/// Converts an ASCII byte string (as stored in a short 8.3 slot) to UTF-8.
///
/// Every ASCII byte is already valid UTF-8, so this can't fail; kept as its own
/// function (rather than inlined at call sites) since it is a distinct operation
/// in the reference implementation (`asciitoutf8`) with its own non-ASCII input case.
pub fn ascii_to_utf8(ascii: &[u8], out: &mut alloc::string::String) -> Result<(), LfnError> {
    let mut nonconv = 0u32;
    for &b in ascii {
        if b < 0x80 {
            out.push(b as char);
        } else {
            nonconv += 1;
        }
    }
    if nonconv > 0 {
        Err(LfnError::Encoding(nonconv))
    } else {
        Ok(())
    }
}

/// Converts a `str` to its ASCII subset, counting non-ASCII scalars as non-convertible.
pub fn utf8_to_ascii(s: &str, out: &mut alloc::vec::Vec<u8>) -> Result<(), LfnError> {
    let mut nonconv = 0u32;
    for c in s.chars() {
        if c.is_ascii() {
            out.push(c as u8);
        } else {
            nonconv += 1;
        }
    }
    if nonconv > 0 {
        Err(LfnError::Encoding(nonconv))
    } else {
        Ok(())
    }
}

/// Byte-exact comparison of two names, scalar by scalar.
///
/// Returns an ordering the same way `utf8cmp` does: the difference between the first
/// mismatching scalar values, or the length difference if one string is a prefix of
/// the other.
pub fn utf8cmp(a: &str, b: &str) -> core::cmp::Ordering {
    let mut ac = a.chars();
    let mut bc = b.chars();
    loop {
        match (ac.next(), bc.next()) {
            (Some(x), Some(y)) if x == y => continue,
            (Some(x), Some(y)) => return x.cmp(&y),
            (None, None) => return core::cmp::Ordering::Equal,
            (None, Some(_)) => return core::cmp::Ordering::Less,
            (Some(_), None) => return core::cmp::Ordering::Greater,
        }
    }
}

fn fold(c: char, buf: &mut [u32; FOLD_BUFFER_LEN]) -> usize {
    let mut n = 0;
    for lower in c.to_lowercase() {
        if n < FOLD_BUFFER_LEN {
            buf[n] = lower as u32;
            n += 1;
        } else {
            break;
        }
    }
    n
}

/// Case-insensitive comparison of two names via per-scalar case folding.
///
/// Each scalar is folded independently into a bounded buffer (see [`FOLD_BUFFER_LEN`])
/// and the folded sequences compared lexicographically; a fold that overflows the
/// buffer is truncated rather than treated as an error, since every character that
/// matters for FAT short/long names folds into one or two codepoints.
pub fn utf8casecmp(a: &str, b: &str) -> core::cmp::Ordering {
    let mut ac = a.chars();
    let mut bc = b.chars();
    loop {
        match (ac.next(), bc.next()) {
            (Some(x), Some(y)) => {
                if x == y {
                    continue;
                }
                let mut abuf = [0u32; FOLD_BUFFER_LEN];
                let mut bbuf = [0u32; FOLD_BUFFER_LEN];
                let an = fold(x, &mut abuf);
                let bn = fold(y, &mut bbuf);
                let common = an.min(bn);
                for i in 0..common {
                    if abuf[i] != bbuf[i] {
                        return abuf[i].cmp(&bbuf[i]);
                    }
                }
                if an != bn {
                    return an.cmp(&bn);
                }
            }
            (None, None) => return core::cmp::Ordering::Equal,
            (None, Some(_)) => return core::cmp::Ordering::Less,
            (Some(_), None) => return core::cmp::Ordering::Greater,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;
    use core::cmp::Ordering;

    #[test]
    fn ucs2_round_trip() {
        let units: Vec<u16> = "LongFileNameExample.txt".encode_utf16().collect();
        let mut s = String::new();
        ucs2_to_utf8(&units, &mut s).unwrap();
        assert_eq!(s, "LongFileNameExample.txt");

        let mut back = Vec::new();
        utf8_to_ucs2(&s, &mut back).unwrap();
        assert_eq!(back, units);
    }

    #[test]
    fn ascii_round_trip() {
        let mut s = String::new();
        ascii_to_utf8(b"README.TXT", &mut s).unwrap();
        assert_eq!(s, "README.TXT");
        let mut back = Vec::new();
        utf8_to_ascii(&s, &mut back).unwrap();
        assert_eq!(back, b"README.TXT");
    }

    #[test]
    fn non_ascii_counted_as_encoding_error() {
        let mut out = Vec::new();
        let err = utf8_to_ascii("café", &mut out).unwrap_err();
        assert_eq!(err, LfnError::Encoding(1));
    }

    #[test]
    fn casecmp_is_case_insensitive() {
        assert_eq!(utf8casecmp("README.TXT", "readme.txt"), Ordering::Equal);
        assert_ne!(utf8cmp("README.TXT", "readme.txt"), Ordering::Equal);
    }

    #[test]
    fn casecmp_orders_by_length_when_prefix() {
        assert_eq!(utf8casecmp("abc", "abcd"), Ordering::Less);
    }
}
