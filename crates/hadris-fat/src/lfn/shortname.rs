//! 8.3 short-name utilities: checksum, case-byte display, and name validity.

use crate::structures::raw::directory::RawFileEntry;

/// `DIR_NTRes` case bits (`reserved` byte of a short entry).
pub const CASE_EXT_LOWER: u8 = 0x10;
pub const CASE_BASE_LOWER: u8 = 0x08;

/// Checksum of an 11-byte short name, as stored in every LFN slot of its chain.
///
/// `res = rotate_right(res, 1); res += byte`, repeated over the 11 name bytes.
pub fn checksum(shortname: &[u8; 11]) -> u8 {
    let mut res: u8 = 0;
    for &b in shortname {
        res = ((res & 1) << 7) | (res >> 1);
        res = res.wrapping_add(b);
    }
    res
}

pub fn entry_checksum(entry: &RawFileEntry) -> u8 {
    checksum(&entry.name)
}

/// Renders an 11-byte short name plus its case byte as a display string.
///
/// Lower-cases the base/extension per the case byte, inserts the separating `.`
/// for non-dot-only names, and trims the trailing padding spaces.
pub fn display(shortname: &[u8; 11], case_byte: u8) -> alloc::string::String {
    let mut base: alloc::vec::Vec<u8> = shortname[..8].to_vec();
    let mut ext: alloc::vec::Vec<u8> = shortname[8..11].to_vec();
    if case_byte & CASE_BASE_LOWER != 0 {
        base.make_ascii_lowercase();
    }
    if case_byte & CASE_EXT_LOWER != 0 {
        ext.make_ascii_lowercase();
    }
    let base_trimmed = core::str::from_utf8(&base).unwrap_or("").trim_end();
    let ext_trimmed = core::str::from_utf8(&ext).unwrap_or("").trim_end();

    let mut out = alloc::string::String::new();
    out.push_str(base_trimmed);
    if !ext_trimmed.is_empty() {
        out.push('.');
        out.push_str(ext_trimmed);
    }
    out
}

/// Whether `name` is rejected outright as a long file name (not a path).
///
/// A name containing `/` or ending in the reserved `.`/`..` is invalid, as is any
/// name that fails the broader path validity rules.
pub fn invalid_name(name: &str) -> bool {
    if invalid_path(name) {
        return true;
    }
    if name.contains('/') {
        return true;
    }
    name == "." || name == ".."
}

const FORBIDDEN_CHARS: &[char] = &['"', '*', ':', '<', '>', '?', '\\', '|'];

/// Whether `path` contains characters forbidden anywhere in a long file name path,
/// or its final segment is the reserved `.`/`..`.
pub fn invalid_path(path: &str) -> bool {
    if path.chars().any(|c| FORBIDDEN_CHARS.contains(&c)) {
        return true;
    }
    if path.chars().any(|c| (c as u32) < 32) {
        return true;
    }
    let last = path.rsplit('/').next().unwrap_or(path);
    last == "." || last == ".."
}

/// The form of `name` actually stored in an LFN chain: leading spaces trimmed,
/// trailing spaces and dots trimmed, except `.`/`..` which round-trip unchanged.
pub fn storage_form(name: &str) -> alloc::string::String {
    if name == "." || name == ".." {
        return alloc::string::String::from(name);
    }
    name.trim_start_matches(' ')
        .trim_end_matches(['.', ' '])
        .into()
}
