//! Derives an 8.3 short alias (and its case byte) from a long name.

use alloc::format;
use alloc::string::String;

use crate::lfn::error::LfnError;
use crate::lfn::shortname;
use crate::lfn::volume::DirectorySlots;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    AllUpper,
    AllLower,
    Mixed,
}

fn case_of(s: &str) -> Case {
    let (mut upper, mut lower) = (false, false);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            upper = true;
        } else if c.is_ascii_lowercase() {
            lower = true;
        }
    }
    match (upper, lower) {
        (true, true) => Case::Mixed,
        (false, true) => Case::AllLower,
        _ => Case::AllUpper,
    }
}

/// Fast path: the name already fits 8.3 syntax (single dot, 8-char stem, 3-char
/// extension, each half uniformly cased). Returns `None` to fall through to the
/// slow path.
fn fast_path(name: &str) -> Option<([u8; 11], u8)> {
    if name == "." || name == ".." {
        let mut bytes = [b' '; 11];
        bytes[0] = b'.';
        if name == ".." {
            bytes[1] = b'.';
        }
        return Some((bytes, 0));
    }

    let (stem, ext) = match name.find('.') {
        None => (name, ""),
        Some(0) => return None,
        Some(pos) => {
            let rest = &name[pos + 1..];
            if rest.contains('.') {
                return None;
            }
            (&name[..pos], rest)
        }
    };
    if stem.len() > 8 || ext.len() > 3 {
        return None;
    }

    let case_stem = case_of(stem);
    let case_ext = if ext.is_empty() {
        Case::AllUpper
    } else {
        case_of(ext)
    };
    if case_stem == Case::Mixed || case_ext == Case::Mixed {
        return None;
    }

    let mut bytes = [b' '; 11];
    for (i, c) in stem.chars().enumerate() {
        bytes[i] = c.to_ascii_uppercase() as u8;
    }
    for (i, c) in ext.chars().enumerate() {
        bytes[8 + i] = c.to_ascii_uppercase() as u8;
    }

    let mut case_byte = 0u8;
    if case_stem == Case::AllLower {
        case_byte |= shortname::CASE_BASE_LOWER;
    }
    if case_ext == Case::AllLower {
        case_byte |= shortname::CASE_EXT_LOWER;
    }
    Some((bytes, case_byte))
}

fn sanitize_upper(c: char) -> u8 {
    if c.is_ascii_alphanumeric() {
        c.to_ascii_uppercase() as u8
    } else {
        b'_'
    }
}

/// First 8-char stem candidate (before any numeric tail is overlaid), following
/// the truncation rule: take the name's first 8 characters, then if the last
/// dot falls within those 8 characters, replace everything from the dot on with
/// `_` (the same non-alphanumeric placeholder `sanitize_upper` uses elsewhere —
/// a short name has no room for a space in the middle of its stem).
fn base_stem(name: &str) -> [u8; 8] {
    let mut stem = [b' '; 8];
    for (i, c) in name.chars().take(8).enumerate() {
        stem[i] = sanitize_upper(c);
    }
    if let Some(pos) = name.rfind('.')
        && pos < 8
    {
        for b in stem.iter_mut().skip(pos) {
            *b = b'_';
        }
    }
    stem
}

fn base_ext(name: &str) -> [u8; 3] {
    let mut ext = [b' '; 3];
    if let Some(pos) = name.rfind('.') {
        for (i, c) in name[pos + 1..].chars().take(3).enumerate() {
            ext[i] = sanitize_upper(c);
        }
    }
    ext
}

fn overlay_tail(stem: &mut [u8; 8], n: u32) {
    let tail = format!("~{n}");
    let tail = tail.as_bytes();
    let tail_len = tail.len().min(8);
    let start = 8 - tail_len;
    stem[start..].copy_from_slice(&tail[tail.len() - tail_len..]);
}

fn exists<D: DirectorySlots + ?Sized>(dir: &D, candidate: &[u8; 11]) -> bool {
    for index in 0..dir.slot_count() {
        let raw = dir.slot(index);
        if crate::lfn::slot::classify(&raw) == crate::lfn::slot::SlotKind::Short
            && &crate::lfn::slot::as_file_entry(&raw).name == candidate
        {
            return true;
        }
    }
    false
}

/// Slow path: truncate to a sanitized 6+`~N`+ext stem, trying tails `1..99999`
/// until the full 11-byte candidate doesn't already exist in `dir`.
fn slow_path<D: DirectorySlots + ?Sized>(dir: &D, name: &str) -> Result<[u8; 11], LfnError> {
    let stem = base_stem(name);
    let ext = base_ext(name);

    for n in 1..100_000u32 {
        let mut candidate_stem = stem;
        overlay_tail(&mut candidate_stem, n);
        let mut candidate = [b' '; 11];
        candidate[..8].copy_from_slice(&candidate_stem);
        candidate[8..].copy_from_slice(&ext);
        if !exists(dir, &candidate) {
            if n > 1 {
                log::trace!("alias for {name:?} settled on ~{n} after {} collision(s)", n - 1);
            }
            return Ok(candidate);
        }
        log::trace!("alias candidate ~{n} for {name:?} collides, retrying");
    }
    Err(LfnError::Collision)
}

/// Result of deriving a short alias: the 11-byte name, its case byte, and whether
/// an LFN chain is still needed (the short name alone can't represent `name`).
#[derive(Debug, Clone, Copy)]
pub struct Alias {
    pub short_name: [u8; 11],
    pub case_byte: u8,
    pub needs_lfn: bool,
}

/// Derives a short alias for `name`, unique within `dir`.
pub fn generate<D: DirectorySlots + ?Sized>(dir: &D, name: &str) -> Result<Alias, LfnError> {
    if let Some((bytes, case_byte)) = fast_path(name)
        && !exists(dir, &bytes)
    {
        return Ok(Alias {
            short_name: bytes,
            case_byte,
            needs_lfn: false,
        });
    }
    Ok(Alias {
        short_name: slow_path(dir, name)?,
        case_byte: 0,
        needs_lfn: true,
    })
}

pub fn display(shortname: &[u8; 11], case_byte: u8) -> String {
    shortname::display(shortname, case_byte)
}
