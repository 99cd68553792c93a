//! Writes a new file's LFN chain and short slot into a directory.

use alloc::vec::Vec;

use crate::lfn::alias;
use crate::lfn::codec;
use crate::lfn::error::LfnError;
use crate::lfn::freerun;
use crate::lfn::shortname;
use crate::lfn::slot::{self, ATTR_LONG_NAME, SLOT_SIZE};
use crate::lfn::volume::DirectorySlots;
use crate::structures::directory::FileAttributes;

const FRAGMENT_LEN: usize = 13;

/// Creates a new file named `name` with `attributes`, writing its LFN chain (if
/// the short alias can't represent the name exactly) followed by the short slot.
///
/// Returns the index of the short slot. Writes high-ordinal slot first, short
/// slot last, so a crash mid-write leaves an incomplete chain the scanner
/// rejects rather than a short slot with no chain behind it.
pub fn create<D: DirectorySlots + ?Sized>(
    dir: &mut D,
    name: &str,
    attributes: FileAttributes,
) -> Result<usize, LfnError> {
    if shortname::invalid_name(name) {
        return Err(LfnError::Invalid);
    }
    let storage = shortname::storage_form(name);
    let alias = alias::generate(dir, &storage)?;

    let units: Vec<u16> = if alias.needs_lfn {
        let mut units = Vec::new();
        codec::utf8_to_ucs2(&storage, &mut units).ok();
        units
    } else {
        Vec::new()
    };

    let lfn_slots = if alias.needs_lfn {
        units.len().div_ceil(FRAGMENT_LEN).max(1)
    } else {
        0
    };
    let total = lfn_slots + 1;

    let start = freerun::find_free_run(dir, total).ok_or(LfnError::NoSpace(total as u32))?;
    let checksum = shortname::checksum(&alias.short_name);

    for j in 0..lfn_slots {
        let pos = lfn_slots - j; // n-1, n-2, ..., 1
        let frag_start = (pos - 1) * FRAGMENT_LEN;
        let frag_end = (pos * FRAGMENT_LEN).min(units.len());
        let fragment = &units[frag_start..frag_end];

        let mut raw = [0u8; SLOT_SIZE];
        raw[11] = ATTR_LONG_NAME;
        {
            let entry = slot::as_lfn_entry_mut(&mut raw);
            entry.sequence_number = pos as u8 | if j == 0 { 0x40 } else { 0 };
            entry.checksum = checksum;
            slot::set_lfn_fragment(entry, fragment);
        }
        dir.set_slot(start + j, raw);
    }

    let short_index = start + lfn_slots;
    let mut raw = [0u8; SLOT_SIZE];
    {
        let entry = slot::as_file_entry_mut(&mut raw);
        entry.name = alias.short_name;
        entry.attributes = attributes.bits();
        entry.reserved = alias.case_byte;
    }
    dir.set_slot(short_index, raw);

    Ok(short_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lfn::enumerator;
    use crate::lfn::volume::VecDirectory;

    #[test]
    fn short_name_only_creation_has_no_lfn_chain() {
        let mut dir = VecDirectory::new(4);
        let idx = create(&mut dir, "README.TXT", FileAttributes::ARCHIVE).unwrap();
        assert_eq!(idx, 0);
        let entry = enumerator::next_entry(&dir, 0).unwrap();
        assert_eq!(entry.chain_start, entry.short_index);
        assert_eq!(entry.name, "README.TXT");
        assert!(!entry.corrupt);
    }

    #[test]
    fn long_name_creates_three_slot_chain() {
        let mut dir = VecDirectory::new(4);
        let idx = create(&mut dir, "LongFileNameExample.txt", FileAttributes::ARCHIVE).unwrap();
        assert_eq!(idx, 2);

        let slot0 = dir.slot(0);
        let first = slot::as_lfn_entry(&slot0);
        assert_eq!(slot::lfn_ordinal(first), 2);
        assert!(slot::lfn_is_first(first));
        let slot1 = dir.slot(1);
        let second = slot::as_lfn_entry(&slot1);
        assert_eq!(slot::lfn_ordinal(second), 1);
        assert!(!slot::lfn_is_first(second));

        let slot2 = dir.slot(2);
        let short = slot::as_file_entry(&slot2);
        assert_eq!(&short.name, b"LONGFI~1TXT");

        let entry = enumerator::next_entry(&dir, 0).unwrap();
        assert_eq!(entry.name, "LongFileNameExample.txt");
        assert!(!entry.corrupt);
        assert_eq!(entry.chain_start, 0);
        assert_eq!(entry.short_index, 2);
    }

    #[test]
    fn rejects_reserved_names() {
        let mut dir = VecDirectory::new(4);
        assert_eq!(
            create(&mut dir, "..", FileAttributes::ARCHIVE).unwrap_err(),
            LfnError::Invalid
        );
    }
}
