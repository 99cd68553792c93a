//! Marks every slot of a file's chain (LFN fragments plus the short slot) deleted.

use alloc::vec::Vec;

use crate::lfn::error::LfnError;
use crate::lfn::scanner::{ScanFlags, Scanner};
use crate::lfn::slot::FREE_MARKER;
use crate::lfn::volume::DirectorySlots;

/// Deletes the logical entry anchored at `chain_start` (the first LFN slot, or the
/// short slot itself when the file has no long name).
///
/// A chain that scans cleanly to its short slot is deleted entirely, whether or
/// not it carried an LFN (a lone short entry is not corruption, just a file with
/// no long name). A chain that breaks before reaching a short slot — falls off
/// the end of the directory, or the scanner resets mid-walk — is left untouched
/// and reported as [`LfnError::Corrupt`], since `chain_start` didn't actually
/// anchor a complete entry.
pub fn delete<D: DirectorySlots + ?Sized>(dir: &mut D, chain_start: usize) -> Result<(), LfnError> {
    let mut scanner = Scanner::new();
    let mut visited = Vec::new();
    let mut index = chain_start;

    loop {
        if index >= dir.slot_count() {
            log::warn!("delete at slot {chain_start} ran off the end of the directory at slot {index}");
            return Err(LfnError::Corrupt);
        }
        let raw = dir.slot(index);
        let (flags, _) = scanner.step(&raw, index);
        if flags.contains(ScanFlags::END) {
            log::warn!("delete at slot {chain_start} hit end-of-directory before a short slot");
            return Err(LfnError::Corrupt);
        }
        visited.push(index);
        if flags.contains(ScanFlags::SHORT) {
            let slots = visited.len();
            for i in visited {
                let mut slot = dir.slot(i);
                slot[0] = FREE_MARKER;
                dir.set_slot(i, slot);
            }
            log::debug!("deleted chain at slot {chain_start}: {slots} slot(s) freed");
            return Ok(());
        }
        if flags.is_empty() {
            log::warn!("delete at slot {chain_start} found a broken lfn chain at slot {index}");
            return Err(LfnError::Corrupt);
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lfn::creator;
    use crate::lfn::enumerator;
    use crate::lfn::volume::VecDirectory;
    use crate::structures::directory::FileAttributes;

    #[test]
    fn deletes_full_chain() {
        let mut dir = VecDirectory::new(4);
        creator::create(&mut dir, "LongFileNameExample.txt", FileAttributes::ARCHIVE).unwrap();
        delete(&mut dir, 0).unwrap();
        assert!(enumerator::next_entry(&dir, 0).is_none());
    }

    #[test]
    fn deletes_lone_short_entry() {
        let mut dir = VecDirectory::new(4);
        creator::create(&mut dir, "README.TXT", FileAttributes::ARCHIVE).unwrap();
        delete(&mut dir, 0).unwrap();
        assert!(enumerator::next_entry(&dir, 0).is_none());
    }

    #[test]
    fn rejects_out_of_range_anchor() {
        let mut dir = VecDirectory::new(1);
        assert_eq!(delete(&mut dir, 5).unwrap_err(), LfnError::Corrupt);
    }
}
