//! One-step LFN scanner: consumes a single 32-byte slot and reports what it means
//! for the logical entry currently being assembled.

use alloc::string::String;
use alloc::vec::Vec;

use crate::lfn::codec;
use crate::lfn::shortname;
use crate::lfn::slot::{self, SlotKind, SLOT_SIZE};

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScanFlags: u16 {
        const END = 0x8000;
        const SHORT = 0x4000;
        const LONG_ALL = 0x2000;
        const LONG_SOME = 0x1000;
        const LONG_FIRST = 0x0800;
        const LONG_ERR = 0x0400;
    }
}

/// Mutable scanner state, one instance per directory walk.
///
/// Holds the in-progress chain: the ordinal still expected, the checksum every
/// slot of the chain must share, the fragments decoded so far (physical order,
/// i.e. highest ordinal first) and a running non-convertible-character count.
#[derive(Debug, Default)]
pub struct Scanner {
    expected_ordinal: Option<u8>,
    checksum: u8,
    fragments: Vec<[u16; 13]>,
    err: u32,
    chain_start: Option<usize>,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all in-progress chain state, as if the scanner had just been created.
    pub fn reset(&mut self) {
        self.expected_ordinal = None;
        self.fragments.clear();
        self.err = 0;
        self.chain_start = None;
    }

    /// Position of the first physical slot of the chain currently assembled (or the
    /// short slot itself, once one without an LFN chain has just been consumed).
    pub fn chain_start(&self) -> Option<usize> {
        self.chain_start
    }

    fn decode_name(&mut self) -> String {
        let mut name = String::new();
        for frag in &self.fragments {
            let end = frag.iter().position(|&u| u == 0).unwrap_or(13);
            if codec::ucs2_to_utf8(&frag[..end], &mut name).is_err() {
                self.err += 1;
            }
        }
        name
    }

    /// Consumes one slot at `index`, advancing scanner state and reporting flags.
    pub fn step(&mut self, raw: &[u8; SLOT_SIZE], index: usize) -> (ScanFlags, Option<String>) {
        match slot::classify(raw) {
            SlotKind::End => {
                self.reset();
                (ScanFlags::END, None)
            }
            SlotKind::Free => {
                self.reset();
                (ScanFlags::empty(), None)
            }
            SlotKind::Lfn => {
                let entry = slot::as_lfn_entry(raw);
                let ordinal = slot::lfn_ordinal(entry);
                if slot::lfn_is_first(entry) {
                    self.fragments.clear();
                    self.err = 0;
                    self.checksum = entry.checksum;
                    self.chain_start = Some(index);
                    self.fragments.push(slot::lfn_fragment(entry));
                    self.expected_ordinal = ordinal.checked_sub(1);
                    (ScanFlags::LONG_SOME | ScanFlags::LONG_FIRST, None)
                } else if self.expected_ordinal == Some(ordinal)
                    && ordinal > 0
                    && entry.checksum == self.checksum
                {
                    self.fragments.push(slot::lfn_fragment(entry));
                    self.expected_ordinal = ordinal.checked_sub(1);
                    (ScanFlags::LONG_SOME, None)
                } else {
                    log::trace!("lfn chain broken at slot {index}, ordinal {ordinal}: resetting scanner");
                    self.reset();
                    (ScanFlags::empty(), None)
                }
            }
            SlotKind::Short => {
                let entry = slot::as_file_entry(raw);
                let all = self.expected_ordinal == Some(0)
                    && !self.fragments.is_empty()
                    && shortname::entry_checksum(entry) == self.checksum;
                let flags = if all {
                    // fragments were pushed highest-ordinal first; the name reads
                    // lowest-ordinal first, so reverse the physical chain order.
                    self.fragments.reverse();
                    let name = self.decode_name();
                    self.expected_ordinal = None;
                    let err = self.err;
                    self.fragments.clear();
                    if err != 0 {
                        log::warn!("lfn chain ending at slot {index} had {err} non-convertible code unit(s)");
                    }
                    return (
                        ScanFlags::SHORT
                            | ScanFlags::LONG_ALL
                            | if err != 0 {
                                ScanFlags::LONG_ERR
                            } else {
                                ScanFlags::empty()
                            },
                        Some(name),
                    );
                } else {
                    self.chain_start = Some(index);
                    ScanFlags::SHORT
                };
                self.expected_ordinal = None;
                self.fragments.clear();
                let name = shortname::display(&entry.name, entry.reserved);
                (flags, Some(name))
            }
        }
    }
}
