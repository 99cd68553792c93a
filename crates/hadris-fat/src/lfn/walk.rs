//! Lazy recursive walk over a directory tree, yielding entries as they're found
//! rather than collecting a whole subtree up front.

use alloc::vec::Vec;

use crate::lfn::enumerator::{self, LogicalEntry};
use crate::lfn::resolver::DirectoryProvider;
use crate::lfn::slot;
use crate::lfn::volume::DirectorySlots;
use crate::structures::directory::FileAttributes;
use crate::structures::raw::directory::RawFileEntry;

/// One step of a tree walk: entering a directory, visiting a file within the
/// directory currently on top of the stack, or leaving a directory once its
/// entries are exhausted.
#[derive(Clone)]
pub enum Step {
    Enter { cluster: u32 },
    Visit { entry: LogicalEntry, raw: RawFileEntry },
    Leave { cluster: u32 },
}

struct Frame<D> {
    cluster: u32,
    dir: D,
    next: usize,
}

/// Depth-first walk over a directory tree, recursing into subdirectories as their
/// entries are reached.
///
/// Built on [`DirectoryProvider`] rather than a concrete volume type, so it works
/// identically over a real cluster-backed filesystem or an in-memory test tree.
/// A subdirectory that fails to open (a dangling cluster number, corrupt chain)
/// is silently skipped rather than aborting the whole walk.
pub struct Walk<'a, P: DirectoryProvider> {
    provider: &'a mut P,
    stack: Vec<Frame<P::Dir>>,
    pending_enter: Option<u32>,
}

impl<'a, P: DirectoryProvider> Walk<'a, P> {
    /// Starts a walk rooted at `cluster`. The first [`Step`] returned is always
    /// `Enter { cluster }`, unless `cluster` can't be opened at all.
    pub fn new(provider: &'a mut P, cluster: u32) -> Self {
        Self {
            provider,
            stack: Vec::new(),
            pending_enter: Some(cluster),
        }
    }
}

impl<'a, P: DirectoryProvider> Iterator for Walk<'a, P> {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        if let Some(cluster) = self.pending_enter.take() {
            return match self.provider.open(cluster) {
                Ok(dir) => {
                    self.stack.push(Frame { cluster, dir, next: 0 });
                    Some(Step::Enter { cluster })
                }
                Err(_) => self.next(),
            };
        }

        let frame = self.stack.last_mut()?;
        match enumerator::next_entry(&frame.dir, frame.next) {
            Some(entry) => {
                frame.next = entry.short_index + 1;
                let raw = *slot::as_file_entry(&frame.dir.slot(entry.short_index));
                let attrs = FileAttributes::from_bits_truncate(raw.attributes);
                if attrs.contains(FileAttributes::DIRECTORY) {
                    self.pending_enter = Some(slot::first_cluster(&raw));
                }
                Some(Step::Visit { entry, raw })
            }
            None => {
                let frame = self.stack.pop().expect("just matched Some above");
                Some(Step::Leave { cluster: frame.cluster })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lfn::creator;
    use crate::lfn::error::LfnError;
    use crate::lfn::volume::VecDirectory;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::vec::Vec as AVec;

    struct TestFs {
        dirs: BTreeMap<u32, VecDirectory>,
    }

    impl DirectoryProvider for TestFs {
        type Dir = VecDirectory;

        fn root_cluster(&self) -> u32 {
            2
        }

        fn open(&mut self, cluster: u32) -> Result<VecDirectory, LfnError> {
            let src = self.dirs.get(&cluster).ok_or(LfnError::NotFound)?;
            let mut copy = VecDirectory::new(src.slot_count());
            for i in 0..src.slot_count() {
                copy.set_slot(i, src.slot(i));
            }
            Ok(copy)
        }
    }

    fn set_first_cluster(dir: &mut VecDirectory, index: usize, cluster: u32) {
        let mut raw = dir.slot(index);
        let entry = slot::as_file_entry_mut(&mut raw);
        let bytes = cluster.to_le_bytes();
        entry.first_cluster_low = [bytes[0], bytes[1]];
        entry.first_cluster_high = [bytes[2], bytes[3]];
        dir.set_slot(index, raw);
    }

    #[test]
    fn visits_files_and_descends_into_subdirectories() {
        let mut root = VecDirectory::new(8);
        creator::create(&mut root, "README.TXT", FileAttributes::ARCHIVE).unwrap();
        let idx = creator::create(&mut root, "sub", FileAttributes::DIRECTORY).unwrap();
        set_first_cluster(&mut root, idx, 9);

        let mut sub = VecDirectory::new(8);
        creator::create(&mut sub, "inner.txt", FileAttributes::ARCHIVE).unwrap();

        let mut dirs = BTreeMap::new();
        dirs.insert(2, root);
        dirs.insert(9, sub);
        let mut fs = TestFs { dirs };

        let steps: AVec<Step> = Walk::new(&mut fs, 2).collect();
        let names: AVec<String> = steps
            .iter()
            .filter_map(|step| match step {
                Step::Visit { entry, .. } => Some(entry.name.clone()),
                _ => None,
            })
            .collect();

        assert!(names.contains(&String::from("README.TXT")));
        assert!(names.contains(&String::from("sub")));
        assert!(names.contains(&String::from("inner.txt")));

        let enters: AVec<u32> = steps
            .iter()
            .filter_map(|step| match step {
                Step::Enter { cluster } => Some(*cluster),
                _ => None,
            })
            .collect();
        assert_eq!(enters, alloc::vec![2, 9]);
    }

    #[test]
    fn visits_entry_after_an_lfn_chained_entry() {
        // A long-named entry occupies several physical slots before its short slot,
        // so short_index for it (and every later start point walk derives from it)
        // is well ahead of its position in the logical ordering. nth()-based
        // stepping over Entries mistook that slot index for an entry count and
        // silently dropped everything after the first long-named file.
        let mut root = VecDirectory::new(8);
        creator::create(&mut root, "LongFileNameExample.txt", FileAttributes::ARCHIVE).unwrap();
        creator::create(&mut root, "second.txt", FileAttributes::ARCHIVE).unwrap();
        let mut dirs = BTreeMap::new();
        dirs.insert(2, root);
        let mut fs = TestFs { dirs };

        let names: AVec<String> = Walk::new(&mut fs, 2)
            .filter_map(|step| match step {
                Step::Visit { entry, .. } => Some(entry.name),
                _ => None,
            })
            .collect();

        assert_eq!(
            names,
            alloc::vec![
                String::from("LongFileNameExample.txt"),
                String::from("second.txt")
            ]
        );
    }

    #[test]
    fn leave_is_emitted_once_per_entered_directory() {
        let mut root = VecDirectory::new(4);
        creator::create(&mut root, "README.TXT", FileAttributes::ARCHIVE).unwrap();
        let mut dirs = BTreeMap::new();
        dirs.insert(2, root);
        let mut fs = TestFs { dirs };

        let leaves = Walk::new(&mut fs, 2)
            .filter(|step| matches!(step, Step::Leave { .. }))
            .count();
        assert_eq!(leaves, 1);
    }
}
