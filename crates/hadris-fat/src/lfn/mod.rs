//! Long file name (VFAT) support: scanning, creating, deleting and resolving
//! paths through the LFN directory-entry chains layered on top of FAT's plain
//! 8.3 short names.
//!
//! [`slot`] and [`scanner`] decode the raw 32-byte directory entries one at a
//! time; [`enumerator`] drives the scanner across a whole directory into
//! complete [`enumerator::LogicalEntry`] values. [`alias`], [`freerun`] and
//! [`creator`] do the reverse: deriving a short alias, finding room for it, and
//! writing a new chain. [`resolver`] and [`walk`] build paths and tree walks out
//! of those primitives, and [`inverse`] caches the short-slot-to-long-name
//! mapping a filesystem otherwise has to rescan for on every query.
//!
//! Everything here is generic over [`volume::DirectorySlots`], so it runs the
//! same whether the directory lives in a [`volume::Volume`] backed by a real FAT
//! cluster chain or an in-memory [`volume::VecDirectory`] used in tests.

pub mod alias;
pub mod codec;
pub mod creator;
pub mod deleter;
pub mod enumerator;
pub mod error;
pub mod freerun;
pub mod inverse;
pub mod resolver;
pub mod scanner;
pub mod shortname;
pub mod slot;
pub mod volume;
pub mod walk;

pub use error::{LfnError, LongNameDebug};
pub use volume::{DirectorySlots, VecDirectory, Volume};
