//! Path resolution: forward-slash segments over long names, plus the `cluster:N`
//! and `entry:C,I` escape forms that bypass name lookup.

use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::lfn::codec;
use crate::lfn::creator;
use crate::lfn::enumerator::Entries;
use crate::lfn::error::LfnError;
use crate::lfn::slot;
use crate::lfn::volume::DirectorySlots;
use crate::structures::directory::FileAttributes;

/// What a path resolves to: either a slot inside some directory, or a directory
/// named directly by `cluster:N` with no slot of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Entry { cluster: u32, index: usize },
    Cluster(u32),
}

/// Supplies directories by cluster number; the only thing the resolver needs from
/// the filesystem below it.
pub trait DirectoryProvider {
    type Dir: DirectorySlots;

    fn root_cluster(&self) -> u32;
    fn open(&mut self, cluster: u32) -> Result<Self::Dir, LfnError>;
}

fn first_cluster_of(raw: &[u8; 32]) -> u32 {
    slot::first_cluster(slot::as_file_entry(raw))
}

fn lookup_by_name<D: DirectorySlots + ?Sized>(
    dir: &D,
    name: &str,
    insensitive: bool,
) -> Option<usize> {
    Entries::new(dir)
        .find(|entry| {
            let ord = if insensitive {
                codec::utf8casecmp(&entry.name, name)
            } else {
                codec::utf8cmp(&entry.name, name)
            };
            ord == Ordering::Equal
        })
        .map(|entry| entry.short_index)
}

fn segments(path: &str) -> Vec<&str> {
    path.trim_matches('/').split('/').filter(|s| !s.is_empty()).collect()
}

/// Resolves `path` starting from `start_cluster` (or from the root, if `path`
/// begins with `/`).
pub fn resolve<P: DirectoryProvider>(
    provider: &mut P,
    start_cluster: u32,
    path: &str,
    insensitive: bool,
) -> Result<Resolved, LfnError> {
    log::trace!("resolving {path:?} from cluster {start_cluster}");
    let result = resolve_inner(provider, start_cluster, path, insensitive);
    match &result {
        Ok(resolved) => log::trace!("resolved {path:?} to {resolved:?}"),
        Err(err) => log::debug!("failed to resolve {path:?}: {err:?}"),
    }
    result
}

fn resolve_inner<P: DirectoryProvider>(
    provider: &mut P,
    start_cluster: u32,
    path: &str,
    insensitive: bool,
) -> Result<Resolved, LfnError> {
    let mut cluster = if path.starts_with('/') {
        provider.root_cluster()
    } else {
        start_cluster
    };

    let segs = segments(path);
    if segs.is_empty() {
        return Ok(Resolved::Cluster(cluster));
    }

    let last_idx = segs.len() - 1;
    for (i, seg) in segs.into_iter().enumerate() {
        let last = i == last_idx;

        if let Some(rest) = seg.strip_prefix("cluster:") {
            let n: u32 = rest.parse().map_err(|_| LfnError::Invalid)?;
            if last {
                return Ok(Resolved::Cluster(n));
            }
            cluster = n;
            continue;
        }

        if let Some(rest) = seg.strip_prefix("entry:") {
            let mut parts = rest.split(',');
            let c: u32 = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or(LfnError::Invalid)?;
            let index: usize = parts
                .next()
                .and_then(|s| s.parse().ok())
                .ok_or(LfnError::Invalid)?;
            let c = if c == 0 { provider.root_cluster() } else { c };
            if last {
                return Ok(Resolved::Entry { cluster: c, index });
            }
            let dir = provider.open(c)?;
            cluster = first_cluster_of(&dir.slot(index));
            continue;
        }

        let dir = provider.open(cluster)?;
        let index = lookup_by_name(&dir, seg, insensitive).ok_or(LfnError::NotFound)?;
        if last {
            return Ok(Resolved::Entry { cluster, index });
        }
        cluster = first_cluster_of(&dir.slot(index));
    }

    unreachable!("loop always returns on its last iteration")
}

/// Splits `path` into a parent directory path and a final file name, resolves
/// the parent (relative to `start_cluster`, or the root if `path` begins with
/// `/`), and creates `name` there with `attributes`.
///
/// Grounded on `fatcreatefilepathlongbothdir` (`long.c:940`): split on the last
/// `/`, look up everything before it as a directory (falling back to
/// `start_cluster` when there is no `/` at all), then create the file in
/// whatever directory that resolves to. Returns the parent directory (mutated,
/// for the caller to persist) together with the new short slot's index.
pub fn create_by_path<P: DirectoryProvider>(
    provider: &mut P,
    start_cluster: u32,
    path: &str,
    attributes: FileAttributes,
    insensitive: bool,
) -> Result<(P::Dir, usize), LfnError> {
    let (dirname, file) = match path.rfind('/') {
        None => (None, path),
        Some(0) => (Some("/"), &path[1..]),
        Some(pos) => (Some(&path[..pos]), &path[pos + 1..]),
    };

    let parent_cluster = match dirname {
        None => start_cluster,
        Some(dirname) => match resolve(provider, start_cluster, dirname, insensitive)? {
            Resolved::Cluster(cluster) => cluster,
            Resolved::Entry { cluster, index } => {
                let dir = provider.open(cluster)?;
                first_cluster_of(&dir.slot(index))
            }
        },
    };

    let mut dir = provider.open(parent_cluster)?;
    let index = creator::create(&mut dir, file, attributes)?;
    Ok((dir, index))
}
