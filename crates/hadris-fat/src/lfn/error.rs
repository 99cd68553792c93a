//! Error and debug-verbosity types for the long file name subsystem.

/// Errors produced while scanning, resolving or mutating long file name chains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LfnError {
    #[error("name not found in directory")]
    NotFound,
    #[error("name or path rejected by validity rules")]
    Invalid,
    #[error("lfn chain failed an invariant check")]
    Corrupt,
    #[error("{0} code unit(s) could not be converted")]
    Encoding(u32),
    #[error("directory has no free run of {0} slot(s)")]
    NoSpace(u32),
    #[error("short-alias generation exhausted its suffix range")]
    Collision,
}

/// How much detail to log while walking long file name chains.
///
/// Mirrors the verbosity knobs the reference implementation exposed through its
/// `fatlongdebug` global, but expressed as levels routed through the `log` crate
/// instead of a raw bitmask over stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongNameDebug {
    /// No extra logging beyond `warn!` on corruption.
    #[default]
    Off,
    /// Log each successful lookup/resolve at `debug!`.
    Lookup,
    /// Also log every slot visited while scanning a chain, at `trace!`.
    Chain,
    /// Log everything the subsystem does, including alias generation attempts.
    All,
}

impl LongNameDebug {
    pub fn logs_lookups(self) -> bool {
        !matches!(self, LongNameDebug::Off)
    }

    pub fn logs_chain(self) -> bool {
        matches!(self, LongNameDebug::Chain | LongNameDebug::All)
    }

    pub fn logs_all(self) -> bool {
        matches!(self, LongNameDebug::All)
    }
}
