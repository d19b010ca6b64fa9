// File: installer/src/types.rs
use std::fmt;

use crate::errors::CopyError;

// === COPY STRUCTURES ===

/// Cumulative progress of one file copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyProgress {
    pub copied: u64,
    pub total: u64,
}

impl CopyProgress {
    /// Whole percentage of `total` copied so far, rounded and capped at 100.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let percent = (self.copied as f64 / self.total as f64 * 100.0).round();
        percent.clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyReport {
    pub bytes_copied: u64,
}

// === INSTALL STRUCTURES ===

/// The two files that make up a snapshot, in copy order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFile {
    Index,
    Blocks,
}

impl SnapshotFile {
    pub const COPY_ORDER: [SnapshotFile; 2] = [SnapshotFile::Index, SnapshotFile::Blocks];
}

impl fmt::Display for SnapshotFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotFile::Index => write!(f, "block index"),
            SnapshotFile::Blocks => write!(f, "block data"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    CheckingSource,
    NoExistingTarget,
    ComparingHeights,
    AwaitingConfirmation,
    Copying(SnapshotFile),
    Done,
    Aborted,
}

/// Chain heights of the bundled and the installed snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heights {
    pub source: u64,
    pub target: u64,
}

impl Heights {
    pub fn is_outdated(&self) -> bool {
        self.target < self.source
    }
}

/// Facts about both locations gathered before deciding what to do.
///
/// Fields are only meaningful once the earlier ones allow it: `heights` is
/// read only when the target holds a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapshotProbe {
    pub source_recognized: bool,
    pub target_exists: bool,
    pub heights: Option<Heights>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Bundled snapshot missing or not in the expected block format
    SourceUnrecognized,
    /// One of the index files could not be read
    HeightsUnreadable,
    /// Installed chain is at least as high as the bundled one
    TargetUpToDate(Heights),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::SourceUnrecognized => {
                write!(f, "no recognized bundled blockchain")
            }
            SkipReason::HeightsUnreadable => {
                write!(f, "blockchain heights could not be read")
            }
            SkipReason::TargetUpToDate(heights) => write!(
                f,
                "installed blockchain is up to date (installed: {}, bundled: {})",
                heights.target, heights.source
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip(SkipReason),
    Install,
    Confirm(Heights),
}

/// States visited while deciding, ending with the decision reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub states: Vec<InstallState>,
    pub decision: Decision,
}

#[derive(Debug)]
pub enum InstallOutcome {
    Installed { bytes_copied: u64 },
    Skipped(SkipReason),
    Declined(Heights),
    Failed(CopyError),
}

impl InstallOutcome {
    pub fn is_installed(&self) -> bool {
        matches!(self, InstallOutcome::Installed { .. })
    }
}

#[derive(Debug)]
pub struct InstallReport {
    pub outcome: InstallOutcome,
    pub states: Vec<InstallState>,
}
