//! Error types for the blockchain installer
//!
//! Snapshot inspection failures, copy failures and configuration failures
//! each get their own enum.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Snapshot inspection error variants
#[derive(Debug)]
pub enum SnapshotError {
    /// A required snapshot file does not exist
    MissingFile { path: PathBuf },

    /// A snapshot file exists but could not be opened or read
    Unreadable { path: PathBuf, source: io::Error },

    /// A snapshot file ended before the expected fields
    Truncated { path: PathBuf, needed: u64 },

    /// The first block has an unexpected size
    GenesisSizeMismatch { expected: u32, actual: u32 },

    /// The index file records zero blocks, so no height exists
    EmptyIndex { path: PathBuf },
}

/// Copy error variants
#[derive(Debug)]
pub enum CopyError {
    /// Source file could not be opened for reading
    OpenSource { path: PathBuf, source: io::Error },

    /// Target file could not be opened for writing
    OpenTarget { path: PathBuf, source: io::Error },

    /// Reading from the source failed before end of file
    Read { path: PathBuf, source: io::Error },

    /// Writing to the target failed
    Write { path: PathBuf, source: io::Error },

    /// Target directory could not be created
    CreateDir { path: PathBuf, source: io::Error },

    /// The copy was cancelled between chunks
    Cancelled { path: PathBuf, copied: u64 },

    /// The worker task ended without reporting a result
    WorkerLost { path: PathBuf },
}

/// Configuration error variants
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    LoadFailed { path: String, reason: String },

    /// Configuration parsing error
    ParseError { reason: String },

    /// Invalid configuration value
    InvalidValue { field: String, reason: String },
}

impl CopyError {
    /// Underlying I/O error, if the failure came from the filesystem
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            CopyError::OpenSource { source, .. }
            | CopyError::OpenTarget { source, .. }
            | CopyError::Read { source, .. }
            | CopyError::Write { source, .. }
            | CopyError::CreateDir { source, .. } => Some(source),
            CopyError::Cancelled { .. } | CopyError::WorkerLost { .. } => None,
        }
    }

    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        self.io_error().map(io::Error::kind)
    }

    pub fn raw_os_error(&self) -> Option<i32> {
        self.io_error().and_then(io::Error::raw_os_error)
    }
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::MissingFile { path } => {
                write!(f, "Snapshot file not found: {}", path.display())
            }
            SnapshotError::Unreadable { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            SnapshotError::Truncated { path, needed } => {
                write!(
                    f,
                    "{} is truncated (needs at least {} bytes)",
                    path.display(),
                    needed
                )
            }
            SnapshotError::GenesisSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "Genesis block is {} bytes, expected {}",
                    actual, expected
                )
            }
            SnapshotError::EmptyIndex { path } => {
                write!(f, "Block index {} records no blocks", path.display())
            }
        }
    }
}

impl fmt::Display for CopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopyError::OpenSource { path, source } => {
                write!(f, "Failed to open source {}: {}", path.display(), source)
            }
            CopyError::OpenTarget { path, source } => {
                write!(f, "Failed to open target {}: {}", path.display(), source)
            }
            CopyError::Read { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            CopyError::Write { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            CopyError::CreateDir { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            CopyError::Cancelled { path, copied } => {
                write!(
                    f,
                    "Copy of {} cancelled after {} bytes",
                    path.display(),
                    copied
                )
            }
            CopyError::WorkerLost { path } => {
                write!(f, "Copy worker for {} exited without a result", path.display())
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::LoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path, reason)
            }
            ConfigError::ParseError { reason } => {
                write!(f, "Failed to parse config: {}", reason)
            }
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnapshotError::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::error::Error for CopyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.io_error().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl std::error::Error for ConfigError {}
