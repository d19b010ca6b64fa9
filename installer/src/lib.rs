pub mod cli;
pub mod config;
pub mod constants;
pub mod errors;
pub mod operations;
pub mod services;
pub mod snapshot;
pub mod types;

// Re-export commonly used types
pub use config::{ConfigManager, InstallerConfig};
pub use errors::{ConfigError, CopyError, SnapshotError};
pub use operations::Installer;
pub use services::{ConfirmationPrompt, CopyWorker, StatusSink};
pub use snapshot::SnapshotLocation;
pub use types::{InstallOutcome, InstallReport, InstallState};
