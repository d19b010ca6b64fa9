// File: installer/src/operations/install.rs
use std::sync::Arc;
use tokio::{fs, task};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::decision::decide;
use crate::config::InstallerConfig;
use crate::constants::copy::CHUNK_SIZE;
use crate::constants::messages;
use crate::errors::{CopyError, SnapshotError};
use crate::services::{ConfirmationPrompt, CopyWorker, StatusSink};
use crate::snapshot::SnapshotLocation;
use crate::types::{
    CopyProgress, Decision, Heights, InstallOutcome, InstallReport, InstallState, SnapshotFile,
    SnapshotProbe,
};

/// Installs a bundled blockchain snapshot into the data directory when the
/// installed one is missing or older.
pub struct Installer {
    source: SnapshotLocation,
    target: SnapshotLocation,
    prompt: Arc<dyn ConfirmationPrompt>,
    status: Arc<dyn StatusSink>,
    cancel: CancellationToken,
    chunk_size: usize,
}

impl Installer {
    pub fn new(
        config: &InstallerConfig,
        prompt: Arc<dyn ConfirmationPrompt>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            source: config.source_location(),
            target: config.target_location(),
            prompt,
            status,
            cancel: CancellationToken::new(),
            chunk_size: CHUNK_SIZE,
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn source(&self) -> &SnapshotLocation {
        &self.source
    }

    pub fn target(&self) -> &SnapshotLocation {
        &self.target
    }

    /// Runs one installation check and, when warranted, the installation.
    ///
    /// Never fails: skipped, declined and failed runs are all reported in
    /// the returned outcome and logged.
    pub async fn exec(&self) -> InstallReport {
        info!(
            "Checking bundled blockchain in {} against {}",
            self.source.dir().display(),
            self.target.dir().display()
        );

        let probe = self.probe().await;
        let plan = decide(&probe);
        let mut states = plan.states;
        debug!("Decision states: {:?} -> {:?}", states, plan.decision);

        let outcome = match plan.decision {
            Decision::Skip(reason) => {
                info!("Skipping blockchain installation: {}", reason);
                InstallOutcome::Skipped(reason)
            }
            Decision::Install => {
                info!("No installed blockchain found, installing bundled one");
                self.run_install(&mut states).await
            }
            Decision::Confirm(heights) => {
                if self.ask_confirmation(heights).await {
                    info!(
                        "✓ Replacement confirmed (installed: {}, bundled: {})",
                        heights.target, heights.source
                    );
                    self.run_install(&mut states).await
                } else {
                    info!("Blockchain replacement declined");
                    states.push(InstallState::Aborted);
                    InstallOutcome::Declined(heights)
                }
            }
        };

        InstallReport { outcome, states }
    }

    /// Gathers only the facts the decision needs, in decision order.
    pub async fn probe(&self) -> SnapshotProbe {
        let mut probe = SnapshotProbe {
            source_recognized: self.check_if_current_blockchain_exists().await,
            ..SnapshotProbe::default()
        };
        if !probe.source_recognized {
            return probe;
        }

        probe.target_exists = self.check_if_target_blockchain_exists().await;
        if !probe.target_exists {
            return probe;
        }

        probe.heights = match self.read_heights().await {
            Ok(heights) => Some(heights),
            Err(e) => {
                warn!("Could not compare blockchain heights: {}", e);
                None
            }
        };
        probe
    }

    /// True when the bundled snapshot holds a genesis block of the expected
    /// size.
    pub async fn check_if_current_blockchain_exists(&self) -> bool {
        match self.source.read_genesis_block().await {
            Ok(_) => true,
            Err(e) => {
                debug!("Bundled blockchain not usable: {}", e);
                false
            }
        }
    }

    pub async fn check_if_target_blockchain_exists(&self) -> bool {
        self.target.has_blocks_file().await
    }

    pub async fn read_heights(&self) -> Result<Heights, SnapshotError> {
        let source = self.source.read_height().await?;
        let target = self.target.read_height().await?;
        Ok(Heights { source, target })
    }

    /// Both heights when the installed chain is strictly lower than the
    /// bundled one, `None` otherwise or when either cannot be read.
    pub async fn check_if_blockchain_outdated(&self) -> Option<Heights> {
        self.read_heights()
            .await
            .ok()
            .filter(Heights::is_outdated)
    }

    /// Copies the index file and then the data file into the data
    /// directory.
    ///
    /// Stops at the first failure. A copied index file is not rolled back
    /// when the data file copy fails.
    pub async fn install_blockchain(&self) -> Result<u64, CopyError> {
        let mut states = Vec::new();
        self.copy_snapshot_files(&mut states).await
    }

    /// Asks the prompt on a blocking thread so a console read never stalls
    /// the runtime. Cancellation while waiting counts as a decline.
    async fn ask_confirmation(&self, heights: Heights) -> bool {
        let prompt = Arc::clone(&self.prompt);
        let question = question_text(heights);
        let answer =
            task::spawn_blocking(move || prompt.confirm(messages::QUESTION_TITLE, &question));

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                warn!("Confirmation interrupted, leaving installed blockchain in place");
                false
            }
            result = answer => match result {
                Ok(confirmed) => confirmed,
                Err(e) => {
                    warn!("Confirmation prompt failed: {}", e);
                    false
                }
            },
        }
    }

    async fn run_install(&self, states: &mut Vec<InstallState>) -> InstallOutcome {
        match self.copy_snapshot_files(states).await {
            Ok(bytes_copied) => {
                states.push(InstallState::Done);
                info!(
                    "Blockchain installed successfully into {} ({:.1} MB)",
                    self.target.dir().display(),
                    bytes_copied as f64 / 1024.0 / 1024.0
                );
                InstallOutcome::Installed { bytes_copied }
            }
            Err(e) => {
                states.push(InstallState::Aborted);
                warn!("Blockchain installation aborted: {}", e);
                InstallOutcome::Failed(e)
            }
        }
    }

    async fn copy_snapshot_files(&self, states: &mut Vec<InstallState>) -> Result<u64, CopyError> {
        self.status.show_message(messages::COPYING);

        // Step 1: Make sure the data directory exists
        fs::create_dir_all(self.target.dir())
            .await
            .map_err(|e| CopyError::CreateDir {
                path: self.target.dir().to_path_buf(),
                source: e,
            })?;
        debug!("✓ Target directory ready: {}", self.target.dir().display());

        if let Some(size) = self.source.blocks_file_size().await {
            info!(
                "Bundled block data size: {:.1} MB",
                size as f64 / 1024.0 / 1024.0
            );
        }

        // Step 2: Index first, then data, each only after the previous one finished
        let mut bytes_copied = 0;
        for file in SnapshotFile::COPY_ORDER {
            states.push(InstallState::Copying(file));
            info!("Copying {} file...", file);

            let worker = CopyWorker::new()
                .with_chunk_size(self.chunk_size)
                .with_cancellation(self.cancel.clone());
            let job = worker.spawn(self.source.path_of(file), self.target.path_of(file));
            debug!("Waiting for copy into {}", job.target().display());
            let report = job
                .wait_with_progress(|progress| {
                    self.status.show_message(&progress_message(progress))
                })
                .await?;

            bytes_copied += report.bytes_copied;
            info!("✓ {} file copied ({} bytes)", file, report.bytes_copied);
        }

        Ok(bytes_copied)
    }
}

/// Question asked before an installed chain is replaced.
pub fn question_text(heights: Heights) -> String {
    format!(
        "Would you like to replace your current blockchain (height: {})\nwith the one in your GUI wallet folder (height: {})?",
        heights.target, heights.source
    )
}

pub fn progress_message(progress: CopyProgress) -> String {
    format!("{} ({}%)", messages::COPYING, progress.percent())
}
