// File: installer/src/services/copy_worker.rs
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::constants::copy::CHUNK_SIZE;
use crate::errors::CopyError;
use crate::types::{CopyProgress, CopyReport};

/// Copies one file to one target path in fixed-size chunks.
#[derive(Debug, Clone)]
pub struct CopyWorker {
    chunk_size: usize,
    cancel: CancellationToken,
}

impl Default for CopyWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyWorker {
    pub fn new() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Copies `source` over `target`, creating or truncating the target.
    ///
    /// A progress event follows every written chunk. The first open, read or
    /// write failure ends the copy; nothing is retried and a partially
    /// written target is left in place.
    pub async fn copy(
        &self,
        source: &Path,
        target: &Path,
        progress: &mpsc::UnboundedSender<CopyProgress>,
    ) -> Result<CopyReport, CopyError> {
        let mut source_file = File::open(source)
            .await
            .map_err(|e| CopyError::OpenSource {
                path: source.to_path_buf(),
                source: e,
            })?;

        let total = source_file
            .metadata()
            .await
            .map_err(|e| CopyError::Read {
                path: source.to_path_buf(),
                source: e,
            })?
            .len();

        let mut target_file = File::create(target)
            .await
            .map_err(|e| CopyError::OpenTarget {
                path: target.to_path_buf(),
                source: e,
            })?;

        debug!(
            "Copying {} -> {} ({} bytes, {} byte chunks)",
            source.display(),
            target.display(),
            total,
            self.chunk_size
        );

        let mut buffer = vec![0u8; self.chunk_size];
        let mut copied: u64 = 0;

        loop {
            if self.cancel.is_cancelled() {
                return Err(CopyError::Cancelled {
                    path: target.to_path_buf(),
                    copied,
                });
            }

            let read = match source_file.read(&mut buffer).await {
                Ok(0) => break,
                Ok(read) => read,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(CopyError::Read {
                        path: source.to_path_buf(),
                        source: e,
                    })
                }
            };

            target_file
                .write_all(&buffer[..read])
                .await
                .map_err(|e| CopyError::Write {
                    path: target.to_path_buf(),
                    source: e,
                })?;

            copied += read as u64;
            // The receiver may already be gone; the copy itself still matters
            let _ = progress.send(CopyProgress { copied, total });

            tokio::task::yield_now().await;
        }

        target_file.flush().await.map_err(|e| CopyError::Write {
            path: target.to_path_buf(),
            source: e,
        })?;

        Ok(CopyReport {
            bytes_copied: copied,
        })
    }

    /// Runs [`CopyWorker::copy`] on its own task.
    pub fn spawn(self, source: PathBuf, target: PathBuf) -> CopyJob {
        let (progress_tx, progress_rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = oneshot::channel();

        let job_target = target.clone();
        tokio::spawn(async move {
            let result = self.copy(&source, &target, &progress_tx).await;
            match &result {
                Ok(report) => info!(
                    "Copied {} ({} bytes)",
                    target.display(),
                    report.bytes_copied
                ),
                Err(e) => error!("Copy failed: {}", e),
            }
            let _ = done_tx.send(result);
        });

        CopyJob {
            target: job_target,
            progress: progress_rx,
            done: done_rx,
        }
    }
}

/// Handle to a copy running on another task.
pub struct CopyJob {
    target: PathBuf,
    progress: mpsc::UnboundedReceiver<CopyProgress>,
    done: oneshot::Receiver<Result<CopyReport, CopyError>>,
}

impl CopyJob {
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Waits for the copy to finish, passing every progress event to
    /// `on_progress` in the order the worker sent them.
    pub async fn wait_with_progress<F>(mut self, mut on_progress: F) -> Result<CopyReport, CopyError>
    where
        F: FnMut(CopyProgress),
    {
        let result = loop {
            tokio::select! {
                biased;
                Some(progress) = self.progress.recv() => on_progress(progress),
                result = &mut self.done => break result,
            }
        };

        while let Ok(progress) = self.progress.try_recv() {
            on_progress(progress);
        }

        result.unwrap_or(Err(CopyError::WorkerLost { path: self.target }))
    }

    pub async fn wait(self) -> Result<CopyReport, CopyError> {
        self.wait_with_progress(|_| {}).await
    }
}
