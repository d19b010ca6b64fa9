use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, BufReader};
use tracing::debug;

use super::index::{self, BlockIndexHeader};
use crate::constants::format::{GENESIS_BLOCK_SIZE, INDEX_FIELD_BYTES, INDEX_HEADER_BYTES};
use crate::constants::files;
use crate::errors::SnapshotError;
use crate::types::SnapshotFile;

/// A directory holding one block index file and one block data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotLocation {
    dir: PathBuf,
    index_file_name: String,
    blocks_file_name: String,
}

impl SnapshotLocation {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_file_names(dir, files::BLOCK_INDEXES, files::BLOCKS)
    }

    pub fn with_file_names(dir: impl AsRef<Path>, index_file_name: &str, blocks_file_name: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            index_file_name: index_file_name.to_string(),
            blocks_file_name: blocks_file_name.to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index_path(&self) -> PathBuf {
        self.dir.join(&self.index_file_name)
    }

    pub fn blocks_path(&self) -> PathBuf {
        self.dir.join(&self.blocks_file_name)
    }

    pub fn path_of(&self, file: SnapshotFile) -> PathBuf {
        match file {
            SnapshotFile::Index => self.index_path(),
            SnapshotFile::Blocks => self.blocks_path(),
        }
    }

    /// True when the directory exists and holds a block data file.
    ///
    /// Only the data file matters here; an index without blocks is treated
    /// as no installed chain.
    pub async fn has_blocks_file(&self) -> bool {
        let dir_exists = fs::try_exists(&self.dir).await.unwrap_or(false);
        dir_exists && fs::try_exists(self.blocks_path()).await.unwrap_or(false)
    }

    /// Size of the block data file, if it can be stat'ed.
    pub async fn blocks_file_size(&self) -> Option<u64> {
        fs::metadata(self.blocks_path()).await.ok().map(|m| m.len())
    }

    /// Reads the genesis block after checking that its size matches
    /// `GENESIS_BLOCK_SIZE`.
    ///
    /// Both files must exist and the index must hold the count field and the
    /// first offset pair. The block is the first `GENESIS_BLOCK_SIZE` bytes
    /// of the data file, whatever the recorded begin offset.
    pub async fn read_genesis_block(&self) -> Result<Vec<u8>, SnapshotError> {
        let index_path = self.index_path();
        let blocks_path = self.blocks_path();
        ensure_exists(&index_path).await?;
        ensure_exists(&blocks_path).await?;

        let mut index_file = BufReader::new(open(&index_path).await?);
        let mut blocks_file = open(&blocks_path).await?;

        let header = BlockIndexHeader::read_from(&mut index_file)
            .await
            .map_err(|e| read_error(&index_path, e, INDEX_HEADER_BYTES))?;

        let block_size = header.genesis_block_size();
        if !header.has_expected_genesis_size() {
            return Err(SnapshotError::GenesisSizeMismatch {
                expected: GENESIS_BLOCK_SIZE,
                actual: block_size,
            });
        }

        let needed = u64::from(block_size);
        let mut block = vec![0u8; block_size as usize];
        blocks_file
            .read_exact(&mut block)
            .await
            .map_err(|e| read_error(&blocks_path, e, needed))?;

        debug!(
            "Read {} byte genesis block from {}",
            block.len(),
            blocks_path.display()
        );
        Ok(block)
    }

    /// Chain height recorded by the index file (`count - 1`).
    pub async fn read_height(&self) -> Result<u64, SnapshotError> {
        let index_path = self.index_path();
        let mut index_file = open(&index_path).await?;

        let count = index::read_count(&mut index_file)
            .await
            .map_err(|e| read_error(&index_path, e, INDEX_FIELD_BYTES))?;

        index::height_from_count(count).ok_or(SnapshotError::EmptyIndex { path: index_path })
    }
}

async fn ensure_exists(path: &Path) -> Result<(), SnapshotError> {
    match fs::try_exists(path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(SnapshotError::MissingFile {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(SnapshotError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

async fn open(path: &Path) -> Result<File, SnapshotError> {
    File::open(path).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SnapshotError::MissingFile {
            path: path.to_path_buf(),
        },
        _ => SnapshotError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

fn read_error(path: &Path, e: io::Error, needed: u64) -> SnapshotError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => SnapshotError::Truncated {
            path: path.to_path_buf(),
            needed,
        },
        _ => SnapshotError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    }
}
