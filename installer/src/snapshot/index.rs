//! Block index file layout
//!
//! ```text
//! [count: u32 LE][begin_0: u32 LE][end_0: u32 LE][begin_1: u32 LE]...
//! ```
//!
//! `count` is the number of indexed blocks, so the chain height is
//! `count - 1`. The first offset pair bounds the genesis block inside the
//! block data file.

use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::constants::format::GENESIS_BLOCK_SIZE;

/// The fixed-size prefix of a block index file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockIndexHeader {
    pub count: u32,
    pub genesis_begin: u32,
    pub genesis_end: u32,
}

impl BlockIndexHeader {
    /// Reads the count field and the first offset pair.
    ///
    /// A reader that ends early yields [`io::ErrorKind::UnexpectedEof`].
    pub async fn read_from<R: AsyncRead + Unpin>(reader: &mut R) -> io::Result<Self> {
        let count = reader.read_u32_le().await?;
        let genesis_begin = reader.read_u32_le().await?;
        let genesis_end = reader.read_u32_le().await?;
        Ok(Self {
            count,
            genesis_begin,
            genesis_end,
        })
    }

    /// Byte length of the genesis block.
    ///
    /// Offsets are unsigned, so a pair with `end < begin` wraps around and
    /// can never equal the expected size.
    pub fn genesis_block_size(&self) -> u32 {
        self.genesis_end.wrapping_sub(self.genesis_begin)
    }

    pub fn has_expected_genesis_size(&self) -> bool {
        self.genesis_block_size() == GENESIS_BLOCK_SIZE
    }

    pub fn height(&self) -> Option<u64> {
        height_from_count(self.count)
    }
}

/// Reads only the leading count field.
pub async fn read_count<R: AsyncRead + Unpin>(reader: &mut R) -> io::Result<u32> {
    reader.read_u32_le().await
}

/// Converts a stored block count into a chain height.
///
/// Returns `None` for an empty index, which has no height at all.
pub fn height_from_count(count: u32) -> Option<u64> {
    count.checked_sub(1).map(u64::from)
}
