//! Central repository for snapshot format constants and user-facing text
//!
//! Grouped by concern so the on-disk format, copy tuning and message
//! templates each have a single source of truth.

/// Block snapshot on-disk format
pub mod format {
    /// Expected byte length of the genesis block, used as a format fingerprint
    pub const GENESIS_BLOCK_SIZE: u32 = 0xd5;

    /// Width of every field in the block index file
    pub const INDEX_FIELD_BYTES: u64 = 4;

    /// Count field plus the first (begin, end) offset pair
    pub const INDEX_HEADER_BYTES: u64 = 3 * INDEX_FIELD_BYTES;
}

/// Default snapshot file names
pub mod files {
    /// Block index file name
    pub const BLOCK_INDEXES: &str = "blockindexes.dat";

    /// Raw block data file name
    pub const BLOCKS: &str = "blocks.dat";
}

/// Copy worker tuning
pub mod copy {
    /// Bytes read and written per chunk (1 MiB)
    pub const CHUNK_SIZE: usize = 0x100000;
}

/// Status and prompt text shown to the user
pub mod messages {
    /// Emitted once when an installation starts copying
    pub const COPYING: &str = "Copying blockchain files...";

    /// Title of the replacement confirmation question
    pub const QUESTION_TITLE: &str = "Blockchain installation";
}

/// Binary defaults
pub mod defaults {
    /// Config file read when no path is given on the command line
    pub const CONFIG_PATH: &str = "config/installer.toml";

    /// Bundled snapshot directory when the config leaves it unset
    pub const APPLICATION_DIR: &str = ".";
}
