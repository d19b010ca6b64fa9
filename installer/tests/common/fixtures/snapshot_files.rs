//! Writers for on-disk snapshot fixtures

use installer::constants::format::GENESIS_BLOCK_SIZE;
use std::fs;
use std::path::Path;

/// Writes a block index file: count followed by the given offsets.
pub fn write_index(dir: &Path, count: u32, offsets: &[u32]) {
    fs::create_dir_all(dir).expect("Failed to create snapshot dir");
    let mut bytes = Vec::with_capacity(4 + offsets.len() * 4);
    bytes.extend_from_slice(&count.to_le_bytes());
    for offset in offsets {
        bytes.extend_from_slice(&offset.to_le_bytes());
    }
    fs::write(dir.join("blockindexes.dat"), bytes).expect("Failed to write index file");
}

/// Writes `len` bytes of recognisable block data.
pub fn write_blocks(dir: &Path, len: usize) {
    fs::create_dir_all(dir).expect("Failed to create snapshot dir");
    fs::write(dir.join("blocks.dat"), block_bytes(len)).expect("Failed to write blocks file");
}

pub fn block_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Writes a complete, recognized snapshot holding `count` blocks.
pub fn create_mock_snapshot(dir: &Path, count: u32) {
    create_mock_snapshot_with_blocks(dir, count, GENESIS_BLOCK_SIZE as usize * 4);
}

pub fn create_mock_snapshot_with_blocks(dir: &Path, count: u32, blocks_len: usize) {
    write_index(
        dir,
        count,
        &[0, GENESIS_BLOCK_SIZE, GENESIS_BLOCK_SIZE, GENESIS_BLOCK_SIZE * 2],
    );
    write_blocks(dir, blocks_len);
}

pub fn read_count(dir: &Path) -> u32 {
    let bytes = fs::read(dir.join("blockindexes.dat")).expect("Failed to read index file");
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
