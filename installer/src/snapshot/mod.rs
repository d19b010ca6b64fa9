pub mod index;
pub mod location;

pub use index::{height_from_count, BlockIndexHeader};
pub use location::SnapshotLocation;
