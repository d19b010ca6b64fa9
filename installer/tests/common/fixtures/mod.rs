pub mod collaborators;
pub mod snapshot_files;

pub use collaborators::*;
pub use snapshot_files::*;
