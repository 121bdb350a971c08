//! Record storage backends.

mod backend;
mod filesystem;
mod memory;
mod records;

pub use backend::RecordStore;
pub use filesystem::FilesystemStore;
pub use memory::MemoryStore;
pub use records::{ArtifactRecord, Project, SourceDocument};
