//! In-memory storage backend.
//!
//! [`MemoryArchive`] implements [`ArchiveWriter`](crate::core::ArchiveWriter)
//! over a node arena; finishing it pushes the archive tables through their
//! persisted encoding and yields a [`MemoryArchiveReader`].

mod arena;
mod reader;
mod writer;

pub use reader::MemoryArchiveReader;
pub use writer::MemoryArchive;
