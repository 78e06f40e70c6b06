//! Content chunking for Seam.
//!
//! This crate provides:
//! - [`ChunkIdSequence`] — monotonic, bounded chunk ID generation for a
//!   source content item.
//! - [`Chunker`] — a single-pass pull engine that splits a source byte
//!   stream into bounded chunks, computing per-chunk and whole-source
//!   checksums and building the [`ChunksManifest`](seam_types::ChunksManifest)
//!   as it goes.
//!
//! The manifest itself is regular content: serialized (see `seam-manifest`)
//! and stored alongside the chunks under its own storage key.

mod chunker;
mod error;
mod sequence;

pub use chunker::{Chunk, Chunker};
pub use error::ChunkError;
pub use sequence::ChunkIdSequence;
