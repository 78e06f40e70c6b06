//! Chunk stitching for Seam: reconstructing original content from its
//! manifest and stored chunks.
//!
//! - [`Stitcher`] — one logical, ordered, lazily-fetched byte stream over
//!   the chunks a manifest names. No chunk is fetched before it is
//!   needed, and at most one chunk stream is open at a time.
//! - [`retrieve_to_dir`] — driver that resolves a manifest by ID,
//!   deserializes it, and writes the reconstructed stream to a file,
//!   verifying the whole-object checksum along the way.

mod error;
mod retrieve;
mod stitcher;

pub use error::StitchError;
pub use retrieve::retrieve_to_dir;
pub use stitcher::{ChunkListener, ChunkRef, Stitcher};
