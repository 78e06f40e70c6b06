//! Shared types for Seam.
//!
//! This crate defines the chunk manifest model ([`ChunksManifest`],
//! [`ManifestHeader`], [`ChunkEntry`]) and the [`naming`] scheme that maps a
//! source content ID to its chunk and manifest storage keys.

mod manifest;
pub mod naming;

pub use manifest::{ChunkEntry, ChunksManifest, ManifestHeader};
