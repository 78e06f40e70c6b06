//! Chunk manifest serialization.
//!
//! Maps the in-memory [`ChunksManifest`](seam_types::ChunksManifest) model
//! to and from its XML storage format. [`serialize_manifest`] and
//! [`deserialize_manifest`] are mutual inverses for any well-formed
//! manifest, including one with zero entries; a structurally incompatible
//! document fails with [`ManifestError::Malformed`] rather than being
//! treated as empty.

mod error;
mod xml;

pub use error::ManifestError;
pub use xml::{SCHEMA_VERSION, deserialize_manifest, serialize_manifest};
