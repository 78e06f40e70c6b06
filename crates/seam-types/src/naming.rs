//! Deterministic chunk and manifest naming.
//!
//! Chunks of a source item `S` are stored under `S.dura-chunk-0000`,
//! `S.dura-chunk-0001`, … and the manifest under `S.dura-manifest`. The
//! chunk index is rendered as a fixed-width, zero-padded decimal, which
//! caps a single manifest at [`MAX_CHUNK_INDEX`] + 1 chunks.

/// Infix between the source ID and the zero-padded chunk index.
pub const CHUNK_INFIX: &str = "dura-chunk-";

/// Suffix appended to a source ID to form its manifest storage key.
pub const MANIFEST_SUFFIX: &str = ".dura-manifest";

/// Width of the zero-padded decimal chunk index.
pub const CHUNK_INDEX_WIDTH: usize = 4;

/// Largest index representable in the fixed-width naming scheme.
pub const MAX_CHUNK_INDEX: u32 = 9_999;

/// Storage key for chunk `index` of `source_content_id`.
///
/// The index is not range-checked here; sequencing and exhaustion are the
/// chunk ID sequence's responsibility.
pub fn chunk_content_id(source_content_id: &str, index: u32) -> String {
    format!(
        "{source_content_id}.{CHUNK_INFIX}{index:0width$}",
        width = CHUNK_INDEX_WIDTH
    )
}

/// Storage key for the manifest of `source_content_id`.
pub fn manifest_content_id(source_content_id: &str) -> String {
    format!("{source_content_id}{MANIFEST_SUFFIX}")
}

/// Whether a storage key names a chunk manifest.
pub fn is_manifest_id(content_id: &str) -> bool {
    content_id.ends_with(MANIFEST_SUFFIX)
}

/// The source content ID a manifest key was derived from, if it carries
/// the manifest suffix.
pub fn source_id_of_manifest(content_id: &str) -> Option<&str> {
    content_id.strip_suffix(MANIFEST_SUFFIX)
}
