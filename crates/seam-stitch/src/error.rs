//! Error types for stitching operations.

/// Errors that can occur reassembling content from chunks.
#[derive(Debug, thiserror::Error)]
pub enum StitchError {
    /// A chunk or manifest could not be fetched from the data source.
    #[error("store error: {0}")]
    Store(#[from] seam_store::StoreError),

    /// An I/O error occurred on a chunk stream or the destination.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest document could not be parsed.
    #[error("manifest error: {0}")]
    Manifest(#[from] seam_manifest::ManifestError),

    /// The reassembled bytes do not match the manifest's source checksum.
    #[error("reassembled content checksum mismatch: expected {expected}, actual {actual}")]
    ChecksumMismatch {
        /// Checksum recorded in the manifest header.
        expected: String,
        /// Checksum computed over the reassembled stream.
        actual: String,
    },
}
