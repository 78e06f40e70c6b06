//! Error types for manifest serialization.

/// Errors that can occur mapping a manifest to or from its XML document.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The document is not a structurally valid chunk manifest.
    #[error("malformed manifest document: {0}")]
    Malformed(String),

    /// The manifest could not be rendered as XML.
    #[error("manifest serialization failed: {0}")]
    Serialize(String),

    /// The document declares a schema version this build does not support.
    #[error("unsupported manifest schema version {found}, supported version is {supported}")]
    UnsupportedVersion {
        /// Version found in the document.
        found: String,
        /// Version this build supports.
        supported: &'static str,
    },
}
