//! XML document shape for chunk manifests, serialized via `quick-xml` + `serde`.
//!
//! The document has a fixed top-level shape: one header block naming the
//! source item, followed by the ordered chunk entries:
//!
//! ```xml
//! <chunksManifest schemaVersion="0.2">
//!   <header>
//!     <sourceContent contentId="item">
//!       <mimetype>text/plain</mimetype>
//!       <byteSize>150</byteSize>
//!       <md5>…</md5>
//!     </sourceContent>
//!   </header>
//!   <chunks>
//!     <chunk chunkId="item.dura-chunk-0000" index="0">
//!       <byteSize>100</byteSize>
//!       <md5>…</md5>
//!     </chunk>
//!   </chunks>
//! </chunksManifest>
//! ```

use serde::{Deserialize, Serialize};

use seam_types::{ChunkEntry, ChunksManifest, ManifestHeader};

use crate::error::ManifestError;

/// Manifest schema version this build reads and writes.
pub const SCHEMA_VERSION: &str = "0.2";

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

#[derive(Serialize, Deserialize)]
#[serde(rename = "chunksManifest")]
struct ChunksManifestXml {
    #[serde(rename = "@schemaVersion")]
    schema_version: String,
    header: HeaderXml,
    chunks: ChunksXml,
}

#[derive(Serialize, Deserialize)]
struct HeaderXml {
    #[serde(rename = "sourceContent")]
    source_content: SourceContentXml,
}

#[derive(Serialize, Deserialize)]
struct SourceContentXml {
    #[serde(rename = "@contentId")]
    content_id: String,
    mimetype: String,
    #[serde(rename = "byteSize")]
    byte_size: u64,
    md5: String,
}

#[derive(Serialize, Deserialize, Default)]
struct ChunksXml {
    #[serde(rename = "chunk", default)]
    chunk: Vec<ChunkXml>,
}

#[derive(Serialize, Deserialize)]
struct ChunkXml {
    #[serde(rename = "@chunkId")]
    chunk_id: String,
    #[serde(rename = "@index")]
    index: u32,
    #[serde(rename = "byteSize")]
    byte_size: u64,
    md5: String,
}

impl From<&ChunksManifest> for ChunksManifestXml {
    fn from(manifest: &ChunksManifest) -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            header: HeaderXml {
                source_content: SourceContentXml {
                    content_id: manifest.header.source_content_id.clone(),
                    mimetype: manifest.header.source_mimetype.clone(),
                    byte_size: manifest.header.source_byte_size,
                    md5: manifest.header.source_checksum.clone(),
                },
            },
            chunks: ChunksXml {
                chunk: manifest
                    .entries
                    .iter()
                    .map(|entry| ChunkXml {
                        chunk_id: entry.chunk_id.clone(),
                        index: entry.index,
                        byte_size: entry.byte_size,
                        md5: entry.chunk_checksum.clone(),
                    })
                    .collect(),
            },
        }
    }
}

impl ChunksManifestXml {
    fn into_model(self) -> ChunksManifest {
        let source = self.header.source_content;
        ChunksManifest {
            header: ManifestHeader {
                source_content_id: source.content_id,
                source_mimetype: source.mimetype,
                source_byte_size: source.byte_size,
                source_checksum: source.md5,
            },
            entries: self
                .chunks
                .chunk
                .into_iter()
                .map(|chunk| ChunkEntry {
                    chunk_id: chunk.chunk_id,
                    chunk_checksum: chunk.md5,
                    index: chunk.index,
                    byte_size: chunk.byte_size,
                })
                .collect(),
        }
    }
}

/// Render a manifest as an XML document, entries in list order.
pub fn serialize_manifest(manifest: &ChunksManifest) -> Result<String, ManifestError> {
    let doc = ChunksManifestXml::from(manifest);
    let body =
        quick_xml::se::to_string(&doc).map_err(|e| ManifestError::Serialize(e.to_string()))?;
    Ok(format!("{XML_DECLARATION}\n{body}"))
}

/// Parse an XML document back into a manifest.
///
/// A document whose `<chunks>` element holds no `<chunk>` children is a
/// valid empty manifest; anything structurally incompatible, or carrying
/// an unknown schema version, is an error.
pub fn deserialize_manifest(document: &str) -> Result<ChunksManifest, ManifestError> {
    let doc: ChunksManifestXml =
        quick_xml::de::from_str(document).map_err(|e| ManifestError::Malformed(e.to_string()))?;

    if doc.schema_version != SCHEMA_VERSION {
        return Err(ManifestError::UnsupportedVersion {
            found: doc.schema_version,
            supported: SCHEMA_VERSION,
        });
    }

    let manifest = doc.into_model();
    if manifest.header.source_content_id.is_empty() {
        return Err(ManifestError::Malformed(
            "header contentId is empty".to_string(),
        ));
    }

    Ok(manifest)
}
