//! Lazy, pull-based chunk reassembly.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use seam_store::{ContentStream, DataSource};
use seam_types::ChunksManifest;

use crate::error::StitchError;

/// Location of one chunk to stitch: `(space, item)` keys for the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRef {
    /// Space (container) the chunk lives in.
    pub space_id: String,
    /// Storage key of the chunk.
    pub content_id: String,
}

/// Notified once per chunk, after that chunk's final byte has been
/// delivered to the caller. Used for progress reporting without altering
/// the read protocol.
pub trait ChunkListener: Send {
    /// Called with the chunk's storage key when it has been fully read.
    fn chunk_stitched(&mut self, content_id: &str);
}

struct OpenChunk {
    content_id: String,
    stream: ContentStream,
}

/// One logical, ordered byte stream over a sequence of stored chunks.
///
/// Fully lazy: a chunk is fetched from the [`DataSource`] only when the
/// first read needing it arrives, and at most one chunk stream is open at
/// a time. When a chunk is exhausted it is closed and the next one is
/// opened transparently; when all are exhausted, reads return 0.
///
/// If the data source cannot produce a required chunk, the read needing
/// it fails; bytes already delivered from earlier chunks stay valid.
pub struct Stitcher {
    source: Arc<dyn DataSource>,
    pending: VecDeque<ChunkRef>,
    current: Option<OpenChunk>,
    listener: Option<Box<dyn ChunkListener>>,
}

impl Stitcher {
    /// Stitch the given chunks, in order.
    pub fn new(source: Arc<dyn DataSource>, chunks: impl IntoIterator<Item = ChunkRef>) -> Self {
        Self {
            source,
            pending: chunks.into_iter().collect(),
            current: None,
            listener: None,
        }
    }

    /// Stitch the chunks a manifest names, in entry (index) order, all
    /// fetched from `space_id`.
    pub fn from_manifest(
        source: Arc<dyn DataSource>,
        space_id: &str,
        manifest: &ChunksManifest,
    ) -> Self {
        let chunks = manifest.entries.iter().map(|entry| ChunkRef {
            space_id: space_id.to_string(),
            content_id: entry.chunk_id.clone(),
        });
        Self::new(source, chunks.collect::<Vec<_>>())
    }

    /// Attach a listener notified once per fully-read chunk.
    pub fn with_listener(mut self, listener: Box<dyn ChunkListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Number of chunks not yet fully read.
    pub fn chunks_remaining(&self) -> usize {
        self.pending.len() + usize::from(self.current.is_some())
    }

    /// Read up to `buf.len()` bytes from the logical stream.
    ///
    /// Returns 0 only at end-of-data (or for an empty buffer). Reads are
    /// served from the currently open chunk; chunk-to-chunk transitions
    /// are iterative, so stack depth is independent of chunk count.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<usize, StitchError> {
        if buf.is_empty() {
            return Ok(0);
        }

        loop {
            if self.current.is_none() {
                let Some(next) = self.pending.pop_front() else {
                    return Ok(0);
                };
                debug!(space_id = %next.space_id, content_id = %next.content_id, "opening chunk stream");
                let stream = self.source.get_content(&next.space_id, &next.content_id).await?;
                self.current = Some(OpenChunk {
                    content_id: next.content_id,
                    stream,
                });
            }

            if let Some(open) = self.current.as_mut() {
                let n = open.stream.read(buf).await?;
                if n > 0 {
                    return Ok(n);
                }
                self.finish_current();
            }
        }
    }

    /// Drain the logical stream into `out`, returning the byte count.
    pub async fn read_to_end(&mut self, out: &mut Vec<u8>) -> Result<u64, StitchError> {
        let mut buf = vec![0u8; 16 * 1024];
        let mut total = 0u64;
        loop {
            let n = self.read(&mut buf).await?;
            if n == 0 {
                return Ok(total);
            }
            out.extend_from_slice(&buf[..n]);
            total += n as u64;
        }
    }

    /// Copy the logical stream into `writer`, returning the byte count.
    pub async fn copy_to<W: AsyncWrite + Unpin>(
        &mut self,
        writer: &mut W,
    ) -> Result<u64, StitchError> {
        let mut buf = vec![0u8; 16 * 1024];
        let mut total = 0u64;
        loop {
            let n = self.read(&mut buf).await?;
            if n == 0 {
                writer.flush().await?;
                return Ok(total);
            }
            writer.write_all(&buf[..n]).await?;
            total += n as u64;
        }
    }

    fn finish_current(&mut self) {
        if let Some(open) = self.current.take() {
            debug!(content_id = %open.content_id, "chunk fully read");
            if let Some(listener) = self.listener.as_mut() {
                listener.chunk_stitched(&open.content_id);
            }
        }
    }
}
