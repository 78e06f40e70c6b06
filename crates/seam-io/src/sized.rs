//! Known-length in-memory reader.

use std::io::{self, Cursor};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use tokio::io::{AsyncRead, ReadBuf};

/// Readable byte source whose total encoded length is fixed at
/// construction and can be queried without consuming the stream.
///
/// Exists for outbound transports that must declare a content length
/// before streaming the body. Text sources are measured in UTF-8 encoded
/// bytes, not characters.
pub struct SizedReader {
    cursor: Cursor<Bytes>,
    byte_len: u64,
}

impl SizedReader {
    /// Build from raw bytes.
    pub fn from_bytes(data: Bytes) -> Self {
        let byte_len = data.len() as u64;
        Self {
            cursor: Cursor::new(data),
            byte_len,
        }
    }

    /// Build from text, measured in UTF-8 encoded bytes.
    pub fn from_string(text: &str) -> Self {
        Self::from_bytes(Bytes::copy_from_slice(text.as_bytes()))
    }

    /// Total length of this source in bytes.
    pub fn byte_len(&self) -> u64 {
        self.byte_len
    }
}

impl AsyncRead for SizedReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        Pin::new(&mut self.cursor).poll_read(cx, buf)
    }
}
