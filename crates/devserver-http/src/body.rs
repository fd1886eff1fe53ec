//! Response body type supporting buffered, streamed-file, and empty modes.
//!
//! - **Buffered**: small in-memory payloads such as the fixed `Not Found` body
//!   or anything the wrapped application produces.
//! - **File**: a file streamed from disk in chunks. The file handle lives inside
//!   the body, so it is closed as soon as hyper drops the body, whether the
//!   transfer finished or the client went away.
//! - **Empty**: no content.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use http_body_util::Full;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// HTTP response body used by every route, static or delegated.
#[derive(Debug, Default)]
pub enum ResponseBody {
    /// Buffered body for small responses.
    Buffered(Full<Bytes>),
    /// File contents streamed from disk.
    File {
        /// Chunked reader over the open file.
        stream: ReaderStream<File>,
        /// Bytes not yet yielded.
        remaining: u64,
    },
    /// Empty body.
    #[default]
    Empty,
}

impl ResponseBody {
    /// Create a buffered body from bytes.
    #[must_use]
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        Self::Buffered(Full::new(data.into()))
    }

    /// Create a buffered body from a UTF-8 string.
    #[must_use]
    pub fn from_string(s: impl Into<String>) -> Self {
        Self::Buffered(Full::new(Bytes::from(s.into())))
    }

    /// Create a body streaming `len` bytes from an open file.
    #[must_use]
    pub fn from_file(file: File, len: u64) -> Self {
        Self::File {
            stream: ReaderStream::new(file),
            remaining: len,
        }
    }

    /// Create an empty body.
    #[must_use]
    pub fn empty() -> Self {
        Self::Empty
    }
}

impl http_body::Body for ResponseBody {
    type Data = Bytes;
    type Error = std::io::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<http_body::Frame<Self::Data>, Self::Error>>> {
        match self.get_mut() {
            Self::Buffered(full) => Pin::new(full)
                .poll_frame(cx)
                .map_err(|never| match never {}),
            Self::File { stream, remaining } => match Pin::new(stream).poll_next(cx) {
                Poll::Ready(Some(Ok(chunk))) => {
                    *remaining = remaining.saturating_sub(chunk.len() as u64);
                    Poll::Ready(Some(Ok(http_body::Frame::data(chunk))))
                }
                Poll::Ready(Some(Err(e))) => Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => {
                    *remaining = 0;
                    Poll::Ready(None)
                }
                Poll::Pending => Poll::Pending,
            },
            Self::Empty => Poll::Ready(None),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            Self::Buffered(full) => full.is_end_stream(),
            Self::File { remaining, .. } => *remaining == 0,
            Self::Empty => true,
        }
    }

    fn size_hint(&self) -> http_body::SizeHint {
        match self {
            Self::Buffered(full) => full.size_hint(),
            Self::File { remaining, .. } => http_body::SizeHint::with_exact(*remaining),
            Self::Empty => http_body::SizeHint::with_exact(0),
        }
    }
}
