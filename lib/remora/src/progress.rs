//! Progress reporting for streaming bodies.
//!
//! [`ProgressStream`] decorates a chunk stream and writes one marker
//! character to its sink for every `threshold` bytes that pass through,
//! then a single newline at end-of-stream. The sink defaults to stdout;
//! tests inject their own `io::Write`.
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use remora::progress::ProgressStream;
//!
//! let streaming = transport.execute_streaming(request).await?;
//! let mut body = ProgressStream::new(streaming.into_body());
//! while let Some(chunk) = body.next().await {
//!     let chunk = chunk?;
//!     // consume chunk; dots appear on stdout as bytes arrive
//! }
//! ```

use std::io::{self, Write};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;

use crate::Result;

/// Default byte threshold between progress markers.
pub const DEFAULT_THRESHOLD: usize = 10240;

/// Default marker character.
pub const DEFAULT_MARKER: u8 = b'.';

/// A chunk stream that emits progress markers as bytes flow through.
///
/// Excess bytes carry over between markers, so a single chunk of
/// `k * threshold` bytes emits `k` markers. Dropping the wrapper drops the
/// inner stream, which releases the underlying connection.
pub struct ProgressStream<S> {
    inner: S,
    threshold: usize,
    marker: u8,
    pending: usize,
    finished: bool,
    sink: Box<dyn Write + Send>,
}

impl<S> ProgressStream<S> {
    /// Wrap a stream with default marker, threshold, and stdout sink.
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            threshold: DEFAULT_THRESHOLD,
            marker: DEFAULT_MARKER,
            pending: 0,
            finished: false,
            sink: Box::new(io::stdout()),
        }
    }

    /// Set the marker character. A zero byte falls back to the default.
    #[must_use]
    pub fn with_marker(mut self, marker: u8) -> Self {
        self.marker = if marker == 0 { DEFAULT_MARKER } else { marker };
        self
    }

    /// Set the byte threshold. Zero falls back to the default.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = if threshold == 0 {
            DEFAULT_THRESHOLD
        } else {
            threshold
        };
        self
    }

    /// Redirect markers to a custom sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl Write + Send + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Consume the wrapper, returning the inner stream.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> std::fmt::Debug for ProgressStream<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressStream")
            .field("threshold", &self.threshold)
            .field("marker", &self.marker)
            .field("pending", &self.pending)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl<S> Stream for ProgressStream<S>
where
    S: Stream<Item = Result<Bytes>> + Unpin,
{
    type Item = Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                this.pending += chunk.len();
                while this.pending >= this.threshold {
                    this.pending -= this.threshold;
                    // Marker writes are best-effort diagnostics.
                    let _ = this.sink.write_all(&[this.marker]);
                    let _ = this.sink.flush();
                }
                Poll::Ready(Some(Ok(chunk)))
            }
            Poll::Ready(None) => {
                if !this.finished {
                    this.finished = true;
                    let _ = this.sink.write_all(b"\n");
                    let _ = this.sink.flush();
                }
                Poll::Ready(None)
            }
            other => other,
        }
    }
}
