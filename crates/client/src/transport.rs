//! Transport abstraction.
//!
//! Every network call goes through [`Transport`]. The production
//! implementation is [`HttpTransport`](crate::http::HttpTransport); tests
//! plug in their own without touching a socket.

use std::fmt;
use std::future::Future;
use std::io;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt, stream};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::Error;

/// Outgoing request body, produced chunk by chunk.
pub type BodyStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + Sync>>;

/// Incoming response body.
pub type BodyReader = Pin<Box<dyn AsyncRead + Send>>;

/// Future returned by [`Transport`] operations.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<TransportResponse, Error>> + Send + 'a>>;

/// Something that can perform an HTTP GET and an HTTP POST.
pub trait Transport: Send + Sync {
    /// Issues a GET request.
    fn get<'a>(&'a self, url: &'a str) -> TransportFuture<'a>;

    /// Issues a POST request carrying `body` with its content type.
    fn post<'a>(&'a self, url: &'a str, body: RequestBody) -> TransportFuture<'a>;
}

/// Body of a POST request.
pub struct RequestBody {
    /// Exact `Content-Type` header value.
    pub content_type: String,
    /// Total size in bytes, when known up front.
    pub content_length: Option<u64>,
    pub stream: BodyStream,
}

impl RequestBody {
    /// Creates a body from an in-memory buffer.
    pub fn from_bytes(content_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let data = data.into();
        Self {
            content_type: content_type.into(),
            content_length: Some(data.len() as u64),
            stream: Box::pin(stream::iter([Ok::<_, io::Error>(data)])),
        }
    }

    /// Drains the stream into memory.
    pub async fn collect(self) -> io::Result<Vec<u8>> {
        self.stream
            .try_fold(Vec::new(), |mut acc, chunk| async move {
                acc.extend_from_slice(&chunk);
                Ok(acc)
            })
            .await
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestBody")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Status line and body of one HTTP response.
pub struct TransportResponse {
    pub status: u16,
    /// Reason phrase, e.g. `"Not Found"`. May be empty.
    pub reason: String,
    pub body: BodyReader,
}

impl TransportResponse {
    pub fn new(
        status: u16,
        reason: impl Into<String>,
        body: impl AsyncRead + Send + 'static,
    ) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: Box::pin(body),
        }
    }

    /// Creates a response whose body is an in-memory buffer.
    pub fn from_bytes(status: u16, reason: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self::new(status, reason, io::Cursor::new(data.into()))
    }

    /// Returns `true` for `200 OK`.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Reads the whole body.
    pub async fn read_all(mut self) -> Result<Vec<u8>, Error> {
        let mut data = Vec::new();
        self.body
            .read_to_end(&mut data)
            .await
            .map_err(|e| Error::Transport(format!("failed to read response body: {e}")))?;
        Ok(data)
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("reason", &self.reason)
            .finish_non_exhaustive()
    }
}
