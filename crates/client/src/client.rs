//! file.io client: upload and download orchestration.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::Error;
use crate::config::ClientConfig;
use crate::expires::encode_expires;
use crate::http::HttpTransport;
use crate::multipart;
use crate::response::decode_response;
use crate::transport::Transport;

/// Read buffer size for streaming a download to disk.
const COPY_BUF_SIZE: usize = 64 * 1024;

/// Characters escaped in the key path segment.
const KEY_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// A stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    /// Identifier to download the file with.
    pub key: String,
    /// Retention as reported by the service, e.g. `"7 days"`.
    pub expiry: Option<String>,
}

/// file.io API client.
///
/// Holds the service root and the transport; both are fixed at construction
/// and shared by every call, so a client can be cloned freely across tasks.
#[derive(Clone)]
pub struct Client {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl Client {
    /// Creates a client for the public service with default settings.
    pub fn new() -> Result<Self, Error> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client using the HTTP transport built from `config`.
    pub fn with_config(config: ClientConfig) -> Result<Self, Error> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    /// Creates a client issuing its requests through `transport`.
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, Error> {
        Ok(Self {
            base_url: config.normalized_base_url()?,
            transport: Arc::new(transport),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Uploads a file with the service's default retention and returns its
    /// key.
    pub async fn upload(&self, path: impl AsRef<Path>) -> Result<String, Error> {
        let url = format!("{}/", self.base_url);
        let upload = self.post_file(path.as_ref(), &url).await?;
        Ok(upload.key)
    }

    /// Uploads a file that expires after `days` days.
    ///
    /// Non-positive values request the default retention of
    /// [`DEFAULT_EXPIRES`](crate::DEFAULT_EXPIRES) days.
    pub async fn upload_with_expiry(
        &self,
        path: impl AsRef<Path>,
        days: i64,
    ) -> Result<Upload, Error> {
        let url = format!("{}/?expires={}", self.base_url, encode_expires(days));
        self.post_file(path.as_ref(), &url).await
    }

    async fn post_file(&self, path: &Path, url: &str) -> Result<Upload, Error> {
        let (body, source_error) = multipart::build_body(path).await?;

        debug!(url, path = %path.display(), size = ?body.content_length, "uploading file");
        let resp = match self.transport.post(url, body).await {
            Ok(resp) => resp,
            // A body that failed to read from disk is a local error, whatever
            // the transport made of it.
            Err(e) => return Err(source_error.take().map(Error::Io).unwrap_or(e)),
        };
        let data = resp.read_all().await?;

        let result = decode_response(&data).inspect_err(|e| {
            warn!(url, error = %e, "upload rejected");
        })?;
        let key = result
            .key
            .filter(|key| !key.is_empty())
            .ok_or(Error::MissingKey)?;

        info!(key = %key, expiry = ?result.expiry, "upload completed");
        Ok(Upload {
            key,
            expiry: result.expiry,
        })
    }

    /// Downloads the file stored under `key` into `dest` and returns the
    /// number of bytes written.
    ///
    /// `dest` is only created once the service has answered `200 OK`. If the
    /// response body fails mid-stream, the bytes received so far are flushed
    /// to `dest` and the error is reported as [`Error::Transport`]; failures
    /// writing `dest` are reported as [`Error::Io`].
    pub async fn download(&self, key: &str, dest: impl AsRef<Path>) -> Result<u64, Error> {
        if key.is_empty() {
            return Err(Error::InvalidKey);
        }
        let dest = dest.as_ref();
        let url = format!(
            "{}/{}",
            self.base_url,
            utf8_percent_encode(key, KEY_SEGMENT)
        );

        debug!(url, "downloading file");
        let mut resp = self.transport.get(&url).await?;
        if !resp.is_ok() {
            warn!(url, status = resp.status, "download failed");
            return Err(Error::http_status(resp.status, &resp.reason));
        }

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|source| Error::FileCreate {
                path: dest.to_path_buf(),
                source,
            })?;
        let mut buf = vec![0u8; COPY_BUF_SIZE];
        let mut written = 0u64;
        loop {
            let n = match resp.body.read(&mut buf).await {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) => {
                    file.flush().await?;
                    warn!(url, bytes = written, error = %e, "download interrupted");
                    return Err(Error::Transport(format!(
                        "failed to read response body: {e}"
                    )));
                }
            };
            file.write_all(&buf[..n]).await?;
            written += n as u64;
        }
        file.flush().await?;

        info!(key, bytes = written, dest = %dest.display(), "download completed");
        Ok(written)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
