//! Async client for the [file.io](https://file.io) file-hosting API.
//!
//! Uploads a local file as a `multipart/form-data` form, optionally with a
//! retention period, and downloads stored files back by key. Every
//! operation issues exactly one HTTP request and reports failures without
//! retrying.
//!
//! All network access goes through the [`Transport`] trait. [`Client`] uses
//! the `reqwest`-backed [`HttpTransport`] unless another transport is
//! injected with [`Client::with_transport`].
//!
//! ```no_run
//! # async fn run() -> Result<(), fileio_client::Error> {
//! let client = fileio_client::Client::new()?;
//! let upload = client.upload_with_expiry("report.pdf", 7).await?;
//! client.download(&upload.key, "copy.pdf").await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod expires;
pub mod http;
pub mod multipart;
pub mod response;
pub mod transport;

pub use client::{Client, Upload};
pub use config::ClientConfig;
pub use error::{Error, ErrorKind};
pub use expires::encode_expires;
pub use http::HttpTransport;
pub use response::{UploadResult, decode_response};
pub use transport::{RequestBody, Transport, TransportFuture, TransportResponse};

/// Root of the public service.
pub const DEFAULT_BASE_URL: &str = "https://file.io";

/// Retention in days the service applies when none is requested.
pub const DEFAULT_EXPIRES: i64 = 14;
