//! `reqwest`-backed [`Transport`].

use std::io;

use futures_util::TryStreamExt;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use tokio_util::io::StreamReader;

use crate::Error;
use crate::config::ClientConfig;
use crate::transport::{RequestBody, Transport, TransportFuture, TransportResponse};

/// HTTP transport over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport honoring the user agent and timeout of `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http })
    }

    /// Wraps an existing client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<TransportResponse, Error> {
        let resp = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        let status = resp.status();
        let body = StreamReader::new(resp.bytes_stream().map_err(io::Error::other));
        Ok(TransportResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            body,
        ))
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, url: &'a str) -> TransportFuture<'a> {
        Box::pin(self.send(self.http.get(url)))
    }

    fn post<'a>(&'a self, url: &'a str, body: RequestBody) -> TransportFuture<'a> {
        let mut request = self.http.post(url).header(CONTENT_TYPE, body.content_type);
        if let Some(len) = body.content_length {
            request = request.header(CONTENT_LENGTH, len);
        }
        let request = request.body(reqwest::Body::wrap_stream(body.stream));
        Box::pin(self.send(request))
    }
}
