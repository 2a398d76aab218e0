//! Client configuration.
//!
//! [`ClientConfig`] is plain data; host applications may embed it in their
//! own serde-backed settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_BASE_URL, Error};

/// Settings shared by every operation of a [`Client`](crate::Client).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service root, e.g. `https://file.io`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `User-Agent` header sent by the HTTP transport.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Whole-request timeout. `None` keeps the transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("fileio-client/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Returns a copy pointing at another service root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validates the base URL and returns it without trailing slashes.
    pub(crate) fn normalized_base_url(&self) -> Result<String, Error> {
        let url = self.base_url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(Error::Config("base URL is empty".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(Error::Config(format!(
                "base URL must use http or https: {url}"
            )));
        }
        Ok(url.to_string())
    }
}
