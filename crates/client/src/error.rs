//! Error types for file.io operations.

use std::path::PathBuf;

/// Errors produced by upload and download operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),

    /// Download answered with a status other than 200 OK.
    #[error("{reason}")]
    HttpStatus { status: u16, reason: String },

    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("response reported success without a key")]
    MissingKey,

    /// The service answered `"success": false`. Code and message are the
    /// service's own.
    #[error("{message}")]
    Service { code: Option<i64>, message: String },

    #[error("failed to open {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create {}: {source}", .path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid download key")]
    InvalidKey,

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not be issued or completed.
    Transport,
    /// The download endpoint answered with a non-OK status.
    HttpStatus,
    /// The upload response was not a usable JSON document.
    MalformedResponse,
    /// The service reported a failure.
    Service,
    /// A local file could not be opened, created, read or written.
    LocalIo,
}

impl Error {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport(_) | Self::InvalidKey | Self::Config(_) => ErrorKind::Transport,
            Self::HttpStatus { .. } => ErrorKind::HttpStatus,
            Self::MalformedResponse(_) | Self::MissingKey => ErrorKind::MalformedResponse,
            Self::Service { .. } => ErrorKind::Service,
            Self::FileOpen { .. } | Self::FileCreate { .. } | Self::Io(_) => ErrorKind::LocalIo,
        }
    }

    /// Builds an [`Error::HttpStatus`], falling back to a generic text when
    /// the reason phrase is unknown.
    pub(crate) fn http_status(status: u16, reason: &str) -> Self {
        let reason = if reason.is_empty() {
            format!("HTTP status {status}")
        } else {
            reason.to_string()
        };
        Self::HttpStatus { status, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_displays_message_verbatim() {
        let err = Error::Service {
            code: Some(500),
            message: "Internal error".into(),
        };
        assert_eq!(err.to_string(), "Internal error");
        assert_eq!(err.kind(), ErrorKind::Service);
    }

    #[test]
    fn http_status_uses_reason_phrase() {
        let err = Error::http_status(404, "Not Found");
        assert_eq!(err.to_string(), "Not Found");
        assert_eq!(err.kind(), ErrorKind::HttpStatus);
    }

    #[test]
    fn http_status_without_reason() {
        let err = Error::http_status(599, "");
        assert_eq!(err.to_string(), "HTTP status 599");
    }

    #[test]
    fn local_errors_are_local_io() {
        let err = Error::FileOpen {
            path: PathBuf::from("/missing.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.kind(), ErrorKind::LocalIo);
        assert!(err.to_string().starts_with("failed to open /missing.txt"));

        let err: Error = std::io::Error::other("disk full").into();
        assert_eq!(err.kind(), ErrorKind::LocalIo);
    }

    #[test]
    fn json_errors_are_malformed_response() {
        let err: Error = serde_json::from_slice::<serde_json::Value>(b"")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
        assert_eq!(Error::MissingKey.kind(), ErrorKind::MalformedResponse);
    }
}
