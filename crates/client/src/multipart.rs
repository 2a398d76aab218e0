//! Single-file `multipart/form-data` body builder.

use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures_util::{StreamExt, TryStreamExt, future, stream};
use tokio_util::io::ReaderStream;

use crate::Error;
use crate::transport::RequestBody;

/// Form field the service reads the upload from.
pub const FIELD_NAME: &str = "file";

/// Content type of the file part.
const PART_CONTENT_TYPE: &str = "application/octet-stream";

/// First error hit while reading the source file into the body stream.
///
/// A transport only sees the stream failing; this keeps the local cause so
/// the caller can report it as such.
#[derive(Debug, Clone, Default)]
pub struct SourceError(Arc<Mutex<Option<io::Error>>>);

impl SourceError {
    /// Takes the recorded error, if any.
    pub fn take(&self) -> Option<io::Error> {
        self.0.lock().ok()?.take()
    }

    fn record(&self, err: &io::Error) {
        if let Ok(mut slot) = self.0.lock() {
            slot.get_or_insert_with(|| io::Error::new(err.kind(), err.to_string()));
        }
    }
}

/// Opens `path` and builds a streamed multipart body holding its contents.
///
/// The file is opened immediately so a missing or unreadable path fails
/// here. The open handle moves into the returned stream and is closed when
/// the stream is drained or dropped. Read errors hit while streaming are
/// recorded in the returned [`SourceError`].
pub async fn build_body(path: &Path) -> Result<(RequestBody, SourceError), Error> {
    let open_error = |source: io::Error| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    };

    let file = tokio::fs::File::open(path).await.map_err(open_error)?;
    let metadata = file.metadata().await.map_err(open_error)?;
    if metadata.is_dir() {
        return Err(open_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path is a directory",
        )));
    }

    let boundary = new_boundary();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| FIELD_NAME.to_string());

    let head = Bytes::from(part_header(&boundary, &file_name));
    let tail = Bytes::from(format!("\r\n--{boundary}--\r\n"));
    let content_length = head.len() as u64 + metadata.len() + tail.len() as u64;

    let source_error = SourceError::default();
    let tracker = source_error.clone();
    let contents = ReaderStream::new(file).inspect_err(move |e| tracker.record(e));

    let stream = stream::once(future::ready(Ok(head)))
        .chain(contents)
        .chain(stream::once(future::ready(Ok(tail))));

    let body = RequestBody {
        content_type: format!("multipart/form-data; boundary={boundary}"),
        content_length: Some(content_length),
        stream: Box::pin(stream),
    };
    Ok((body, source_error))
}

fn new_boundary() -> String {
    format!("fileio-{}", uuid::Uuid::new_v4().simple())
}

fn part_header(boundary: &str, file_name: &str) -> String {
    format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{FIELD_NAME}\"; filename=\"{}\"\r\n\
         Content-Type: {PART_CONTENT_TYPE}\r\n\r\n",
        escape_quotes(file_name)
    )
}

/// Escapes a value for use inside a quoted header parameter.
fn escape_quotes(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\r' => out.push_str("%0D"),
            '\n' => out.push_str("%0A"),
            _ => out.push(c),
        }
    }
    out
}
