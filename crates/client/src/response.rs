//! Upload response decoding.
//!
//! The service answers every upload with a small JSON document:
//!
//! ```json
//! {"success":true,"key":"aQbnDJ","expiry":"7 days"}
//! {"success":false,"error":404,"message":"Not Found"}
//! ```

use serde::{Deserialize, Serialize};

use crate::Error;

/// Decoded upload response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, rename = "error", skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    #[serde(default, rename = "message", skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Human-readable retention, e.g. `"7 days"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Parses a response body, turning `"success": false` into
/// [`Error::Service`].
pub fn decode_response(data: &[u8]) -> Result<UploadResult, Error> {
    let result: UploadResult = serde_json::from_slice(data)?;
    if !result.success {
        return Err(Error::Service {
            code: result.error_code,
            message: result.error_message.unwrap_or_default(),
        });
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn success_with_key() {
        let result = decode_response(br#"{"success":true,"key":"2ojE41"}"#).unwrap();
        assert_eq!(
            result,
            UploadResult {
                success: true,
                key: Some("2ojE41".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn success_with_expiry() {
        let result =
            decode_response(br#"{"success":true,"key":"aQbnDJ","expiry":"7 days"}"#).unwrap();
        assert_eq!(result.key.as_deref(), Some("aQbnDJ"));
        assert_eq!(result.expiry.as_deref(), Some("7 days"));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let result = decode_response(
            br#"{"success":true,"key":"k","link":"https://file.io/k","size":12}"#,
        )
        .unwrap();
        assert_eq!(result.key.as_deref(), Some("k"));
    }

    #[test]
    fn failure_maps_to_service_error() {
        let err = decode_response(br#"{"success":false,"error":404,"message":"Not Found"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "Not Found");
        match err {
            Error::Service { code, message } => {
                assert_eq!(code, Some(404));
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected Service error, got: {other:?}"),
        }
    }

    #[test]
    fn missing_success_is_failure() {
        let err = decode_response(br#"{"key":"k"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Service);
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn empty_body_is_malformed() {
        let err = decode_response(b"").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn html_body_is_malformed() {
        let err = decode_response(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }
}
