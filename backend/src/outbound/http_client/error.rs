//! Client failure taxonomy and reqwest error mapping.

use reqwest::StatusCode;

use crate::domain::{Error, ErrorCode};

/// Failures raised by [`super::ApplicationsHttpClient`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClientError {
    /// The configured base URL cannot address the API.
    #[error("base URL {url} must be an http(s) URL")]
    InvalidBaseUrl { url: String },
    /// The request never produced a response (connect failure, timeout).
    #[error("request to {url} failed: {message}")]
    Transport {
        url: String,
        message: String,
        timed_out: bool,
    },
    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        status: u16,
        code: Option<ErrorCode>,
        message: String,
    },
    /// The response body was not the expected JSON.
    #[error("could not decode response: {message}")]
    Decode { message: String },
}

impl ClientError {
    /// HTTP status carried by a [`ClientError::Status`].
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported the record as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND.as_u16())
    }
}

pub(super) fn map_transport_error(url: &str, error: &reqwest::Error) -> ClientError {
    ClientError::Transport {
        url: url.to_owned(),
        message: error.to_string(),
        timed_out: error.is_timeout(),
    }
}

/// Build a status error, preferring the server's structured error payload and
/// falling back to a compact preview of the body.
pub(super) fn map_status_error(status: StatusCode, body: &[u8]) -> ClientError {
    if let Ok(payload) = serde_json::from_slice::<Error>(body) {
        return ClientError::Status {
            status: status.as_u16(),
            code: Some(payload.code()),
            message: payload.message().to_owned(),
        };
    }

    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_owned()
    } else {
        preview
    };
    ClientError::Status {
        status: status.as_u16(),
        code: None,
        message,
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn decodes_structured_error_payloads() {
        let error = map_status_error(
            StatusCode::BAD_REQUEST,
            br#"{"code":"invalid_request","message":"company, role and status are required"}"#,
        );
        assert_eq!(
            error,
            ClientError::Status {
                status: 400,
                code: Some(ErrorCode::InvalidRequest),
                message: "company, role and status are required".to_owned(),
            }
        );
    }

    #[rstest]
    #[case(b"".as_slice(), "Bad Gateway")]
    #[case(b"<html>\n  upstream   down\n</html>".as_slice(), "<html> upstream down </html>")]
    fn falls_back_to_body_preview(#[case] body: &[u8], #[case] expected: &str) {
        let error = map_status_error(StatusCode::BAD_GATEWAY, body);
        assert_eq!(error.status(), Some(502));
        assert!(matches!(error, ClientError::Status { code: None, ref message, .. } if message == expected));
    }

    #[rstest]
    fn truncates_long_bodies() {
        let body = "x".repeat(500);
        let preview = body_preview(body.as_bytes());
        assert_eq!(preview.chars().count(), 163);
        assert!(preview.ends_with("..."));
    }

    #[rstest]
    fn not_found_is_detected_from_status() {
        let error = map_status_error(StatusCode::NOT_FOUND, b"");
        assert!(error.is_not_found());
        assert!(!ClientError::Decode { message: "bad".to_owned() }.is_not_found());
    }
}
