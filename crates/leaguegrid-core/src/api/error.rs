use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error! status: {status} - access denied, check the API key")]
    AccessDenied { status: u16 },

    #[error("HTTP error! status: 404 - endpoint not found")]
    NotFound,

    #[error("HTTP error! status: 429 - rate limited, please wait before refreshing")]
    RateLimited,

    #[error("HTTP error! status: {status} - server error: {body}")]
    ServerError { status: u16, body: String },

    #[error("HTTP error! status: {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Network error")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            code @ (401 | 403) => ApiError::AccessDenied { status: code },
            404 => ApiError::NotFound,
            429 => ApiError::RateLimited,
            code @ 500..=599 => ApiError::ServerError {
                status: code,
                body: truncated,
            },
            code => ApiError::UnexpectedStatus {
                status: code,
                body: truncated,
            },
        }
    }

    /// HTTP status code, when the failure came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AccessDenied { status } => Some(*status),
            ApiError::NotFound => Some(404),
            ApiError::RateLimited => Some(429),
            ApiError::ServerError { status, .. } | ApiError::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            ApiError::NetworkError(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidResponse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_classifies() {
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, ""),
            ApiError::AccessDenied { status: 403 }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "missing"),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            ApiError::RateLimited
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, ""),
            ApiError::ServerError { status: 502, .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::IM_A_TEAPOT, ""),
            ApiError::UnexpectedStatus { status: 418, .. }
        ));
    }

    #[test]
    fn test_message_embeds_status_code() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        let msg = err.to_string();
        assert!(msg.contains("500"), "got: {}", msg);
        assert!(msg.contains("boom"));
        assert_eq!(err.status(), Some(500));

        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "");
        assert!(err.to_string().contains("401"));
    }

    #[test]
    fn test_truncate_body() {
        let long = "x".repeat(MAX_ERROR_BODY_LENGTH + 20);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.contains("520 total bytes"));

        assert_eq!(ApiError::truncate_body("short"), "short");
    }

    #[test]
    fn test_truncate_body_respects_char_boundary() {
        // 'é' is two bytes, so byte 500 falls mid-character
        let body = format!("a{}", "é".repeat(300));
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.contains("truncated"));
    }

    #[test]
    fn test_invalid_response_has_no_status() {
        let err = ApiError::InvalidResponse("missing field `response`".to_string());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("missing field"));
    }
}
