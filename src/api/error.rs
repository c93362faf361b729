//! Remote service error types.
//!
//! Every call failure collapses into an `ApiError`; callers decide whether it
//! becomes a null result, an empty list or `false`.

use std::fmt;

/// Error from a remote service call.
#[derive(Debug)]
pub struct ApiError {
    /// The kind of error
    pub kind: ApiErrorKind,
    /// HTTP status code, if applicable
    pub status_code: Option<u16>,
    /// Error message
    pub message: String,
}

impl ApiError {
    /// Create an error from a non-2xx HTTP response.
    pub fn from_status(status_code: u16, message: String) -> Self {
        Self {
            kind: classify_http_status(status_code),
            status_code: Some(status_code),
            message,
        }
    }

    /// Create an error from a transport failure, classifying timeouts.
    pub fn from_transport(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            ApiErrorKind::Timeout
        } else {
            ApiErrorKind::NetworkError
        };
        let message = if error.is_connect() {
            format!("Connection failed: {}", error)
        } else {
            error.to_string()
        };
        Self {
            kind,
            status_code: error.status().map(|s| s.as_u16()),
            message,
        }
    }

    /// Create a parse error.
    pub fn parse_error(message: String) -> Self {
        Self {
            kind: ApiErrorKind::ParseError,
            status_code: None,
            message,
        }
    }

    /// Create an application-level rejection (response code other than success).
    pub fn rejected(code: i64, message: String) -> Self {
        Self {
            kind: ApiErrorKind::Rejected { code },
            status_code: None,
            message,
        }
    }

    /// Create an invalid proxy error.
    pub fn invalid_proxy(message: String) -> Self {
        Self {
            kind: ApiErrorKind::InvalidProxy,
            status_code: None,
            message,
        }
    }

    /// Create an error for a credential that cannot be sent as a header.
    pub fn invalid_credential(message: String) -> Self {
        Self {
            kind: ApiErrorKind::InvalidCredential,
            status_code: None,
            message,
        }
    }

    /// Whether the credential itself was refused.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.kind,
            ApiErrorKind::Unauthorized | ApiErrorKind::InvalidCredential
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{} (HTTP {}): {}", self.kind, code, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Classification of remote service errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401/403 - token invalid or expired
    Unauthorized,
    /// 429
    RateLimited,
    /// Other 4xx
    ClientError,
    /// 5xx and anything unexpected
    ServerError,
    /// Request exceeded the configured timeout
    Timeout,
    /// Connection refused, DNS failure, proxy handshake failure...
    NetworkError,
    /// Body did not match the expected envelope
    ParseError,
    /// Transport succeeded but the body carried a non-success code
    Rejected { code: i64 },
    /// Proxy entry could not be turned into a transport
    InvalidProxy,
    /// Token contains bytes not allowed in an HTTP header
    InvalidCredential,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Unauthorized => write!(f, "Unauthorized"),
            ApiErrorKind::RateLimited => write!(f, "Rate limited"),
            ApiErrorKind::ClientError => write!(f, "Client error"),
            ApiErrorKind::ServerError => write!(f, "Server error"),
            ApiErrorKind::Timeout => write!(f, "Request timeout"),
            ApiErrorKind::NetworkError => write!(f, "Network error"),
            ApiErrorKind::ParseError => write!(f, "Parse error"),
            ApiErrorKind::Rejected { code } => write!(f, "Rejected with code {}", code),
            ApiErrorKind::InvalidProxy => write!(f, "Invalid proxy"),
            ApiErrorKind::InvalidCredential => write!(f, "Invalid credential"),
        }
    }
}

/// Parse HTTP status code into error kind.
pub fn classify_http_status(status: u16) -> ApiErrorKind {
    match status {
        401 | 403 => ApiErrorKind::Unauthorized,
        429 => ApiErrorKind::RateLimited,
        400..=499 => ApiErrorKind::ClientError,
        _ => ApiErrorKind::ServerError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_classification() {
        assert_eq!(classify_http_status(401), ApiErrorKind::Unauthorized);
        assert_eq!(classify_http_status(403), ApiErrorKind::Unauthorized);
        assert_eq!(classify_http_status(429), ApiErrorKind::RateLimited);
        assert_eq!(classify_http_status(404), ApiErrorKind::ClientError);
        assert_eq!(classify_http_status(500), ApiErrorKind::ServerError);
        assert_eq!(classify_http_status(502), ApiErrorKind::ServerError);
    }

    #[test]
    fn test_display_includes_status() {
        let err = ApiError::from_status(401, "token expired".to_string());
        assert_eq!(err.to_string(), "Unauthorized (HTTP 401): token expired");
        assert!(err.is_unauthorized());

        let err = ApiError::rejected(4001, "mission locked".to_string());
        assert_eq!(err.to_string(), "Rejected with code 4001: mission locked");
    }
}
