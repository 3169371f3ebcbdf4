//! Remote API errors and their retry classification

use serde::Deserialize;

/// Closed set of remote failure kinds, each with its own retry policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Daily quota spent; retrying the same day is pointless.
    QuotaExceeded,
    /// Too many requests in a short interval (back off and retry).
    RateLimited,
    /// Server-side or network hiccup (retry after a fixed delay).
    Transient,
    /// Bad request, bad key, undecodable response.
    Fatal,
}

impl ApiErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QuotaExceeded => "quota-exceeded",
            Self::RateLimited => "rate-limited",
            Self::Transient => "transient",
            Self::Fatal => "fatal",
        }
    }

    pub fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimited | Self::Transient)
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by a single remote API call.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP status, `None` for network-level failures
    pub status: Option<u16>,
    /// Machine-readable reason from the error body (e.g. `quotaExceeded`)
    pub reason: Option<String>,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.status, &self.reason) {
            (Some(s), Some(r)) => write!(f, "HTTP {s} ({r}): {}", self.message),
            (Some(s), None) => write!(f, "HTTP {s}: {}", self.message),
            (None, _) => write!(f, "{} error: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Google-style error envelope: `{"error": {"code", "message", "errors": [{"reason"}]}}`
#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            reason: None,
            message: message.into(),
        }
    }

    /// Map an HTTP status and optional error reason to a kind.
    pub fn classify(status: u16, reason: Option<&str>) -> ApiErrorKind {
        match (status, reason) {
            (403, Some("quotaExceeded" | "dailyLimitExceeded")) => ApiErrorKind::QuotaExceeded,
            (403, Some("rateLimitExceeded" | "userRateLimitExceeded")) | (429, _) => {
                ApiErrorKind::RateLimited
            }
            (408, _) | (500..=599, _) => ApiErrorKind::Transient,
            _ => ApiErrorKind::Fatal,
        }
    }

    /// Build from a non-success response, reading the reason out of the body if present.
    pub fn from_response(status: u16, body: &str) -> Self {
        let (reason, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(env) => {
                let reason = env.error.errors.into_iter().find_map(|d| d.reason);
                (reason, env.error.message)
            }
            Err(_) => (None, body.trim().chars().take(200).collect()),
        };
        Self {
            kind: Self::classify(status, reason.as_deref()),
            status: Some(status),
            reason,
            message,
        }
    }

    /// Build from a reqwest failure. The URL is stripped since it carries the API key.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        let status = e.status().map(|s| s.as_u16());
        let kind = match status {
            Some(s) => Self::classify(s, None),
            None if e.is_builder() || e.is_decode() => ApiErrorKind::Fatal,
            None => ApiErrorKind::Transient,
        };
        Self {
            kind,
            status,
            reason: None,
            message: e.without_url().to_string(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
