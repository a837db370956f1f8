use std::fmt::{Display, Formatter};

use thiserror::Error;

/// Validation errors for domain type construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },
}

/// Failure classification for a single provider request.
///
/// Every kind is recoverable at the pipeline level: the failed symbol is
/// recorded and iteration continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The request exceeded the transport timeout budget.
    Timeout,
    /// The connection could not be established.
    Connection,
    /// The provider answered with a non-2xx status.
    Http,
    /// The response body was not parseable JSON.
    Parse,
    /// The provider returned an explicit error field in the body.
    Provider,
}

/// Structured failure returned by [`QuoteClient`](crate::QuoteClient) calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
    retryable: bool,
}

impl FetchError {
    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Timeout,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Connection,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn http(status: u16, body_excerpt: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Http,
            message: format!("upstream returned status {status}: {}", body_excerpt.into()),
            retryable: status >= 500,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Parse,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn provider(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Provider,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Timeout => "fetch.timeout",
            FetchErrorKind::Connection => "fetch.connection",
            FetchErrorKind::Http => "fetch.http_status",
            FetchErrorKind::Parse => "fetch.parse",
            FetchErrorKind::Provider => "fetch.provider_error",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable_client_errors_are_not() {
        assert!(FetchError::http(503, "unavailable").retryable());
        assert!(!FetchError::http(404, "not found").retryable());
    }

    #[test]
    fn code_matches_kind() {
        assert_eq!(FetchError::provider("bad symbol").code(), "fetch.provider_error");
        assert_eq!(FetchError::timeout("30s elapsed").kind(), FetchErrorKind::Timeout);
    }
}
