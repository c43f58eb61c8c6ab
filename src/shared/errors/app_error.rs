use serde::Serialize;
use thiserror::Error;

/// Machine-readable category of an internal failure.
///
/// Callers only ever see the category; the detail that produced it stays in
/// the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Timeout or transport failure talking to the remote store
    BackendUnavailable,
    /// A fetched row could not be coerced into the expected entity shape
    MalformedRecord,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BackendUnavailable => "backend_unavailable",
            ErrorKind::MalformedRecord => "malformed_record",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    /// Opaque failure surfaced at the service boundary
    #[error("internal server error")]
    Internal(ErrorKind),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    pub fn backend_unavailable() -> Self {
        AppError::Internal(ErrorKind::BackendUnavailable)
    }

    pub fn malformed_record() -> Self {
        AppError::Internal(ErrorKind::MalformedRecord)
    }

    /// The internal category, if this is an opaque internal error
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            AppError::Internal(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::Internal(_))
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_do_not_leak_detail() {
        let err = AppError::backend_unavailable();
        assert_eq!(err.to_string(), "internal server error");
        assert_eq!(err.kind(), Some(ErrorKind::BackendUnavailable));

        let err = AppError::malformed_record();
        assert_eq!(err.to_string(), "internal server error");
        assert_eq!(err.kind(), Some(ErrorKind::MalformedRecord));
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(AppError::backend_unavailable()).unwrap();
        assert_eq!(json["type"], "Internal");
        assert_eq!(json["message"], "backend_unavailable");
    }

    #[test]
    fn non_internal_errors_have_no_kind() {
        assert_eq!(AppError::Cancelled.kind(), None);
        assert!(!AppError::InvalidInput("x".into()).is_internal());
    }
}
