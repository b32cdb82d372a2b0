use thiserror::Error;

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// User identity persistence errors
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Failed to read identity file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to write identity file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Liora backend API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Backend unavailable: {message} (retries: {retries})")]
    Unavailable { message: String, retries: u32 },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Assessment session errors
///
/// Both variants are recoverable: `AnswerRequired` only blocks the current
/// `advance()` call, and `Submission` leaves the session in its pre-submission
/// state so the user may retry.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Answer required before continuing (question {question})")]
    AnswerRequired { question: usize },

    #[error("Submission failed: {0}")]
    Submission(#[source] ApiError),

    #[error("No question set loaded")]
    NotLoaded,
}

/// Result type alias for application errors
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for identity operations
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Result type alias for backend API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type alias for assessment session operations
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Config {
            message: "missing key".to_string(),
        };
        assert_eq!(err.to_string(), "Configuration error: missing key");

        let err = AppError::Internal {
            message: "unexpected".to_string(),
        };
        assert_eq!(err.to_string(), "Internal error: unexpected");
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Unavailable {
            message: "connection refused".to_string(),
            retries: 3,
        };
        assert_eq!(
            err.to_string(),
            "Backend unavailable: connection refused (retries: 3)"
        );

        let err = ApiError::Api {
            status: 400,
            message: "answers required".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 400 - answers required");

        let err = ApiError::InvalidResponse {
            message: "malformed JSON".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid response: malformed JSON");

        let err = ApiError::Timeout { timeout_ms: 5000 };
        assert_eq!(err.to_string(), "Request timeout after 5000ms");
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::AnswerRequired { question: 4 };
        assert_eq!(
            err.to_string(),
            "Answer required before continuing (question 4)"
        );

        let err = SessionError::Submission(ApiError::Api {
            status: 500,
            message: "oops".to_string(),
        });
        assert_eq!(err.to_string(), "Submission failed: API error: 500 - oops");
    }

    #[test]
    fn test_api_error_conversion_to_app_error() {
        let api_err = ApiError::Timeout { timeout_ms: 1000 };
        let app_err: AppError = api_err.into();
        assert!(matches!(app_err, AppError::Api(_)));
    }

    #[test]
    fn test_session_error_conversion_to_app_error() {
        let session_err = SessionError::AnswerRequired { question: 0 };
        let app_err: AppError = session_err.into();
        assert!(matches!(app_err, AppError::Session(_)));
        assert!(app_err.to_string().contains("Answer required"));
    }

    #[test]
    fn test_identity_error_conversion_to_app_error() {
        let id_err = IdentityError::Read {
            path: "./data/liora_user_id".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let app_err: AppError = id_err.into();
        assert!(matches!(app_err, AppError::Identity(_)));
    }
}
