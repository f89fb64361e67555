//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input document could not be read or parsed.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Goal plan validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A collaborator (plan store, actuals source) failed.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error (sysexits.h values).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Input(_) | Self::Validation(_) => 65,
            Self::NotFound(_) => 66,
            Self::ExternalService(_) => 69,
            Self::Internal(_) => 70,
            Self::Config(_) => 78,
        }
    }

    /// Returns the stable error code for machine-readable output.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Input(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Input(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Input(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Config("x".into()), 78, "CONFIG_ERROR")]
    #[case(AppError::Input("x".into()), 65, "INVALID_INPUT")]
    #[case(AppError::NotFound("x".into()), 66, "NOT_FOUND")]
    #[case(AppError::Validation("x".into()), 65, "VALIDATION_ERROR")]
    #[case(AppError::ExternalService("x".into()), 69, "EXTERNAL_SERVICE_ERROR")]
    #[case(AppError::Internal("x".into()), 70, "INTERNAL_ERROR")]
    fn test_app_error_codes(#[case] err: AppError, #[case] exit: u8, #[case] code: &str) {
        assert_eq!(err.exit_code(), exit);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_app_error_display() {
        assert_eq!(
            AppError::Validation("workingWeeks must be between 1 and 52".into()).to_string(),
            "Validation error: workingWeeks must be between 1 and 52"
        );
        assert_eq!(
            AppError::NotFound("agent".into()).to_string(),
            "Not found: agent"
        );
    }

    #[test]
    fn test_json_error_maps_to_input() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Input(_)));
    }
}
