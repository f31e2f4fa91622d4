//! API error type with plain-text rendering

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::infrastructure::user::AccountError;

/// API error carried to the client as a status code and a plain-text body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Authentication error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match &err {
            AccountError::Validation(_) | AccountError::PasswordMismatch => {
                Self::bad_request(err.to_string())
            }
            AccountError::DuplicateEmail => Self::conflict(err.to_string()),
            AccountError::InvalidCredentials => Self::unauthorized(err.to_string()),
            AccountError::NotFound => Self::not_found(err.to_string()),
            AccountError::System => Self::internal(err.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::UserValidationError;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("invalid email format");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "invalid email format");
    }

    #[test]
    fn test_account_error_conversion() {
        let err: ApiError = AccountError::DuplicateEmail.into();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.message, "email already registered");

        let err: ApiError = AccountError::InvalidCredentials.into();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
        assert_eq!(err.message, "invalid email or password");

        let err: ApiError =
            AccountError::Validation(UserValidationError::InvalidEmailFormat).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err: ApiError = AccountError::System.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "system error");
    }

    #[test]
    fn test_response_body_is_plain_text() {
        let response = ApiError::unauthorized("authentication required").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
