//! Error types for accountweb-api

use accountweb_core::{CoreError, ErrorCode};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(error) => match error.code() {
                ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::AccountNotFound => StatusCode::NOT_FOUND,
                ErrorCode::SameAccount | ErrorCode::InsufficientBalance => StatusCode::CONFLICT,
                ErrorCode::TransportError | ErrorCode::PartialTransfer => StatusCode::BAD_GATEWAY,
            },
        }
    }

    fn user_message(&self) -> String {
        match self {
            ApiError::Core(error) => error.user_message(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::warn!("request failed with {}: {}", status, self);
        let body = format!(
            "<div role='alert' class='p-3 rounded-lg bg-red-50 text-red-700'>{}</div>",
            crate::escape_html(&self.user_message())
        );
        (status, Html(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use accountweb_core::DomainError;

    #[test]
    fn test_status_codes() {
        let error = ApiError::BadRequest { message: "Unknown field: owner".to_string() };
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);

        let error = ApiError::from(CoreError::from(DomainError::AccountNotFound { id: "4".to_string() }));
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
        assert_eq!(error.user_message(), "Account not found");

        let error = ApiError::from(CoreError::from(DomainError::SameAccount { id: "1".to_string() }));
        assert_eq!(error.status(), StatusCode::CONFLICT);
    }
}
