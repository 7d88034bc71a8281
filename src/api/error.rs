use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::BarbacoaError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Barbacoa(#[from] BarbacoaError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Barbacoa(err) => status_for(err),
        }
    }
}

/// HTTP status for a domain error
pub fn status_for(err: &BarbacoaError) -> StatusCode {
    match err {
        BarbacoaError::DuplicateEventName(_) | BarbacoaError::Duplicate { .. } => {
            StatusCode::CONFLICT
        }
        BarbacoaError::NotFound { .. } => StatusCode::NOT_FOUND,
        BarbacoaError::InvalidAmount(_)
        | BarbacoaError::MissingParticipant
        | BarbacoaError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&BarbacoaError::DuplicateEventName("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&BarbacoaError::barbacoa_not_found("x")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&BarbacoaError::MissingParticipant),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&BarbacoaError::InvalidAmount("-1".into())),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&BarbacoaError::Storage("disk".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_failure_is_a_500() {
        let response = ApiError::from(BarbacoaError::Storage("disk full".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
