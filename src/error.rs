use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{db::StoreError, types::FieldIssue};

/// Failures of a [`LinkService`](crate::service::LinkService) operation.
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("invalid input")]
    Validation(Vec<FieldIssue>),
    #[error("code already in use: {0}")]
    CodeConflict(String),
    #[error("link not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LinkError {
    pub fn status(&self) -> StatusCode {
        match self {
            LinkError::Validation(_) => StatusCode::BAD_REQUEST,
            LinkError::CodeConflict(_) => StatusCode::CONFLICT,
            LinkError::NotFound(_) => StatusCode::NOT_FOUND,
            LinkError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for LinkError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            LinkError::Validation(issues) => json!({ "error": issues }),
            LinkError::CodeConflict(_) => json!({ "error": "Code already in use" }),
            LinkError::NotFound(_) => json!({ "error": "Link not found" }),
            LinkError::Store(e) => {
                error!(error = %e, "Database error");
                json!({ "error": "Server error" })
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            LinkError::Validation(vec![]).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LinkError::CodeConflict("abcdef".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            LinkError::NotFound("abcdef".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LinkError::Store(StoreError::UnsupportedUrl("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
