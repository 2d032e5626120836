use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

/// Typed failures at the HTTP boundary. An unknown number is not one of
/// them: it yields an empty history and a low-default assessment instead.
#[derive(Debug)]
pub enum ApiError {
    /// A malformed or out-of-range report field, named for the caller.
    Validation {
        field: &'static str,
        reason: String,
    },
    /// The report store is unreachable. Surfaced as a degraded response,
    /// never folded into a default score.
    StoreUnavailable(eyre::Report),
}

impl ApiError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}

impl From<eyre::Report> for ApiError {
    fn from(err: eyre::Report) -> Self {
        Self::StoreUnavailable(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation { field, reason } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: reason,
                    field: Some(field),
                }),
            )
                .into_response(),
            Self::StoreUnavailable(err) => {
                tracing::error!(error = %err, "Report store unavailable");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(ErrorResponse {
                        error: "report store unavailable".to_string(),
                        field: None,
                    }),
                )
                    .into_response()
            }
        }
    }
}
