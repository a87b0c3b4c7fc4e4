use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str =
    "An unexpected error occurred. Please try again later.";

/// Body of every unsuccessful response.
#[derive(Debug, Serialize)]
pub struct ApiError<E: Serialize> {
    pub success: bool,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<E>,
}

pub fn internal_server_error(err: impl Into<anyhow::Error>) -> Response {
    let err = err.into();
    tracing::error!("internal server error: {err:#}");
    error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_MESSAGE, None::<()>)
}

pub fn error(code: StatusCode, message: &'static str, errors: Option<impl Serialize>) -> Response {
    (
        code,
        Json(ApiError {
            success: false,
            message,
            errors,
        }),
    )
        .into_response()
}
