//! JSON responses and the single client-facing error

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::Error;

/// Body sent with every 404 and 500
pub const NULL_BODY: &str = "null";

/// Response with `Content-Type: application/json` and a pre-serialized body
pub fn json_response(status: StatusCode, body: impl Into<String>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        body.into(),
    )
        .into_response()
}

pub fn not_found() -> Response {
    json_response(StatusCode::NOT_FOUND, NULL_BODY)
}

/// Any failure while serving a request. Logged, never shown to the client.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl<E: Into<Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "Request failed: {}", self.0);
        json_response(StatusCode::INTERNAL_SERVER_ERROR, NULL_BODY)
    }
}
