//! REST API module.
//!
//! Contains the office routes and handlers following the frontend contract.

mod offices;

pub use offices::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::Envelope;

/// Success response carrying the `{code, message, data?}` envelope.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize>(pub Envelope<T>);

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self.0)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;

/// Create a successful API response with a payload.
pub fn success<T: Serialize>(message: &str, data: T) -> ApiResult<T> {
    Ok(ApiResponse(Envelope::new(
        StatusCode::OK.as_u16(),
        message,
        Some(data),
    )))
}

/// Create a successful API response without a payload.
pub fn done(message: &str) -> ApiResult<()> {
    Ok(ApiResponse(Envelope::new(StatusCode::OK.as_u16(), message, None)))
}
