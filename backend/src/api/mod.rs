//! JSON API module.
//!
//! Contains the content and user administration handlers and their envelope.

mod content;
mod users;

pub use content::*;
pub use users::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::User;

/// Success response envelope: `{success, message, ...payload}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(payload: T, message: Option<String>) -> Self {
        Self {
            success: true,
            message,
            payload,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(payload: T) -> ApiResult<T> {
    Ok(ApiResponse::new(payload, None))
}

/// Create a successful API response carrying a message.
pub fn success_with<T: Serialize>(payload: T, message: &str) -> ApiResult<T> {
    Ok(ApiResponse::new(payload, Some(message.to_string())))
}

/// Payload with no fields beyond the envelope.
#[derive(Debug, Serialize)]
pub struct Empty {}

#[derive(Debug, Serialize)]
pub struct UserPayload {
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UsersPayload {
    pub users: Vec<User>,
}
