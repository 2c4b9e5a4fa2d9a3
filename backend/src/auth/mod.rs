//! Session-cookie authentication.
//!
//! The guards are `from_fn` middleware. On success they put the caller's
//! [`SessionUser`] into the request extensions for the handler.

mod password;
mod session;

pub use password::*;
pub use session::*;

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::errors::AppError;

/// Where unauthenticated page requests are sent.
pub const LOGIN_PATH: &str = "/admin/login";

/// API routes: any signed-in role.
pub async fn require_api_login(session: Session, mut request: Request, next: Next) -> Response {
    match current_user(&session).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => AppError::Unauthorized("Authentication required".to_string()).into_response(),
        Err(e) => e.into_response(),
    }
}

/// API routes: administrators only.
pub async fn require_api_admin(session: Session, mut request: Request, next: Next) -> Response {
    match current_user(&session).await {
        Ok(Some(user)) if user.role.is_admin() => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(Some(user)) => {
            tracing::warn!(username = %user.username, "Non-admin denied access to user API");
            AppError::Forbidden("Access denied".to_string()).into_response()
        }
        Ok(None) => AppError::Unauthorized("Authentication required".to_string()).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Page routes: any signed-in role, otherwise redirect to the login page.
pub async fn require_page_login(session: Session, mut request: Request, next: Next) -> Response {
    match current_user(&session).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => Redirect::to(LOGIN_PATH).into_response(),
        Err(_) => page_failure(),
    }
}

/// Page routes: administrators only.
pub async fn require_page_admin(session: Session, mut request: Request, next: Next) -> Response {
    match current_user(&session).await {
        Ok(Some(user)) if user.role.is_admin() => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(Some(_)) => (
            StatusCode::FORBIDDEN,
            "Access denied. Admin role required.",
        )
            .into_response(),
        Ok(None) => Redirect::to(LOGIN_PATH).into_response(),
        Err(_) => page_failure(),
    }
}

fn page_failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
}
