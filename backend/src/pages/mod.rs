//! Server-rendered pages: the public home page and the admin pages.

pub mod render;

use axum::{
    extract::{rejection::FormRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::auth::{
    current_user, sign_in, sign_out, verify_absent_user, verify_password, SessionUser, LOGIN_PATH,
};
use crate::errors::AppError;
use crate::models::{Language, LoginForm};
use crate::AppState;

/// Landing page after login.
pub const ADMIN_PATH: &str = "/admin";

/// Generic failure message; never says which factor was wrong.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// An [`AppError`] rendered as an HTML page.
pub struct PageError(AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.0.error_code(), "{}", self.0.message());
        }
        (status, Html(render::error_page(&self.0.public_message()))).into_response()
    }
}

pub type PageResult = Result<Response, PageError>;

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub lang: Option<String>,
}

/// GET / - Public home page; `lang` is `en` or `fr`, anything else falls back to `en`.
pub async fn home(State(state): State<AppState>, Query(query): Query<HomeQuery>) -> PageResult {
    let language: Language = query
        .lang
        .as_deref()
        .and_then(|l| l.parse().ok())
        .unwrap_or_default();

    let content = state.repo.get_site_content().await?;
    Ok(Html(render::home(&content, language)).into_response())
}

/// GET /admin/login
pub async fn login_page(session: Session) -> PageResult {
    if current_user(&session).await?.is_some() {
        return Ok(Redirect::to(ADMIN_PATH).into_response());
    }
    Ok(Html(render::login(None)).into_response())
}

/// POST /admin/login - Verify credentials and establish the session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    form: Result<Form<LoginForm>, FormRejection>,
) -> PageResult {
    let form = form.map(|Form(f)| f).unwrap_or_default();

    let user = state.repo.find_user_by_username(&form.username).await?;
    let verified = match &user {
        Some(user) => verify_password(&form.password, &user.password_hash).await?,
        None => verify_absent_user(&form.password, state.config.bcrypt_cost).await?,
    };

    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::warn!(username = %form.username, "Failed admin login");
            return Ok((
                StatusCode::UNAUTHORIZED,
                Html(render::login(Some(INVALID_CREDENTIALS))),
            )
                .into_response());
        }
    };

    sign_in(&session, &user).await?;
    tracing::info!(username = %user.username, role = %user.role, "Admin login");
    Ok(Redirect::to(ADMIN_PATH).into_response())
}

/// GET /admin/logout - Destroy the session unconditionally.
pub async fn logout(session: Session) -> PageResult {
    sign_out(&session).await?;
    Ok(Redirect::to(LOGIN_PATH).into_response())
}

/// GET /admin - Content panel for any signed-in role.
pub async fn admin_panel(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> PageResult {
    let content = state.repo.get_site_content().await?;
    Ok(Html(render::admin_panel(&content, &user)).into_response())
}

/// GET /admin/users - User management page for administrators.
pub async fn admin_users(
    State(state): State<AppState>,
    Extension(user): Extension<SessionUser>,
) -> PageResult {
    let users = state.repo.list_users().await?;
    Ok(Html(render::users_page(&users, &user)).into_response())
}
