//! Session data stored for a signed-in browser.
//!
//! The session holds a snapshot of the user taken at login. It is not
//! re-checked against the user store, so role changes apply from the next login.

use serde::{Deserialize, Serialize};
use tower_sessions::cookie::{time::Duration, SameSite};
use tower_sessions::{Expiry, Session, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::{User, UserRole};

/// Key under which [`SessionAuth`] is stored.
pub const SESSION_AUTH_KEY: &str = "auth";

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "amplify.sid";

/// Identity of the signed-in caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub role: UserRole,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAuth {
    pub is_authenticated: bool,
    pub user: SessionUser,
}

/// The signed-in user, if any.
pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, AppError> {
    let auth: Option<SessionAuth> = session.get(SESSION_AUTH_KEY).await?;
    Ok(auth.filter(|a| a.is_authenticated).map(|a| a.user))
}

/// Mark the session as authenticated for `user`, under a fresh session id.
pub async fn sign_in(session: &Session, user: &User) -> Result<(), AppError> {
    session.cycle_id().await?;
    session
        .insert(
            SESSION_AUTH_KEY,
            SessionAuth {
                is_authenticated: true,
                user: SessionUser::from(user),
            },
        )
        .await?;
    Ok(())
}

/// Destroy the session.
pub async fn sign_out(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}

/// Build the cookie session layer backed by the SQLite session table.
pub fn session_layer(store: SqliteStore, config: &Config) -> SessionManagerLayer<SqliteStore> {
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_secure(config.cookie_secure)
        .with_expiry(Expiry::OnInactivity(Duration::hours(
            config.session_ttl_hours,
        )))
}
