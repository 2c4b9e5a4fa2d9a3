//! Salted, slow password hashing with bcrypt.
//!
//! bcrypt is CPU bound, so both operations run on the blocking thread pool.

use tokio::sync::OnceCell;

use crate::errors::AppError;

/// Stand-in hash checked when no account matches, created on first use.
static ABSENT_USER_HASH: OnceCell<String> = OnceCell::const_new();

/// Hash a plaintext password with the given bcrypt cost.
pub async fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Check a plaintext password against a stored hash.
///
/// A malformed stored hash never matches.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::error!("Stored password hash could not be verified: {}", e);
            Ok(false)
        }
    }
}

/// Run a full bcrypt check for a login whose username has no account.
///
/// Always `false`; the work keeps unknown usernames as slow as wrong passwords.
pub async fn verify_absent_user(password: &str, cost: u32) -> Result<bool, AppError> {
    let hash = ABSENT_USER_HASH
        .get_or_try_init(|| hash_password("amplify-absent-user", cost))
        .await?;
    verify_password(password, hash).await?;
    Ok(false)
}
