//! Database repository for user and content operations.
//!
//! Uses prepared statements and transactions for data integrity.

use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{
    ContentDocument, ContentSections, Language, SiteContent, UpdateContentRequest, User,
    UserChanges, UserRole,
};

/// Message shared by the pre-write check and the constraint violation.
pub const DUPLICATE_USERNAME: &str = "Username already exists";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    // ==================== USER OPERATIONS ====================

    /// List all users, oldest first.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query(
            "SELECT id, username, password_hash, role, created_at FROM users ORDER BY created_at, username",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, role, created_at FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Get a user by exact username match.
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            "SELECT id, username, password_hash, role, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Whether `username` belongs to any user other than `except_id`.
    pub async fn username_taken(
        &self,
        username: &str,
        except_id: Option<&str>,
    ) -> Result<bool, AppError> {
        let row = sqlx::query("SELECT id FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(match row {
            Some(row) => {
                let owner: String = row.get("id");
                except_id != Some(owner.as_str())
            }
            None => false,
        })
    }

    /// Create a new user. The password must already be hashed.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO users (id, username, password_hash, role, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(username)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: now,
        })
    }

    /// Apply a partial update to a user.
    pub async fn update_user(&self, id: &str, changes: &UserChanges) -> Result<User, AppError> {
        let existing = self
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let username = changes
            .username
            .clone()
            .unwrap_or_else(|| existing.username.clone());
        let password_hash = changes
            .password_hash
            .clone()
            .unwrap_or_else(|| existing.password_hash.clone());
        let role = changes.role.unwrap_or(existing.role);

        let result =
            sqlx::query("UPDATE users SET username = ?, password_hash = ?, role = ? WHERE id = ?")
                .bind(&username)
                .bind(&password_hash)
                .bind(role.as_str())
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(User {
            id: existing.id,
            username,
            password_hash,
            role,
            created_at: existing.created_at,
        })
    }

    /// Delete a user.
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    // ==================== CONTENT OPERATIONS ====================

    /// Get the content document for one language.
    pub async fn get_content(
        &self,
        language: Language,
    ) -> Result<Option<ContentDocument>, AppError> {
        let row = sqlx::query("SELECT language, body, updated_at FROM content WHERE language = ?")
            .bind(language.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(content_from_row).transpose()
    }

    /// Get both content documents. A missing document is an error, not a partial result.
    pub async fn get_site_content(&self) -> Result<SiteContent, AppError> {
        let en = self.get_content(Language::En).await?;
        let fr = self.get_content(Language::Fr).await?;

        match (en, fr) {
            (Some(en), Some(fr)) => Ok(SiteContent { en, fr }),
            _ => {
                tracing::error!("Content not found in database");
                Err(AppError::Internal(
                    "Content not found in database".to_string(),
                ))
            }
        }
    }

    /// Insert a content document unless one already exists. Returns whether it was inserted.
    pub async fn insert_content_if_absent(
        &self,
        language: Language,
        sections: &ContentSections,
    ) -> Result<bool, AppError> {
        let body = encode_sections(sections)?;
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            "INSERT INTO content (language, body, updated_at) VALUES (?, ?, ?) ON CONFLICT(language) DO NOTHING",
        )
        .bind(language.as_str())
        .bind(&body)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Apply the language patches of `request` in a single transaction.
    ///
    /// Each present language is upserted: a missing document is created from
    /// the supplied sections. Absent languages are not touched.
    pub async fn update_content(
        &self,
        request: &UpdateContentRequest,
    ) -> Result<Vec<ContentDocument>, AppError> {
        let now = Utc::now().to_rfc3339();
        // Take the write lock up front: a deferred transaction that reads first
        // cannot be upgraded while another writer holds the lock.
        let mut tx = self.pool.begin_with("BEGIN IMMEDIATE").await?;
        let mut documents = Vec::new();

        for (language, patch) in request.patches() {
            let row =
                sqlx::query("SELECT language, body, updated_at FROM content WHERE language = ?")
                    .bind(language.as_str())
                    .fetch_optional(&mut *tx)
                    .await?;

            let mut sections = match row.as_ref() {
                Some(row) => content_from_row(row)?.sections,
                None => ContentSections::default(),
            };
            sections.apply(patch);
            let body = encode_sections(&sections)?;

            sqlx::query(
                r#"INSERT INTO content (language, body, updated_at) VALUES (?, ?, ?)
                ON CONFLICT(language) DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at"#,
            )
            .bind(language.as_str())
            .bind(&body)
            .bind(&now)
            .execute(&mut *tx)
            .await?;

            documents.push(ContentDocument {
                language,
                sections,
                updated_at: now.clone(),
            });
        }

        tx.commit().await?;

        Ok(documents)
    }
}

// Helper functions for row conversion

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    let role: String = row.get("role");
    User {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        // The CHECK constraint keeps this parseable; fall back to the lesser role.
        role: role.parse().unwrap_or_default(),
        created_at: row.get("created_at"),
    }
}

fn content_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<ContentDocument, AppError> {
    let language: String = row.get("language");
    let body: String = row.get("body");

    let language = language.parse().map_err(|_| {
        AppError::Internal(format!("Unknown content language {:?} in database", language))
    })?;
    let sections = serde_json::from_str(&body).map_err(|e| {
        tracing::error!("Corrupt content document for {}: {:?}", language, e);
        AppError::Internal(format!("Corrupt content document for {}", language))
    })?;

    Ok(ContentDocument {
        language,
        sections,
        updated_at: row.get("updated_at"),
    })
}

fn encode_sections(sections: &ContentSections) -> Result<String, AppError> {
    serde_json::to_string(sections)
        .map_err(|e| AppError::Internal(format!("Failed to encode content: {}", e)))
}

fn map_unique_violation(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            tracing::info!("Rejected duplicate username at the store");
            AppError::Validation(DUPLICATE_USERNAME.to_string())
        }
        _ => AppError::from(err),
    }
}
