//! User account model and the request bodies of the user administration API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role of an account. Administrators may manage users; editors only content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    Editor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Editor => "editor",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "editor" => Ok(UserRole::Editor),
            _ => Err(()),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored user account.
///
/// The password hash is never serialized, so handing a `User` to a JSON
/// response cannot leak it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: String,
}

/// Request body for creating a new user.
///
/// Fields are optional so that a missing field yields the API's own
/// validation message instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Request body for updating an existing user. Blank fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Validated changes handed to the repository.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<UserRole>,
}

/// Login form posted by the admin login page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Treat absent and whitespace-only values the same way.
pub fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<UserRole>(), Ok(UserRole::Admin));
        assert_eq!("editor".parse::<UserRole>(), Ok(UserRole::Editor));
        assert!("Admin".parse::<UserRole>().is_err());
        assert!("owner".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_user_serialization_omits_password_hash() {
        let user = User {
            id: "u1".to_string(),
            username: "alice".to_string(),
            password_hash: "$2b$10$secret".to_string(),
            role: UserRole::Editor,
            created_at: "2025-01-01T00:00:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["role"], "editor");
        assert_eq!(json["createdAt"], "2025-01-01T00:00:00+00:00");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_non_blank() {
        let blank = "   ".to_string();
        let value = "bob".to_string();
        assert_eq!(non_blank(None), None);
        assert_eq!(non_blank(Some(&blank)), None);
        assert_eq!(non_blank(Some(&value)), Some("bob"));
    }
}
