//! Data models for the Amplify site.
//!
//! JSON field names match the admin panel client (camelCase).

mod content;
mod user;

pub use content::*;
pub use user::*;
