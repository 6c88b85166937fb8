use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::Deserialize;

use super::FromSqliteRow;

#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for User {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            email: row.get("email")?,
            password_hash: row.get("password_hash")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// Signup/login request body. Fields are optional so that missing ones
/// surface as a validation error instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Check both fields are present and non-blank, returning them trimmed.
    pub fn require_both(&self) -> Option<(&str, &str)> {
        let email = self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())?;
        let password = self.password.as_deref().filter(|p| !p.is_empty())?;
        Some((email, password))
    }
}

/// Minimal shape check; real deliverability is out of scope.
pub fn email_looks_valid(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
