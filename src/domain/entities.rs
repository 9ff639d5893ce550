//! User and Address records plus their field rules.

use crate::error::AppError;
use serde::Serialize;
use std::fmt;

pub const NAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub id: i64,
    pub email: String,
    pub user_id: i64,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User(id={}, name='{}')", self.id, self.name)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Address(id={}, email='{}', user_id={})",
            self.id, self.email, self.user_id
        )
    }
}

/// Trimmed, non-empty and at most `max` characters.
fn bounded(field: &str, value: &str, max: usize) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(value.to_string())
}

pub fn validate_name(name: &str) -> Result<String, AppError> {
    bounded("name", name, NAME_MAX_LEN)
}

pub fn validate_email(email: &str) -> Result<String, AppError> {
    bounded("email", email, EMAIL_MAX_LEN)
}
