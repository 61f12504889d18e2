pub mod account_service;
pub mod note_service;

pub use account_service::{AccountService, DrawerSession, UserSession};
pub use note_service::NoteService;

use crate::auth::password::PasswordError;
use crate::auth::TokenError;
use crate::database::DatabaseError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("Drawer name is already taken")]
    DuplicateDrawerName,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Note not found")]
    NotFound,

    #[error("Note belongs to another owner")]
    Forbidden,

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

/// Trim a required text field, rejecting it when absent or blank.
pub(crate) fn required(field: &str, value: Option<String>) -> Result<String, ServiceError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServiceError::Validation(format!("Missing required field: {}", field)))
}

/// Passwords are checked for presence only; they are never trimmed.
pub(crate) fn required_password(value: Option<String>) -> Result<String, ServiceError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ServiceError::Validation("Missing required field: password".to_string()))
}
