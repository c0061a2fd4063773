use tarot_common::TarotError;
use thiserror::Error;

use crate::role::Role;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not logged in")]
    NotAuthenticated,
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
    #[error("Token is missing the {0} claim")]
    MissingClaim(&'static str),
    #[error("Unknown role code: {0}")]
    UnknownRole(String),
    #[error("Token is expired")]
    Expired,
    #[error("Role {role:?} may not access this area")]
    Forbidden { role: Role },
    #[error("Session store error: {0}")]
    Store(String),
    /// The stored session exists but cannot be decoded.
    #[error("Stored session is unreadable: {0}")]
    CorruptSession(String),
}

impl From<AuthError> for TarotError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(msg) | AuthError::CorruptSession(msg) => {
                TarotError::InternalError(format!("Session store: {}", msg))
            }
            other => TarotError::AuthError(other.to_string()),
        }
    }
}
