use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::AuthError;
use crate::role::Role;
use crate::store::SessionStore;
use crate::token::decode_claims;

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub role: Role,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl Session {
    pub fn is_expired_at(&self, now_unix: i64) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now_unix)
    }
}

/// Current identity plus the store it is persisted to.
pub struct SessionContext {
    current: Option<Session>,
    store: Arc<dyn SessionStore>,
}

impl SessionContext {
    /// Creates an empty context. Call [`SessionContext::rehydrate`] to pick up a stored session.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            current: None,
            store,
        }
    }

    /// Loads the stored session, discarding it when its token has expired
    /// or when it cannot be decoded.
    pub fn rehydrate(&mut self) -> Result<Option<&Session>, AuthError> {
        self.current = match self.store.load() {
            Ok(Some(session)) if session.is_expired_at(Utc::now().timestamp()) => {
                warn!("Stored session for user {} has expired", session.user_id);
                self.store.clear()?;
                None
            }
            Ok(other) => other,
            Err(AuthError::CorruptSession(reason)) => {
                warn!("Discarding unreadable stored session: {}", reason);
                self.store.clear()?;
                None
            }
            Err(e) => return Err(e),
        };
        Ok(self.current.as_ref())
    }

    /// Starts a session from an access token and persists it.
    pub fn login(&mut self, token: &str) -> Result<&Session, AuthError> {
        let claims = decode_claims(token)?;
        let session = Session {
            token: token.to_string(),
            user_id: claims.user_id,
            role: claims.role,
            expires_at: claims.expires_at,
        };
        if session.is_expired_at(Utc::now().timestamp()) {
            return Err(AuthError::Expired);
        }
        self.store.save(&session)?;
        info!("Logged in user {} as {}", session.user_id, session.role);
        Ok(self.current.insert(session))
    }

    pub fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(session) = self.current.take() {
            info!("Logged out user {}", session.user_id);
        }
        self.store.clear()
    }

    /// Drops the session after the API rejected its token as expired.
    pub fn handle_token_expired(&mut self) -> Result<(), AuthError> {
        warn!("API reported an expired token, clearing session");
        self.logout()
    }

    pub fn session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.user_id.as_str())
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|s| s.role)
    }

    /// Gate for role-restricted areas.
    pub fn require_role(&self, allowed: &[Role]) -> Result<&Session, AuthError> {
        let session = self.current.as_ref().ok_or(AuthError::NotAuthenticated)?;
        if allowed.contains(&session.role) {
            Ok(session)
        } else {
            Err(AuthError::Forbidden { role: session.role })
        }
    }
}
