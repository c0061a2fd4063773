use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

use crate::error::AuthError;
use crate::session::Session;

/// Persistence adapter the session is rehydrated from.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, AuthError>;

    fn save(&self, session: &Session) -> Result<(), AuthError>;

    fn clear(&self) -> Result<(), AuthError>;
}

/// Keeps the session for the lifetime of the process only.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<Session>, AuthError> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(slot.clone())
    }

    fn save(&self, session: &Session) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))?;
        *slot = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}

/// Stores the session as a JSON document on disk.
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AuthError::Store(e.to_string())),
        };
        let session =
            serde_json::from_str(&raw).map_err(|e| AuthError::CorruptSession(e.to_string()))?;
        debug!("Loaded session from {}", self.path.display());
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| AuthError::Store(e.to_string()))?;
        }
        let raw =
            serde_json::to_string_pretty(session).map_err(|e| AuthError::Store(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| AuthError::Store(e.to_string()))
    }

    fn clear(&self) -> Result<(), AuthError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Store(e.to_string())),
        }
    }
}
