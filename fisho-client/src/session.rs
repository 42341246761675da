//! Admin session and its JSON file storage
//!
//! The session is an explicit value: it is loaded once, handed to the HTTP
//! client, and replaced after login. Nothing reads it from global state.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::client::{AdminInfo, LoginResponse};

/// Bearer token plus the cached admin identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: Option<String>,
    admin: Option<AdminInfo>,
    /// Unix millis of the login that produced this session
    issued_at: Option<i64>,
}

impl Session {
    /// Session without credentials
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Session for a token obtained out of band
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            admin: None,
            issued_at: Some(shared::util::now_millis()),
        }
    }

    pub fn from_login(login: LoginResponse) -> Self {
        Self {
            token: Some(login.token),
            admin: Some(login.admin),
            issued_at: Some(shared::util::now_millis()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn admin(&self) -> Option<&AdminInfo> {
        self.admin.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Session persisted as a JSON file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, session: &Session) -> crate::ClientResult<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Load the stored session; a missing or unreadable file yields `None`.
    pub fn load(&self) -> Option<Session> {
        if !self.path.exists() {
            return None;
        }
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read session file");
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }

    /// Stored session, or an anonymous one
    pub fn load_or_anonymous(&self) -> Session {
        self.load().unwrap_or_default()
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
