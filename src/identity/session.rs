use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{AppError, AppResult};

use super::password::random_token;

pub const SESSION_COOKIE: &str = "ghprofile.session";

/// In-memory table of signed-in sessions, keyed by cookie token.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session for `user_id` and returns its token.
    pub fn start(&self, user_id: &str) -> AppResult<String> {
        let token = random_token(32);
        self.sessions
            .write()
            .map_err(|_| AppError::lock_poisoned("session table"))?
            .insert(token.clone(), user_id.to_string());
        Ok(token)
    }

    pub fn user_id(&self, token: &str) -> AppResult<Option<String>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| AppError::lock_poisoned("session table"))?;
        Ok(sessions.get(token).cloned())
    }

    pub fn end(&self, token: &str) -> AppResult<()> {
        self.sessions
            .write()
            .map_err(|_| AppError::lock_poisoned("session table"))?
            .remove(token);
        Ok(())
    }
}

/// Pulls the session token out of a `Cookie` header value.
pub fn session_token(cookie_header: &str) -> Option<&str> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
