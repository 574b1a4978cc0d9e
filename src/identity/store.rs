use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub normalized_email: String,
    pub password_hash: String,
    pub created_at_unix: u64,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_uppercase()
}

pub trait IdentityStore: Send + Sync {
    fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;
    fn find_by_id(&self, id: &str) -> AppResult<Option<UserRecord>>;
    fn insert(&self, user: UserRecord) -> AppResult<()>;
    fn update(&self, user: &UserRecord) -> AppResult<()>;
}

fn duplicate_email(email: &str) -> AppError {
    AppError::InvalidInput(format!("email '{email}' is already taken"))
}

fn unknown_user(id: &str) -> AppError {
    AppError::Identity(format!("no user with id {id}"))
}

#[derive(Debug, Default)]
pub struct InMemoryIdentityStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdentityStore for InMemoryIdentityStore {
    fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let normalized = normalize_email(email);
        let users = self
            .users
            .read()
            .map_err(|_| AppError::lock_poisoned("identity store"))?;
        Ok(users
            .values()
            .find(|user| user.normalized_email == normalized)
            .cloned())
    }

    fn find_by_id(&self, id: &str) -> AppResult<Option<UserRecord>> {
        let users = self
            .users
            .read()
            .map_err(|_| AppError::lock_poisoned("identity store"))?;
        Ok(users.get(id).cloned())
    }

    fn insert(&self, user: UserRecord) -> AppResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AppError::lock_poisoned("identity store"))?;
        if users
            .values()
            .any(|existing| existing.normalized_email == user.normalized_email)
        {
            return Err(duplicate_email(&user.email));
        }

        users.insert(user.id.clone(), user);
        Ok(())
    }

    fn update(&self, user: &UserRecord) -> AppResult<()> {
        let mut users = self
            .users
            .write()
            .map_err(|_| AppError::lock_poisoned("identity store"))?;
        let slot = users.get_mut(&user.id).ok_or_else(|| unknown_user(&user.id))?;
        *slot = user.clone();
        Ok(())
    }
}

/// Keeps every account in one JSON file, rewritten on each change.
#[derive(Debug)]
pub struct FileIdentityStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileIdentityStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    fn load_all(&self) -> AppResult<Vec<UserRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_str(&raw)?)
    }

    fn save_all(&self, users: &[UserRecord]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let payload = serde_json::to_string_pretty(users)?;
        fs::write(&self.path, payload)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

impl IdentityStore for FileIdentityStore {
    fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let normalized = normalize_email(email);
        Ok(self
            .load_all()?
            .into_iter()
            .find(|user| user.normalized_email == normalized))
    }

    fn find_by_id(&self, id: &str) -> AppResult<Option<UserRecord>> {
        Ok(self.load_all()?.into_iter().find(|user| user.id == id))
    }

    fn insert(&self, user: UserRecord) -> AppResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::lock_poisoned("identity file"))?;
        let mut users = self.load_all()?;
        if users
            .iter()
            .any(|existing| existing.normalized_email == user.normalized_email)
        {
            return Err(duplicate_email(&user.email));
        }

        users.push(user);
        self.save_all(&users)
    }

    fn update(&self, user: &UserRecord) -> AppResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| AppError::lock_poisoned("identity file"))?;
        let mut users = self.load_all()?;
        let slot = users
            .iter_mut()
            .find(|existing| existing.id == user.id)
            .ok_or_else(|| unknown_user(&user.id))?;
        *slot = user.clone();
        self.save_all(&users)
    }
}
