use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

const APP_DIR: &str = "ghprofile";

#[derive(Debug, Clone)]
pub struct AppPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
    profiles_dir: PathBuf,
}

impl AppPaths {
    pub fn discover() -> AppResult<Self> {
        let config_root = dirs::config_dir()
            .ok_or_else(|| AppError::Config("unable to resolve config directory".to_string()))?;
        let data_root = dirs::data_dir()
            .ok_or_else(|| AppError::Config("unable to resolve data directory".to_string()))?;

        Self::from_roots(config_root.join(APP_DIR), data_root.join(APP_DIR))
    }

    /// Builds the layout under explicit roots, creating the directories.
    pub fn from_roots(config_dir: PathBuf, data_dir: PathBuf) -> AppResult<Self> {
        let profiles_dir = config_dir.join("profiles");

        fs::create_dir_all(&profiles_dir)?;
        fs::create_dir_all(&data_dir)?;

        Ok(Self {
            config_dir,
            data_dir,
            profiles_dir,
        })
    }

    pub fn settings_file(&self, profile: &str) -> PathBuf {
        self.profiles_dir.join(format!("{profile}.json"))
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir.join("users.json")
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lays_out_profile_and_user_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let paths = AppPaths::from_roots(dir.path().join("config"), dir.path().join("data"))
            .expect("paths should build");

        assert!(paths.config_dir().join("profiles").is_dir());
        assert!(paths.data_dir().is_dir());
        assert_eq!(
            paths.settings_file("work"),
            dir.path().join("config").join("profiles").join("work.json")
        );
        assert_eq!(paths.users_file(), dir.path().join("data").join("users.json"));
    }
}
