use std::sync::Arc;

use crate::config::{self, AppPaths, Settings};
use crate::error::AppResult;
use crate::github::{GithubClient, HttpGithubClient};
use crate::identity::{FileIdentityStore, IdentityStore, SessionStore};
use crate::output::Output;

/// Shared handle given to every request handler.
pub type SharedContext = Arc<AppContext>;

pub struct AppContext {
    pub profile: String,
    pub settings: Settings,
    pub github: Arc<dyn GithubClient>,
    pub identity: Arc<dyn IdentityStore>,
    pub sessions: SessionStore,
    pub output: Output,
}

impl AppContext {
    pub fn bootstrap(profile: String, json: bool, github_token: Option<String>) -> AppResult<Self> {
        let profile = config::resolve_profile(&profile);
        let paths = AppPaths::discover()?;
        let mut settings = config::load_settings(&paths, &profile)?;
        if github_token.is_some() {
            settings.github_token = github_token;
        }

        let github = Arc::new(HttpGithubClient::from_settings(&settings)?);
        let identity = Arc::new(FileIdentityStore::new(paths.users_file()));
        tracing::debug!(
            %profile,
            config_dir = %paths.config_dir().display(),
            data_dir = %paths.data_dir().display(),
            "loaded profile"
        );

        let mut ctx = Self::new(settings, github, identity);
        ctx.profile = profile;
        ctx.output = Output::new(json);
        Ok(ctx)
    }

    /// Assembles a context from explicit collaborators.
    pub fn new(
        settings: Settings,
        github: Arc<dyn GithubClient>,
        identity: Arc<dyn IdentityStore>,
    ) -> Self {
        Self {
            profile: "default".to_string(),
            settings,
            github,
            identity,
            sessions: SessionStore::new(),
            output: Output::new(false),
        }
    }

    pub fn shared(self) -> SharedContext {
        Arc::new(self)
    }

    /// Runs `f` against the identity store on the blocking pool. Store calls
    /// touch the disk and hash passwords, so they stay off the async workers.
    pub async fn with_identity<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&dyn IdentityStore) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let identity = Arc::clone(&self.identity);
        tokio::task::spawn_blocking(move || f(identity.as_ref())).await?
    }
}
