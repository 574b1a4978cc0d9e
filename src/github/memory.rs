use std::collections::HashMap;

use async_trait::async_trait;

use crate::error::AppResult;

use super::{GithubClient, GithubUser};

/// Fixed lookup table standing in for the GitHub API.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGithubClient {
    users: HashMap<String, GithubUser>,
}

impl InMemoryGithubClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: GithubUser) -> Self {
        self.users.insert(user.login.clone(), user);
        self
    }
}

#[async_trait]
impl GithubClient for InMemoryGithubClient {
    async fn get_user(&self, username: &str) -> AppResult<Option<GithubUser>> {
        Ok(self.users.get(username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> InMemoryGithubClient {
        InMemoryGithubClient::new().with_user(
            GithubUser::new("user")
                .with_name("John Doe")
                .with_company("Contoso Blockchain"),
        )
    }

    #[tokio::test]
    async fn returns_profile_for_known_login() {
        let user = client()
            .get_user("user")
            .await
            .expect("lookup should succeed")
            .expect("user should exist");

        assert_eq!(user.login, "user");
        assert_eq!(user.name.as_deref(), Some("John Doe"));
    }

    #[tokio::test]
    async fn returns_none_for_unknown_login() {
        let user = client()
            .get_user("doesnotexist")
            .await
            .expect("lookup should succeed");
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn repeated_lookups_are_identical() {
        let client = client();
        let first = client.get_user("user").await.expect("first lookup");
        let second = client.get_user("user").await.expect("second lookup");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn lookups_are_not_normalized() {
        let user = client().get_user("USER").await.expect("lookup should succeed");
        assert!(user.is_none());
    }
}
