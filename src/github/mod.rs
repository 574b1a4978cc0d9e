pub mod client;
pub mod memory;
pub mod models;
pub mod users;

use async_trait::async_trait;

use crate::error::AppResult;

pub use client::HttpGithubClient;
pub use memory::InMemoryGithubClient;
pub use models::GithubUser;

/// Looks up a public GitHub profile by username.
///
/// `Ok(None)` means the user does not exist; it is not an error. `Err` is
/// reserved for failures reaching or understanding the backing service.
#[async_trait]
pub trait GithubClient: Send + Sync {
    async fn get_user(&self, username: &str) -> AppResult<Option<GithubUser>>;
}
