#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use ghprofile::config::Settings;
use ghprofile::context::{AppContext, SharedContext};
use ghprofile::error::{AppError, AppResult};
use ghprofile::github::{GithubClient, GithubUser, InMemoryGithubClient};
use ghprofile::identity::InMemoryIdentityStore;
use ghprofile::server;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::redirect::Policy;
use tokio::net::TcpListener;

pub struct TestApp {
    pub base_url: String,
    pub http: reqwest::Client,
    pub ctx: SharedContext,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.http
            .get(self.url(path))
            .send()
            .await
            .expect("request should complete")
    }

    pub async fn get_with_cookie(&self, path: &str, cookie: &str) -> reqwest::Response {
        self.http
            .get(self.url(path))
            .header(COOKIE, cookie)
            .send()
            .await
            .expect("request should complete")
    }

    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> reqwest::Response {
        let mut request = self.http.post(self.url(path)).form(form);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }
        request.send().await.expect("request should complete")
    }
}

/// The fixed profile the fake client knows about.
pub fn test_user() -> GithubUser {
    GithubUser::new("user")
        .with_name("John Doe")
        .with_company("Contoso Blockchain")
}

pub fn fake_github() -> Arc<dyn GithubClient> {
    Arc::new(InMemoryGithubClient::new().with_user(test_user()))
}

pub struct FailingGithubClient;

#[async_trait]
impl GithubClient for FailingGithubClient {
    async fn get_user(&self, _username: &str) -> AppResult<Option<GithubUser>> {
        Err(AppError::Api(
            "github api request failed (503 Service Unavailable): try later".to_string(),
        ))
    }
}

pub async fn spawn_app(github: Arc<dyn GithubClient>) -> TestApp {
    let ctx = AppContext::new(
        Settings::default(),
        github,
        Arc::new(InMemoryIdentityStore::new()),
    )
    .shared();

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("listener has an address");
    let router = server::router(ctx.clone());
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("server should run");
    });

    let http = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("client should build");

    TestApp {
        base_url: format!("http://{addr}"),
        http,
        ctx,
    }
}

/// `name=value` of the cookie set by `response`.
pub fn cookie_from(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .expect("response should set a cookie")
        .to_string()
}

pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("response should redirect")
        .to_string()
}
