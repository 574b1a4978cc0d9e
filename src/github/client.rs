use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::config::Settings;
use crate::error::{AppError, AppResult};

use super::users;
use super::{GithubClient, GithubUser};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Debug, Clone)]
pub struct HttpGithubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGithubClient {
    pub fn from_settings(settings: &Settings) -> AppResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );

        let http = Client::builder()
            .user_agent(settings.user_agent())
            .default_headers(headers)
            .timeout(settings.request_timeout())
            .build()?;

        let base_url = settings.github_api_base_url().to_string();
        Url::parse(&base_url)?;

        Ok(Self {
            http,
            base_url,
            token: settings.github_token().map(ToOwned::to_owned),
        })
    }

    fn endpoint_url(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::Config(format!(
                    "github api base url `{}` cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl GithubClient for HttpGithubClient {
    async fn get_user(&self, username: &str) -> AppResult<Option<GithubUser>> {
        let url = self.endpoint_url(&users::user_path_segments(username))?;
        tracing::debug!(%url, "fetching github user");

        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(username, "github user not found");
            return Ok(None);
        }

        if status.is_success() {
            return Ok(Some(response.json().await?));
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_api_error(status, &body))
    }
}

#[derive(Debug, Deserialize)]
struct GithubApiError {
    message: Option<String>,
    documentation_url: Option<String>,
}

fn map_api_error(status: StatusCode, body: &str) -> AppError {
    let message = parse_api_error_message(body).unwrap_or_else(|| {
        let body = body.trim();
        if body.is_empty() {
            "no error details in response body".to_string()
        } else {
            body.to_string()
        }
    });

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return AppError::Auth(format!(
            "github api rejected the request ({status}): {message}. check github_token"
        ));
    }

    AppError::Api(format!("github api request failed ({status}): {message}"))
}

fn parse_api_error_message(body: &str) -> Option<String> {
    let error = serde_json::from_str::<GithubApiError>(body).ok()?;
    match (error.message, error.documentation_url) {
        (Some(message), Some(docs)) => Some(format!("{message} (see {docs})")),
        (Some(message), None) => Some(message),
        (None, Some(docs)) => Some(format!("see {docs}")),
        (None, None) => None,
    }
}
