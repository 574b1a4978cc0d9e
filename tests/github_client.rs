use axum::extract::Path;
use axum::http::header::{AUTHORIZATION, HeaderName, USER_AGENT};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use ghprofile::config::Settings;
use ghprofile::error::AppError;
use ghprofile::github::{GithubClient, HttpGithubClient};
use serde_json::json;
use tokio::net::TcpListener;

async fn user(Path(login): Path<String>, headers: HeaderMap) -> Response {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned)
    };

    match login.as_str() {
        "octocat" => Json(json!({
            "login": "octocat",
            "id": 583231,
            "name": "The Octocat",
            "company": "@github",
            "public_repos": 8
        }))
        .into_response(),
        "echo" => Json(json!({
            "login": "echo",
            "name": header(AUTHORIZATION),
            "company": header(USER_AGENT),
        }))
        .into_response(),
        "limited" => (
            StatusCode::FORBIDDEN,
            Json(json!({
                "message": "API rate limit exceeded",
                "documentation_url": "https://docs.github.com/rest"
            })),
        )
            .into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Not Found"})),
        )
            .into_response(),
    }
}

async fn spawn_mock_github() -> String {
    let router = Router::new()
        .route("/users/{login}", get(user))
        .route("/api/v3/users/{login}", get(user));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("listener has an address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("mock server should run");
    });

    format!("http://{addr}")
}

fn client(base_url: &str, token: Option<&str>) -> HttpGithubClient {
    let settings = Settings {
        github_api_base_url: Some(base_url.to_string()),
        github_token: token.map(ToOwned::to_owned),
        user_agent: Some("ghprofile-tests".to_string()),
        ..Settings::default()
    };
    HttpGithubClient::from_settings(&settings).expect("client should build")
}

#[tokio::test]
async fn fetches_existing_user() {
    let base_url = spawn_mock_github().await;

    let user = client(&base_url, None)
        .get_user("octocat")
        .await
        .expect("lookup should succeed")
        .expect("user should exist");

    assert_eq!(user.login, "octocat");
    assert_eq!(user.name.as_deref(), Some("The Octocat"));
    assert_eq!(user.company.as_deref(), Some("@github"));
}

#[tokio::test]
async fn missing_user_is_absent_not_an_error() {
    let base_url = spawn_mock_github().await;

    let user = client(&base_url, None)
        .get_user("doesnotexist")
        .await
        .expect("lookup should succeed");
    assert!(user.is_none());
}

#[tokio::test]
async fn repeated_lookups_agree() {
    let base_url = spawn_mock_github().await;
    let client = client(&base_url, None);

    let first = client.get_user("octocat").await.expect("first lookup");
    let second = client.get_user("octocat").await.expect("second lookup");
    assert_eq!(first, second);
}

#[tokio::test]
async fn sends_token_and_user_agent() {
    let base_url = spawn_mock_github().await;

    let user = client(&base_url, Some("ghp_example"))
        .get_user("echo")
        .await
        .expect("lookup should succeed")
        .expect("user should exist");

    assert_eq!(user.name.as_deref(), Some("Bearer ghp_example"));
    assert_eq!(user.company.as_deref(), Some("ghprofile-tests"));
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let base_url = spawn_mock_github().await;

    let user = client(&base_url, None)
        .get_user("echo")
        .await
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(user.name, None);
}

#[tokio::test]
async fn honors_enterprise_path_prefix() {
    let base_url = spawn_mock_github().await;

    let user = client(&format!("{base_url}/api/v3"), None)
        .get_user("octocat")
        .await
        .expect("lookup should succeed");
    assert!(user.is_some());
}

#[tokio::test]
async fn rate_limit_surfaces_as_auth_error() {
    let base_url = spawn_mock_github().await;

    match client(&base_url, None).get_user("limited").await {
        Err(AppError::Auth(message)) => assert!(message.contains("rate limit")),
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_surfaces_as_api_error() {
    let base_url = spawn_mock_github().await;

    match client(&base_url, None).get_user("broken").await {
        Err(AppError::Api(message)) => assert!(message.contains("boom")),
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("listener has an address");
    drop(listener);

    let result = client(&format!("http://{addr}"), None).get_user("octocat").await;
    assert!(matches!(result, Err(AppError::Http(_))));
}
