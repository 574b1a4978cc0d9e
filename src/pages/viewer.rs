use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::header::{COOKIE, LOCATION};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use crate::context::SharedContext;
use crate::error::AppError;
use crate::identity::UserRecord;
use crate::identity::session::session_token;

pub const LOGIN_PATH: &str = "/Identity/Account/Login";

/// The (possibly anonymous) user behind a request.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    pub user: Option<UserRecord>,
    pub session: Option<String>,
}

impl Viewer {
    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.email.as_str())
    }
}

impl FromRequestParts<SharedContext> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &SharedContext,
    ) -> Result<Self, Self::Rejection> {
        let session = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(session_token)
            .map(ToOwned::to_owned);

        let Some(token) = session else {
            return Ok(Self::default());
        };

        let user = match ctx.sessions.user_id(&token)? {
            Some(user_id) => ctx.with_identity(move |store| store.find_by_id(&user_id)).await?,
            None => None,
        };

        Ok(Self {
            user,
            session: Some(token),
        })
    }
}

/// A request from a signed-in user; anonymous requests are sent to login.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: UserRecord,
}

impl FromRequestParts<SharedContext> for SignedIn {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &SharedContext,
    ) -> Result<Self, Self::Rejection> {
        let viewer = Viewer::from_request_parts(parts, ctx)
            .await
            .map_err(IntoResponse::into_response)?;

        match viewer.user {
            Some(user) => Ok(Self { user }),
            None => {
                let return_url = parts
                    .uri
                    .path_and_query()
                    .map(|pq| pq.as_str())
                    .unwrap_or("/");
                tracing::debug!(return_url, "anonymous request to protected page");
                Err(login_redirect(return_url))
            }
        }
    }
}

pub fn login_redirect(return_url: &str) -> Response {
    let encoded: String = url::form_urlencoded::byte_serialize(return_url.as_bytes()).collect();
    found(&format!("{LOGIN_PATH}?ReturnUrl={encoded}"))
}

/// `302 Found` to `location`.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Accepts only same-site absolute paths as redirect targets.
pub fn is_local_url(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\")
}
