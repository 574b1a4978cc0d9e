//! The GitHub profile lookup page.
//!
//! Every request builds a fresh [`GithubProfilePage`]. A `GET` renders the
//! empty form; a `POST` binds `Input.UserName`, asks the injected
//! [`GithubClient`] for the profile and renders whichever [`ProfileState`]
//! came back, always with the form available for another lookup.

use axum::Form;
use axum::extract::State;
use axum::response::Html;
use html_escape::encode_text;
use serde::Deserialize;

use crate::context::SharedContext;
use crate::github::{GithubClient, GithubUser};

use super::Viewer;
use super::layout;

const USER_NAME_REQUIRED: &str = "The UserName field is required.";

#[derive(Debug, Clone, Default)]
pub struct ProfileInput {
    pub user_name: String,
}

/// Raw form body. The field may arrive under its bound name or its element id.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(rename = "Input.UserName", default)]
    pub field_name: Option<String>,
    #[serde(rename = "Input_UserName", default)]
    pub element_id: Option<String>,
}

impl From<ProfileForm> for ProfileInput {
    fn from(form: ProfileForm) -> Self {
        Self {
            user_name: form.field_name.or(form.element_id).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileState {
    Initial,
    Found(GithubUser),
    NotFound { user_name: String },
    Unavailable { user_name: String, message: String },
}

impl ProfileState {
    pub fn profile(&self) -> Option<&GithubUser> {
        match self {
            ProfileState::Found(user) => Some(user),
            _ => None,
        }
    }
}

/// Resolves `user_name` through `client` into the state the page shows.
pub async fn lookup_profile(client: &dyn GithubClient, user_name: &str) -> ProfileState {
    match client.get_user(user_name).await {
        Ok(Some(user)) => ProfileState::Found(user),
        Ok(None) => ProfileState::NotFound {
            user_name: user_name.to_string(),
        },
        Err(err) => {
            tracing::warn!(user_name, error = %err, "github lookup failed");
            ProfileState::Unavailable {
                user_name: user_name.to_string(),
                message: err.to_string(),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct GithubProfilePage {
    pub input: ProfileInput,
    pub validation: Option<&'static str>,
    pub state: ProfileState,
}

impl GithubProfilePage {
    pub fn initial() -> Self {
        Self {
            input: ProfileInput::default(),
            validation: None,
            state: ProfileState::Initial,
        }
    }

    pub async fn submit(client: &dyn GithubClient, input: ProfileInput) -> Self {
        if input.user_name.trim().is_empty() {
            return Self {
                input,
                validation: Some(USER_NAME_REQUIRED),
                state: ProfileState::Initial,
            };
        }

        let state = lookup_profile(client, &input.user_name).await;
        Self {
            input,
            validation: None,
            state,
        }
    }

    pub fn render(&self, signed_in_as: Option<&str>) -> Html<String> {
        let validation = self
            .validation
            .map(|message| {
                format!(
                    r#"<span class="field-validation-error" data-valmsg-for="Input.UserName">{message}</span>"#
                )
            })
            .unwrap_or_default();

        let body = format!(
            r#"<h1>GitHub profile</h1>
<form id="user-profile" method="post" action="/GithubProfile">
    {field}
    {validation}
    <button id="get-profile" type="submit">Get profile</button>
</form>
{state}"#,
            field = layout::input_field("UserName", "User name", "text", &self.input.user_name),
            state = render_state(&self.state),
        );

        layout::page("GitHub profile", signed_in_as, &body)
    }
}

fn render_state(state: &ProfileState) -> String {
    match state {
        ProfileState::Initial => String::new(),
        ProfileState::Found(user) => {
            let mut rows = format!(
                r#"<dt>Login</dt><dd id="user-login">{}</dd>"#,
                encode_text(&user.login)
            );
            if let Some(name) = &user.name {
                rows.push_str(&format!(
                    r#"<dt>Name</dt><dd id="user-name">{}</dd>"#,
                    encode_text(name)
                ));
            }
            if let Some(company) = &user.company {
                rows.push_str(&format!(
                    r#"<dt>Company</dt><dd id="user-company">{}</dd>"#,
                    encode_text(company)
                ));
            }
            format!(r#"<dl id="user-details">{rows}</dl>"#)
        }
        ProfileState::NotFound { user_name } => format!(
            r#"<p id="user-not-found">No GitHub user named <strong>{}</strong> was found.</p>"#,
            encode_text(user_name)
        ),
        ProfileState::Unavailable { user_name, message } => format!(
            r#"<div id="lookup-failed" class="alert alert-warning" role="alert">
    <p>Could not reach GitHub to look up <strong>{}</strong>. Please try again.</p>
    <p class="small">{}</p>
</div>"#,
            encode_text(user_name),
            encode_text(message)
        ),
    }
}

pub async fn show(viewer: Viewer) -> Html<String> {
    GithubProfilePage::initial().render(viewer.email())
}

pub async fn submit(
    State(ctx): State<SharedContext>,
    viewer: Viewer,
    Form(form): Form<ProfileForm>,
) -> Html<String> {
    let page = GithubProfilePage::submit(ctx.github.as_ref(), form.into()).await;
    page.render(viewer.email())
}
