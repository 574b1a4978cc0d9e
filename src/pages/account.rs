use axum::Form;
use axum::extract::{Query, State};
use axum::http::HeaderValue;
use axum::http::header::{InvalidHeaderValue, SET_COOKIE};
use axum::response::{Html, IntoResponse, Response};
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::Deserialize;

use crate::context::SharedContext;
use crate::error::{AppError, AppResult};
use crate::identity::IdentityService;
use crate::identity::session::{expired_session_cookie, session_cookie};

use super::layout::{self, input_field, status_message, validation_summary};
use super::viewer::{found, is_local_url};
use super::{SignedIn, Viewer};

const INVALID_LOGIN: &str = "Invalid login attempt.";
const PASSWORD_CHANGED: &str = "Your password has been changed.";

#[derive(Debug, Default, Deserialize)]
pub struct ReturnUrlQuery {
    #[serde(rename = "ReturnUrl", default)]
    pub return_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginInput {
    #[serde(rename = "Input.Email", default)]
    pub email: String,
    #[serde(rename = "Input.Password", default)]
    pub password: String,
    #[serde(rename = "ReturnUrl", default)]
    pub return_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterInput {
    #[serde(rename = "Input.Email", default)]
    pub email: String,
    #[serde(rename = "Input.Password", default)]
    pub password: String,
    #[serde(rename = "Input.ConfirmPassword", default)]
    pub confirm_password: String,
    #[serde(rename = "ReturnUrl", default)]
    pub return_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChangePasswordInput {
    #[serde(rename = "Input.OldPassword", default)]
    pub old_password: String,
    #[serde(rename = "Input.NewPassword", default)]
    pub new_password: String,
    #[serde(rename = "Input.ConfirmPassword", default)]
    pub confirm_password: String,
}

pub async fn login_form(viewer: Viewer, Query(query): Query<ReturnUrlQuery>) -> Html<String> {
    render_login(viewer.email(), "", query.return_url.as_deref(), None)
}

pub async fn login(
    State(ctx): State<SharedContext>,
    viewer: Viewer,
    Form(input): Form<LoginInput>,
) -> AppResult<Response> {
    let (email, password) = (input.email.clone(), input.password.clone());
    let signed_in = ctx
        .with_identity(move |store| IdentityService::sign_in(store, &email, &password))
        .await?;
    let Some(user) = signed_in else {
        tracing::info!("rejected login attempt");
        return Ok(render_login(
            viewer.email(),
            &input.email,
            input.return_url.as_deref(),
            Some(INVALID_LOGIN),
        )
        .into_response());
    };

    tracing::info!(user_id = %user.id, "user logged in");
    sign_in_redirect(&ctx, &user.id, input.return_url.as_deref())
}

pub async fn register_form(viewer: Viewer, Query(query): Query<ReturnUrlQuery>) -> Html<String> {
    render_register(viewer.email(), "", query.return_url.as_deref(), None)
}

pub async fn register(
    State(ctx): State<SharedContext>,
    viewer: Viewer,
    Form(input): Form<RegisterInput>,
) -> AppResult<Response> {
    let (email, password, confirm) = (
        input.email.clone(),
        input.password.clone(),
        input.confirm_password.clone(),
    );
    let result = ctx
        .with_identity(move |store| IdentityService::register(store, &email, &password, &confirm))
        .await;

    match result {
        Ok(user) => sign_in_redirect(&ctx, &user.id, input.return_url.as_deref()),
        Err(AppError::InvalidInput(message)) => Ok(render_register(
            viewer.email(),
            &input.email,
            input.return_url.as_deref(),
            Some(&message),
        )
        .into_response()),
        Err(err) => Err(err),
    }
}

pub async fn logout(State(ctx): State<SharedContext>, viewer: Viewer) -> AppResult<Response> {
    if let Some(token) = &viewer.session {
        ctx.sessions.end(token)?;
    }
    if let Some(user) = &viewer.user {
        tracing::info!(user_id = %user.id, "user logged out");
    }

    let mut response = found("/");
    response
        .headers_mut()
        .insert(SET_COOKIE, HeaderValue::from_str(&expired_session_cookie()).map_err(header_error)?);
    Ok(response)
}

pub async fn manage(signed_in: SignedIn) -> Html<String> {
    let email = signed_in.user.email.as_str();
    let body = format!(
        r#"<h1>Manage your account</h1>
<h4>Change your account settings</h4>
<dl>
    <dt>Email</dt><dd id="account-email">{}</dd>
</dl>
<p><a id="change-password" href="/Identity/Account/Manage/ChangePassword">Change password</a></p>"#,
        encode_text(email)
    );
    layout::page("Profile", Some(email), &body)
}

pub async fn change_password_form(signed_in: SignedIn) -> Html<String> {
    render_change_password(&signed_in.user.email, None, None)
}

pub async fn change_password(
    State(ctx): State<SharedContext>,
    signed_in: SignedIn,
    Form(input): Form<ChangePasswordInput>,
) -> AppResult<Html<String>> {
    let user_id = signed_in.user.id.clone();
    let result = ctx
        .with_identity(move |store| {
            IdentityService::change_password(
                store,
                &user_id,
                &input.old_password,
                &input.new_password,
                &input.confirm_password,
            )
        })
        .await;

    match result {
        Ok(()) => Ok(render_change_password(
            &signed_in.user.email,
            None,
            Some(PASSWORD_CHANGED),
        )),
        Err(AppError::InvalidInput(message)) => Ok(render_change_password(
            &signed_in.user.email,
            Some(&message),
            None,
        )),
        Err(err) => Err(err),
    }
}

fn sign_in_redirect(
    ctx: &SharedContext,
    user_id: &str,
    return_url: Option<&str>,
) -> AppResult<Response> {
    let token = ctx.sessions.start(user_id)?;
    let target = return_url.filter(|url| is_local_url(url)).unwrap_or("/");

    let mut response = found(target);
    response
        .headers_mut()
        .insert(SET_COOKIE, HeaderValue::from_str(&session_cookie(&token)).map_err(header_error)?);
    Ok(response)
}

fn header_error(err: InvalidHeaderValue) -> AppError {
    AppError::Identity(format!("invalid session cookie header: {err}"))
}

fn return_url_field(return_url: Option<&str>) -> String {
    match return_url.filter(|url| is_local_url(url)) {
        Some(url) => format!(
            r#"<input type="hidden" name="ReturnUrl" value="{}" />"#,
            encode_double_quoted_attribute(url)
        ),
        None => String::new(),
    }
}

fn form_action(path: &str, return_url: Option<&str>) -> String {
    match return_url.filter(|url| is_local_url(url)) {
        Some(target) => {
            let encoded: String =
                url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
            format!("{path}?ReturnUrl={encoded}")
        }
        None => path.to_string(),
    }
}

fn render_login(
    signed_in_as: Option<&str>,
    email: &str,
    return_url: Option<&str>,
    error: Option<&str>,
) -> Html<String> {
    let body = format!(
        r#"<h1>Log in</h1>
<form id="account" method="post" action="/Identity/Account/Login">
    <h4>Use a local account to log in.</h4>
    {summary}
    {email}
    {password}
    {return_url}
    <button id="login-submit" type="submit">Log in</button>
</form>
<p><a href="{register}">Register as a new user</a></p>"#,
        summary = validation_summary(error),
        email = input_field("Email", "Email", "email", email),
        password = input_field("Password", "Password", "password", ""),
        return_url = return_url_field(return_url),
        register = encode_double_quoted_attribute(&form_action(
            "/Identity/Account/Register",
            return_url
        )),
    );
    layout::page("Log in", signed_in_as, &body)
}

fn render_register(
    signed_in_as: Option<&str>,
    email: &str,
    return_url: Option<&str>,
    error: Option<&str>,
) -> Html<String> {
    let body = format!(
        r#"<h1>Register</h1>
<form id="registerForm" method="post" action="/Identity/Account/Register">
    <h4>Create a new account.</h4>
    {summary}
    {email}
    {password}
    {confirm}
    {return_url}
    <button id="registerSubmit" type="submit">Register</button>
</form>"#,
        summary = validation_summary(error),
        email = input_field("Email", "Email", "email", email),
        password = input_field("Password", "Password", "password", ""),
        confirm = input_field("ConfirmPassword", "Confirm password", "password", ""),
        return_url = return_url_field(return_url),
    );
    layout::page("Register", signed_in_as, &body)
}

fn render_change_password(email: &str, error: Option<&str>, status: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<h1>Change password</h1>
{status}
<form id="change-password-form" method="post" action="/Identity/Account/Manage/ChangePassword">
    {summary}
    {old}
    {new}
    {confirm}
    <button type="submit">Update password</button>
</form>"#,
        status = status_message(status),
        summary = validation_summary(error),
        old = input_field("OldPassword", "Current password", "password", ""),
        new = input_field("NewPassword", "New password", "password", ""),
        confirm = input_field("ConfirmPassword", "Confirm new password", "password", ""),
    );
    layout::page("Change password", Some(email), &body)
}
