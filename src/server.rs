use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use tokio::net::TcpListener;

use crate::context::SharedContext;
use crate::error::AppResult;
use crate::pages::{account, error, github_profile, home};

pub fn router(ctx: SharedContext) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/Index", get(home::index))
        .route("/About", get(home::about))
        .route("/Contact", get(home::contact))
        .route("/Privacy", get(home::privacy))
        .route(
            "/GithubProfile",
            get(github_profile::show).post(github_profile::submit),
        )
        .route(
            "/Identity/Account/Login",
            get(account::login_form).post(account::login),
        )
        .route(
            "/Identity/Account/Register",
            get(account::register_form).post(account::register),
        )
        .route("/Identity/Account/Logout", post(account::logout))
        .route("/Identity/Account/Manage", get(account::manage))
        .route(
            "/Identity/Account/Manage/ChangePassword",
            get(account::change_password_form).post(account::change_password),
        )
        .fallback(error::not_found)
        .layer(middleware::from_fn(log_request))
        .with_state(ctx)
}

pub async fn serve(listener: TcpListener, ctx: SharedContext) -> AppResult<()> {
    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    tracing::info!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "handled request"
    );
    response
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
