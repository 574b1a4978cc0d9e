use tokio::net::TcpListener;

use crate::cli::ServeArgs;
use crate::context::AppContext;
use crate::error::{AppError, AppResult};
use crate::server;

pub async fn run(ctx: AppContext, args: ServeArgs) -> AppResult<()> {
    let addr = match args.bind {
        Some(addr) => addr,
        None => ctx.settings.bind_address()?,
    };

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::Config(format!("failed to bind {addr}: {err}")))?;
    tracing::info!(
        address = %listener.local_addr()?,
        profile = %ctx.profile,
        github_api = ctx.settings.github_api_base_url(),
        "listening"
    );

    server::serve(listener, ctx.shared()).await
}
