use crate::cli::{Cli, Command};
use crate::commands;
use crate::context::AppContext;
use crate::error::AppResult;
use crate::logging;

pub async fn run(cli: Cli) -> AppResult<()> {
    let Cli {
        profile,
        json,
        verbose,
        github_token,
        command,
    } = cli;

    logging::init(verbose)?;
    let ctx = AppContext::bootstrap(profile, json, github_token)?;

    match command {
        Command::Serve(args) => commands::serve::run(ctx, args).await,
        Command::Lookup(args) => commands::lookup::run(&ctx, args).await,
    }
}
