use std::net::SocketAddr;

use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "ghprofile",
    version,
    about = "GitHub profile lookup web application"
)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        default_value = "default",
        help = "Profile name to use"
    )]
    pub profile: String,
    #[arg(long, global = true, help = "Emit JSON output")]
    pub json: bool,
    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Verbose logging")]
    pub verbose: u8,
    #[arg(
        long,
        global = true,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "GitHub API token"
    )]
    pub github_token: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Serve(ServeArgs),
    Lookup(LookupArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, help = "Address to listen on, overrides bind_address")]
    pub bind: Option<SocketAddr>,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    #[arg(help = "GitHub username")]
    pub username: String,
}
