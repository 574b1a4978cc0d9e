use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = ghprofile::cli::Cli::parse();

    if let Err(err) = ghprofile::run(cli).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
