use clap::Parser;
use tracing_subscriber::EnvFilter;

mod chain;
mod cli;
mod commands;
mod common;
mod contracts;
mod onboarding;
mod primitives;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let opts = cli::Opts::parse();

    opts.command.run().await
}
