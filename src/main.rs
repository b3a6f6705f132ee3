mod cli;
mod corpus;
mod dictionary;
mod source;
mod variants;

use clap::Parser;
use cli::Cli;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gramble=info".parse()?),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "starting gramble");

    cli::run(Cli::parse())
        .inspect_err(|e| tracing::error!("{}", cli::render(e)))?;
    Ok(())
}
