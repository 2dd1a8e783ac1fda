//! contactd CLI - contact form backend
//!
//! Entry point for running the contactd HTTP server (`serve` subcommand).

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod env;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "contactd",
    author,
    version,
    about = "Contact form backend: validates submissions and stores them",
    long_about = "Serve POST/GET /api/contact backed by Postgres (or an in-memory store), \
                  either as a long-running server or with per-request connection setup."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv_path = env::load_dotenv();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;
    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "loaded environment file");
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
    };

    if let Err(err) = result {
        // Unrecoverable startup condition (e.g. always-on mode without a datastore)
        tracing::error!("contactd failed: {:#}", err);
        std::process::exit(1);
    }

    Ok(())
}
