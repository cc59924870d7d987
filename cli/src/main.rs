#![deny(missing_docs)]

//! # Routedoc CLI
//!
//! Command Line Interface for turning router metadata into Swagger 2.0.
//!
//! Supported Commands:
//! - `generate`: Routes file -> Swagger document (JSON or YAML).
//! - `serve`: Serves the document over HTTP (feature `server`).

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::CliResult;

mod error;
mod generate;
#[cfg(feature = "server")]
mod serve;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Router metadata -> Swagger 2.0")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates the Swagger document from a routes file.
    Generate(generate::GenerateArgs),
    /// Serves the Swagger document over HTTP.
    #[cfg(feature = "server")]
    Serve(serve::ServeArgs),
}

/// Logs go to stderr so `generate` can pipe the document through stdout.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "routedoc=info,routedoc_core=info".into()),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing();

    match &cli.command {
        Commands::Generate(args) => {
            generate::execute(args)?;
        }
        #[cfg(feature = "server")]
        Commands::Serve(args) => {
            actix_rt::System::new().block_on(serve::execute(args))?;
        }
    }

    Ok(())
}
