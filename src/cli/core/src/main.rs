/* src/cli/core/src/main.rs */

mod check;
mod config;
mod serve;
mod site;
mod ui;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::{find_site_config, load_site_config};

#[derive(Parser)]
#[command(name = "folio", version, about = "Serve a portfolio site and check its content")]
struct Cli {
  /// Path to folio.toml (default: search upward from the current directory)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Run the HTTP server
  Serve {
    /// Interface to bind (overrides server.host)
    #[arg(long)]
    host: Option<String>,
    /// Port to bind (overrides server.port and PORT)
    #[arg(long)]
    port: Option<u16>,
  },
  /// Parse every post and project and report problems
  Check,
}

fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing();

  let config_path = match cli.config {
    Some(path) => path,
    None => find_site_config(&std::env::current_dir()?)?,
  };
  let loaded = load_site_config(&config_path)?;

  match cli.command {
    Command::Serve { host, port } => serve::run_serve(&loaded, host.as_deref(), port).await,
    Command::Check => check::run_check(&loaded).await,
  }
}
