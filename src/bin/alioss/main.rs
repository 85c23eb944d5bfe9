// alioss - command line front end for the Aliyun OSS client

mod cli;
mod commands;
mod format;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use alioss::Client;
use cli::{Cli, Commands};
use commands::{execute_gen, execute_ls, execute_put, execute_rm, execute_sign};

/// Get default config path (~/.alioss/config.yaml)
fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Failed to get home directory")?;
    Ok(home.join(".alioss").join("config.yaml"))
}

/// Build a client from the config file
fn load_client(config: Option<&str>) -> Result<Client> {
    let path = match config {
        Some(path) => PathBuf::from(shellexpand::tilde(path).to_string()),
        None => default_config_path()?,
    };

    if !path.exists() {
        return Err(anyhow::anyhow!(
            "Config file not found: {}. Please create it first.",
            path.display()
        ));
    }

    Client::from_file(&path)
        .with_context(|| format!("Failed to create client from {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // gen does not touch the network, no config needed
    if let Commands::Gen(args) = &cli.command {
        return execute_gen(args);
    }

    let client = load_client(cli.config.as_deref())?;

    match &cli.command {
        Commands::Gen(_) => unreachable!("handled above"),
        Commands::Put(args) => execute_put(args, &client).await?,
        Commands::Sign(args) => execute_sign(args, &client).await?,
        Commands::Ls(args) => execute_ls(args, &client).await?,
        Commands::Rm(args) => execute_rm(args, &client).await?,
    }

    Ok(())
}
