//! DOCloud CLI - DigitalOcean account information in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docloud_core::services::{init_logging, LogFormat};

mod commands;
mod output;

use commands::{account, module};

/// DOCloud - DigitalOcean account information in your terminal
#[derive(Parser)]
#[command(name = "docloud", version, about, long_about = None)]
struct Cli {
    /// Log filter when DOCLOUD_LOG is unset (e.g. "info", "debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log format: pretty or json
    #[arg(long, global = true, default_value = "pretty")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show information about the current account
    Account {
        /// API token (falls back to DIGITALOCEAN_ACCESS_TOKEN and friends)
        #[arg(long)]
        token: Option<String>,
        /// API base URL
        #[arg(long)]
        base_url: Option<String>,
        /// Request timeout in seconds
        #[arg(long, default_value_t = docloud_core::config::DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
        /// Retries for rate limits and server errors
        #[arg(long, default_value_t = 0)]
        retries: u32,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the account_info Ansible module against an arguments file
    Module {
        /// Path to the JSON arguments file
        args_file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_level, cli.log_format) {
        eprintln!("{}", e);
    }

    match run(cli.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the command succeeded
fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Account {
            token,
            base_url,
            timeout,
            retries,
            json,
        } => account::run(token, base_url, timeout, retries, json),
        Commands::Module { args_file } => module::run(&args_file),
    }
}
