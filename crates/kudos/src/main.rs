// SPDX-FileCopyrightText: 2026 Kudos Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kudos - a GroupMe bot with a points ledger and a rotating picture catalog.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kudos_config::{ConfigError, KudosConfig};

/// Kudos - a GroupMe bot with a points ledger and a rotating picture catalog.
#[derive(Parser, Debug)]
#[command(name = "kudos", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Run the webhook listener and bot loop (the default).
    Serve,
    /// Validate configuration and print the effective settings.
    CheckConfig,
}

fn load(path: Option<&std::path::Path>) -> Result<KudosConfig, Vec<ConfigError>> {
    match path {
        Some(path) => kudos_config::load_and_validate_path(path),
        None => kudos_config::load_and_validate(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            kudos_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::CheckConfig => {
            println!("kudos: config ok (bot.name={})", config.bot.name);
            println!("  listen:   {}:{}", config.server.host, config.server.port);
            println!("  database: {}", config.storage.database_path);
            println!(
                "  groupme:  bot_id {}, roster {}",
                if config.groupme.bot_id.is_some() { "set" } else { "missing" },
                if config.groupme.group_id.is_some() && config.groupme.access_token.is_some() {
                    "enabled"
                } else {
                    "disabled"
                },
            );
        }
    }
}
