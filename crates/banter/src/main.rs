// SPDX-FileCopyrightText: 2026 Banter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Banter - a Discord bot relaying messages to a Botpress NLU service.
//!
//! This is the binary entry point for the banter relay.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use clap::{Parser, Subcommand};

/// Banter - a Discord bot relaying messages to a Botpress NLU service.
#[derive(Parser, Debug)]
#[command(name = "banter", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to Discord and start relaying messages.
    Serve,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match banter_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            banter_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("banter serve failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            let mut printable = config;
            if printable.botpress.password.is_some() {
                printable.botpress.password = Some("<redacted>".to_string());
            }
            if printable.discord.bot_token.is_some() {
                printable.discord.bot_token = Some("<redacted>".to_string());
            }
            match toml::to_string_pretty(&printable) {
                Ok(rendered) => print!("{rendered}"),
                Err(e) => {
                    eprintln!("failed to render config: {e}");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("banter: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config =
            banter_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.agent.name, "banter");
    }
}
