use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "chatterm", about = "Terminal chat client")]
pub struct Cli {
    /// Path to config file (default: ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Open the chat view
    Run {
        /// Chat server URL, overrides `server.url`
        #[arg(long)]
        server: Option<String>,

        /// Use the in-process loopback transport instead of a server
        #[arg(long, conflicts_with = "server")]
        offline: bool,
    },
    /// Store the display name used on the next start
    SetName { name: String },
}

impl Cli {
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run {
            server: None,
            offline: false,
        })
    }
}
