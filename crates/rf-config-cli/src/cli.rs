//! Command-line arguments

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "rfconfig", about = "Manage slot game config records", version)]
pub struct Cli {
    /// Directory holding one JSON document per game config
    #[arg(long, default_value = "game-configs")]
    pub store_dir: PathBuf,

    /// Validation settings (TOML); defaults apply when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Validate and store a new game config
    Create {
        /// Request JSON file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },
    /// Replace the fields of an existing game config
    Update {
        /// Record id; read from `id`/`objectId` in the request when omitted
        #[arg(long)]
        id: Option<String>,

        /// Request JSON file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },
    /// Print one game config
    Get {
        id: String,
    },
    /// Print every game config registered under a name
    Find {
        game_name: String,
    },
    /// Validate a request without storing it
    Check {
        /// Request JSON file, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },
    /// Print the effective validation settings as TOML
    ShowConfig,
}

/// Read a request body from a file, or stdin for `-`
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin()
            .read_to_string(&mut body)
            .context("Failed to read request from stdin")?;
        return Ok(body);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request from {}", path.display()))
}
