//! CLI command definitions for game-settings
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod show;

use clap::{Parser, Subcommand};
use show::ShowArgs;
use std::path::PathBuf;

/// Compose and inspect layered game settings
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the settings document (default: $GAME_SETTINGS_PATH or settings/GameSettings.json)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective settings for a gamemode, optionally entering a level
    Show(ShowArgs),

    /// List the gamemodes defined in the settings document
    Gamemodes,
}
