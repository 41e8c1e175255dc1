//! Show subcommand for game-settings CLI
//!
//! Loads the settings document, selects a gamemode and, when a level file is
//! given, layers the level's overrides before printing the result.

use crate::settings::GamemodeKind;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the show subcommand
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Gamemode to load (e.g. titans, endless, titan-rush)
    #[arg(short, long, value_name = "KIND")]
    pub gamemode: GamemodeKind,

    /// Level override file (JSON or YAML) holding a single gamemode entry
    ///
    /// Its gamemode type decides which document entry forms the mode tier.
    #[arg(long, value_name = "FILE")]
    pub level: Option<PathBuf>,

    /// Output format: json, yaml or markdown
    #[arg(short, long, default_value = "json")]
    pub format: String,
}
