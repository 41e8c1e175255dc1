//! Game Settings CLI
//!
//! Loads a layered settings document, composes the effective settings for a
//! gamemode (and optionally a level) and prints them.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use game_settings::cli::show::ShowArgs;
use game_settings::cli::{Cli, Command};
use game_settings::format::{OutputFormat, format_settings};
use game_settings::logging::{LogTarget, init_logging};
use game_settings::settings::{DocumentLoader, GameSettings, SettingsDocument};
use std::sync::Arc;
use tracing::{info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogTarget::parse(&cli.log), cli.verbose)?;

    let loader = DocumentLoader::resolve(cli.config.clone());
    let document = loader
        .load()
        .with_context(|| format!("loading {}", loader.path().display()))?;
    info!(path = %loader.path().display(), "Settings document loaded");

    match cli.command {
        Command::Show(args) => show(document, args),
        Command::Gamemodes => {
            for kind in document.kinds() {
                println!("{}", kind);
            }
            Ok(())
        }
    }
}

fn show(document: SettingsDocument, args: ShowArgs) -> Result<()> {
    let format = OutputFormat::from_str(&args.format)
        .ok_or_else(|| anyhow!("unknown output format: {}", args.format))?;

    let settings = GameSettings::with_standard_shapes()?;
    let mut effective = settings.initialize(Arc::new(document), args.gamemode)?;

    if let Some(level_path) = &args.level {
        let level = DocumentLoader::load_level(level_path)
            .with_context(|| format!("loading level {}", level_path.display()))?;
        if level.kind() != args.gamemode {
            warn!(
                requested = %args.gamemode,
                level = %level.kind(),
                "Level gamemode differs from requested gamemode"
            );
        }
        effective = settings.change_settings(&level)?;
    }

    println!("{}", format_settings(&effective, format)?);
    Ok(())
}
