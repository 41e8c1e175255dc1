//! Output formatting for effective settings.

use crate::error::SettingsResult;
use crate::settings::{EffectiveSettings, TitanCategory};
use serde::Serialize;

/// Output format for printed settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// Serialize any value as pretty JSON or YAML.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> SettingsResult<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        OutputFormat::Json | OutputFormat::Markdown => Ok(serde_json::to_string_pretty(value)?),
    }
}

/// Render effective settings in the requested format.
pub fn format_settings(settings: &EffectiveSettings, format: OutputFormat) -> SettingsResult<String> {
    match format {
        OutputFormat::Markdown => Ok(format_settings_markdown(settings)),
        other => render(settings, other),
    }
}

/// Short human-readable summary of the effective settings.
pub fn format_settings_markdown(settings: &EffectiveSettings) -> String {
    let mut md = String::new();
    let common = settings.gamemode.common();

    md.push_str(&format!("## Gamemode: {}\n", settings.gamemode_kind()));
    if !common.description.is_empty() {
        md.push_str(&format!("{}\n", common.description));
    }
    if common.time_limit != 0 {
        md.push_str(&format!("- **time limit**: {}s\n", common.time_limit));
    }

    md.push_str("\n### PvP\n");
    md.push_str(&format!("- **mode**: {:?}\n", settings.pvp.mode));
    md.push_str(&format!("- **friendly fire**: {}\n", settings.pvp.friendly_fire));

    md.push_str("\n### Titans\n");
    md.push_str(&format!(
        "- **start/limit**: {}/{}\n",
        settings.titan.start, settings.titan.limit
    ));
    for category in TitanCategory::ALL {
        let block = settings.titan.category(category);
        md.push_str(&format!(
            "- **{}**: chance {}, health {}, speed {}\n",
            category, block.chance, block.health, block.speed
        ));
    }

    md.push_str("\n### Horse\n");
    md.push_str(&format!("- **enabled**: {}\n", settings.horse.enabled));

    md.push_str("\n### Respawn\n");
    md.push_str(&format!("- **mode**: {:?}\n", settings.respawn.mode));
    md.push_str(&format!("- **delay**: {}s\n", settings.respawn.delay_seconds));

    md
}
