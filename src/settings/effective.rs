//! The composed settings readers consume.

use super::blocks::{HorseSettings, PvpSettings, RespawnSettings, TitanSettings};
use super::gamemodes::{GamemodeKind, GamemodeSettings, GamemodeVariant};
use serde::Serialize;

/// Lifecycle of the published settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsState {
    /// Nothing published yet.
    Unloaded,
    /// Global tier published by an initial load.
    Loaded,
    /// Global, mode and level tiers merged on level enter.
    Active,
}

impl std::fmt::Display for SettingsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsState::Unloaded => write!(f, "unloaded"),
            SettingsState::Loaded => write!(f, "loaded"),
            SettingsState::Active => write!(f, "active"),
        }
    }
}

/// One complete, immutable set of effective settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct EffectiveSettings {
    #[serde(rename = "PvP")]
    pub pvp: PvpSettings,
    pub titan: TitanSettings,
    pub horse: HorseSettings,
    pub respawn: RespawnSettings,
    pub gamemode: GamemodeSettings,
}

impl EffectiveSettings {
    pub fn gamemode_kind(&self) -> GamemodeKind {
        self.gamemode.kind()
    }

    /// The active gamemode as a concrete variant, if it is a `T`.
    pub fn gamemode_as<T: GamemodeVariant>(&self) -> Option<&T> {
        self.gamemode.as_variant::<T>()
    }
}
