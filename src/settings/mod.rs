//! Game settings composed from three tiers.
//!
//! 1. **Global** - the document's top-level `PvP`, `Titan`, `Horse` and `Respawn` blocks
//! 2. **Mode** - the document's entry for the active gamemode, including its own blocks
//! 3. **Level** - overrides authored for the level being entered
//!
//! Each block is layered field by field with [`crate::merge`]; the four titan
//! categories are layered on their own rather than through the titan block.

mod blocks;
mod document;
mod effective;
mod game;
mod gamemodes;
mod loader;

pub use blocks::{
    HorseSettings, PvpMode, PvpSettings, RespawnMode, RespawnSettings, TitanCategory,
    TitanCategorySettings, TitanHealthMode, TitanSettings,
};
pub use document::SettingsDocument;
pub use effective::{EffectiveSettings, SettingsState};
pub use game::{GameSettings, RoomSettingsListener};
pub use gamemodes::{
    CaptureSettings, EndlessSettings, GamemodeCommon, GamemodeKind, GamemodeSettings,
    GamemodeVariant, InfectionSettings, KillTitansSettings, PvpAhssSettings, RacingSettings,
    RushSettings, TrostSettings, WaveSettings, register_gamemodes,
};
pub use loader::{DEFAULT_SETTINGS_PATH, DocumentFormat, DocumentLoader, SETTINGS_PATH_ENV};

use crate::error::ShapeRegistrationError;
use crate::merge::ShapeRegistry;

impl ShapeRegistry {
    /// A registry holding every built-in settings shape.
    pub fn standard() -> Result<Self, ShapeRegistrationError> {
        let mut registry = ShapeRegistry::new();
        registry
            .register::<PvpSettings>()?
            .register::<TitanSettings>()?
            .register::<TitanCategorySettings>()?
            .register::<HorseSettings>()?
            .register::<RespawnSettings>()?;
        register_gamemodes(&mut registry)?;
        Ok(registry)
    }
}
