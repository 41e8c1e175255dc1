//! Composition and publication of the effective settings.
//!
//! Two entry points replace the published snapshot:
//! - [`GameSettings::initialize`] publishes the document's global tier and
//!   the selected gamemode as authored.
//! - [`GameSettings::change_settings`] layers global, mode and level tiers
//!   when a level is entered.
//!
//! A snapshot is built completely before it is swapped in, so readers never
//! see a partial merge and a failed composition leaves the old one in place.

use super::blocks::{TitanCategory, TitanSettings};
use super::document::SettingsDocument;
use super::effective::{EffectiveSettings, SettingsState};
use super::gamemodes::{GamemodeKind, GamemodeSettings};
use crate::error::{SettingsError, SettingsResult, ShapeRegistrationError};
use crate::merge::ShapeRegistry;
use arc_swap::ArcSwapOption;
use std::sync::Arc;
use tracing::{debug, info};

/// Owner of room/session state, told when level settings are in place.
pub trait RoomSettingsListener: Send + Sync {
    fn room_settings_initialized(&self);
}

struct Snapshot {
    state: SettingsState,
    document: Arc<SettingsDocument>,
    settings: Arc<EffectiveSettings>,
}

/// Settings context shared by everything that reads game settings.
pub struct GameSettings {
    registry: Arc<ShapeRegistry>,
    published: ArcSwapOption<Snapshot>,
    listener: Option<Arc<dyn RoomSettingsListener>>,
}

impl GameSettings {
    pub fn new(registry: Arc<ShapeRegistry>) -> Self {
        Self {
            registry,
            published: ArcSwapOption::empty(),
            listener: None,
        }
    }

    /// A context using every built-in shape.
    pub fn with_standard_shapes() -> Result<Self, ShapeRegistrationError> {
        Ok(Self::new(Arc::new(ShapeRegistry::standard()?)))
    }

    pub fn with_listener(mut self, listener: Arc<dyn RoomSettingsListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn state(&self) -> SettingsState {
        self.published
            .load_full()
            .map_or(SettingsState::Unloaded, |snapshot| snapshot.state)
    }

    /// The currently published settings.
    pub fn current(&self) -> Option<Arc<EffectiveSettings>> {
        self.published
            .load_full()
            .map(|snapshot| Arc::clone(&snapshot.settings))
    }

    /// The document the current settings were composed from.
    pub fn document(&self) -> Option<Arc<SettingsDocument>> {
        self.published
            .load_full()
            .map(|snapshot| Arc::clone(&snapshot.document))
    }

    /// Publish `document`'s global tier with its `kind` gamemode.
    ///
    /// Resets the state to [`SettingsState::Loaded`].
    pub fn initialize(
        &self,
        document: Arc<SettingsDocument>,
        kind: GamemodeKind,
    ) -> SettingsResult<Arc<EffectiveSettings>> {
        let gamemode = document.gamemode(kind)?.clone();
        let settings = Arc::new(EffectiveSettings {
            pvp: document.pvp.clone(),
            titan: document.titan.clone(),
            horse: document.horse.clone(),
            respawn: document.respawn.clone(),
            gamemode,
        });

        self.publish(SettingsState::Loaded, document, Arc::clone(&settings));
        info!(gamemode = %kind, "Game settings loaded");
        Ok(settings)
    }

    /// Parse a JSON document and [`initialize`](Self::initialize) from it.
    pub fn initialize_json(
        &self,
        json: &str,
        kind: GamemodeKind,
    ) -> SettingsResult<Arc<EffectiveSettings>> {
        let document = SettingsDocument::from_json(json)?;
        self.initialize(Arc::new(document), kind)
    }

    /// Layer the level's overrides on top of the loaded document and publish.
    ///
    /// The mode tier is the document's entry for the level's gamemode kind.
    pub fn change_settings(
        &self,
        level: &GamemodeSettings,
    ) -> SettingsResult<Arc<EffectiveSettings>> {
        let document = self.document().ok_or(SettingsError::NotLoaded)?;
        let mode = document.gamemode(level.kind())?;
        let settings = Arc::new(self.compose(&document, mode, level)?);

        self.publish(SettingsState::Active, document, Arc::clone(&settings));
        info!(gamemode = %level.kind(), "Level settings applied");

        if let Some(listener) = &self.listener {
            listener.room_settings_initialized();
        }
        Ok(settings)
    }

    fn compose(
        &self,
        document: &SettingsDocument,
        mode: &GamemodeSettings,
        level: &GamemodeSettings,
    ) -> Result<EffectiveSettings, ShapeRegistrationError> {
        let registry = &*self.registry;
        let mode_tier = mode.common();
        let level_tier = level.common();

        // The document's entry is both the global and the mode tier of the
        // variant, so it is layered once.
        let gamemode =
            GamemodeSettings::create_from(registry, level.kind(), &[Some(mode), Some(level)])?;

        let pvp = registry.create_from(&[
            Some(&document.pvp),
            mode_tier.pvp.as_ref(),
            level_tier.pvp.as_ref(),
        ])?;
        let horse = registry.create_from(&[
            Some(&document.horse),
            mode_tier.horse.as_ref(),
            level_tier.horse.as_ref(),
        ])?;
        let respawn = registry.create_from(&[
            Some(&document.respawn),
            mode_tier.respawn.as_ref(),
            level_tier.respawn.as_ref(),
        ])?;
        let titan = compose_titan(
            registry,
            &document.titan,
            mode_tier.titan.as_ref(),
            level_tier.titan.as_ref(),
        )?;

        debug!(gamemode = %level.kind(), "Composed settings from global, mode and level tiers");
        Ok(EffectiveSettings {
            pvp,
            titan,
            horse,
            respawn,
            gamemode,
        })
    }

    fn publish(
        &self,
        state: SettingsState,
        document: Arc<SettingsDocument>,
        settings: Arc<EffectiveSettings>,
    ) {
        self.published.store(Some(Arc::new(Snapshot {
            state,
            document,
            settings,
        })));
    }
}

impl std::fmt::Debug for GameSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSettings")
            .field("registry", &self.registry)
            .field("state", &self.state())
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

/// Titan scalars layer like any other block; each category is then layered
/// on its own across the same three tiers.
fn compose_titan(
    registry: &ShapeRegistry,
    global: &TitanSettings,
    mode: Option<&TitanSettings>,
    level: Option<&TitanSettings>,
) -> Result<TitanSettings, ShapeRegistrationError> {
    let mut titan = registry.create_from(&[Some(global), mode, level])?;
    for category in TitanCategory::ALL {
        *titan.category_mut(category) = registry.create_from(&[
            Some(global.category(category)),
            mode.map(|t| t.category(category)),
            level.map(|t| t.category(category)),
        ])?;
    }
    Ok(titan)
}
