//! Shared settings blocks: PvP, titans, horses and respawning.
//!
//! Every field defaults to its sentinel, so a block deserialized from a
//! partial document only carries the values its author wrote.

use crate::merge::{FieldTableBuilder, Shape};
use serde::{Deserialize, Serialize};

/// PvP rule set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PvpMode {
    #[default]
    Disabled,
    AhssVsBlades,
    FreeForAll,
    Teams,
}

/// How titan health is assigned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitanHealthMode {
    #[default]
    Disabled,
    Fixed,
    Scaled,
}

/// When dead players come back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RespawnMode {
    #[default]
    Deathmatch,
    NewRound,
    Never,
}

crate::default_sentinel!(PvpMode, TitanHealthMode, RespawnMode);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PvpSettings {
    pub mode: PvpMode,
    pub friendly_fire: bool,
    pub bomb: bool,
    pub cannons: bool,
}

impl Shape for PvpSettings {
    const NAME: &'static str = "PvP";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        fields
            .scalar("mode", |s| &s.mode, |s| &mut s.mode)
            .scalar("friendly_fire", |s| &s.friendly_fire, |s| &mut s.friendly_fire)
            .scalar("bomb", |s| &s.bomb, |s| &mut s.bomb)
            .scalar("cannons", |s| &s.cannons, |s| &mut s.cannons)
    }
}

/// Tunables for one titan category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TitanCategorySettings {
    /// Relative spawn chance.
    pub chance: f32,
    pub health: i32,
    pub speed: f32,
    pub attack_cooldown: f32,
}

impl Shape for TitanCategorySettings {
    const NAME: &'static str = "TitanCategory";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        fields
            .scalar("chance", |s| &s.chance, |s| &mut s.chance)
            .scalar("health", |s| &s.health, |s| &mut s.health)
            .scalar("speed", |s| &s.speed, |s| &mut s.speed)
            .scalar("attack_cooldown", |s| &s.attack_cooldown, |s| &mut s.attack_cooldown)
    }
}

/// The four titan categories nested in [`TitanSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitanCategory {
    Mindless,
    Colossal,
    Female,
    /// The origin titan.
    Eren,
}

impl TitanCategory {
    pub const ALL: [TitanCategory; 4] = [
        TitanCategory::Mindless,
        TitanCategory::Colossal,
        TitanCategory::Female,
        TitanCategory::Eren,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TitanCategory::Mindless => "mindless",
            TitanCategory::Colossal => "colossal",
            TitanCategory::Female => "female",
            TitanCategory::Eren => "eren",
        }
    }
}

impl std::fmt::Display for TitanCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TitanSettings {
    /// Titans spawned when the round starts.
    pub start: i32,
    /// Maximum titans alive at once.
    pub limit: i32,
    pub size_enabled: bool,
    pub size_minimum: f32,
    pub size_maximum: f32,
    pub health_mode: TitanHealthMode,
    pub health_minimum: i32,
    pub health_maximum: i32,

    // Categories are always present; a missing one deserializes as a blank block.
    pub mindless: TitanCategorySettings,
    pub colossal: TitanCategorySettings,
    pub female: TitanCategorySettings,
    pub eren: TitanCategorySettings,
}

impl TitanSettings {
    pub fn category(&self, category: TitanCategory) -> &TitanCategorySettings {
        match category {
            TitanCategory::Mindless => &self.mindless,
            TitanCategory::Colossal => &self.colossal,
            TitanCategory::Female => &self.female,
            TitanCategory::Eren => &self.eren,
        }
    }

    pub fn category_mut(&mut self, category: TitanCategory) -> &mut TitanCategorySettings {
        match category {
            TitanCategory::Mindless => &mut self.mindless,
            TitanCategory::Colossal => &mut self.colossal,
            TitanCategory::Female => &mut self.female,
            TitanCategory::Eren => &mut self.eren,
        }
    }
}

impl Shape for TitanSettings {
    const NAME: &'static str = "Titan";

    /// Categories are merged per tier by the composer, not by this table.
    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        fields
            .scalar("start", |s| &s.start, |s| &mut s.start)
            .scalar("limit", |s| &s.limit, |s| &mut s.limit)
            .scalar("size_enabled", |s| &s.size_enabled, |s| &mut s.size_enabled)
            .scalar("size_minimum", |s| &s.size_minimum, |s| &mut s.size_minimum)
            .scalar("size_maximum", |s| &s.size_maximum, |s| &mut s.size_maximum)
            .scalar("health_mode", |s| &s.health_mode, |s| &mut s.health_mode)
            .scalar("health_minimum", |s| &s.health_minimum, |s| &mut s.health_minimum)
            .scalar("health_maximum", |s| &s.health_maximum, |s| &mut s.health_maximum)
            .exclude("mindless")
            .exclude("colossal")
            .exclude("female")
            .exclude("eren")
    }
}

/// Mount rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct HorseSettings {
    pub enabled: bool,
    pub speed: f32,
    pub acceleration: f32,
}

impl Shape for HorseSettings {
    const NAME: &'static str = "Horse";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        fields
            .scalar("enabled", |s| &s.enabled, |s| &mut s.enabled)
            .scalar("speed", |s| &s.speed, |s| &mut s.speed)
            .scalar("acceleration", |s| &s.acceleration, |s| &mut s.acceleration)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RespawnSettings {
    pub mode: RespawnMode,
    pub delay_seconds: i32,
    pub spawn_protection_seconds: f32,
}

impl Shape for RespawnSettings {
    const NAME: &'static str = "Respawn";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        fields
            .scalar("mode", |s| &s.mode, |s| &mut s.mode)
            .scalar("delay_seconds", |s| &s.delay_seconds, |s| &mut s.delay_seconds)
            .scalar(
                "spawn_protection_seconds",
                |s| &s.spawn_protection_seconds,
                |s| &mut s.spawn_protection_seconds,
            )
    }
}
