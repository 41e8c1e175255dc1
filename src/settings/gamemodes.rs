//! Gamemode variants and their discriminator.
//!
//! Each gamemode has its own settings shape. All of them share
//! [`GamemodeCommon`], which also carries the mode tier of the shared blocks
//! (`PvP`, `Titan`, `Horse`, `Respawn`). [`GamemodeSettings`] is the tagged
//! union serialized with a `GamemodeType` key.

use super::blocks::{HorseSettings, PvpSettings, RespawnSettings, TitanSettings};
use crate::error::ShapeRegistrationError;
use crate::merge::{Discriminated, FieldTableBuilder, Shape, ShapeRegistry};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Discriminator of the closed gamemode set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamemodeKind {
    Titans,
    Endless,
    Capture,
    Wave,
    Racing,
    Trost,
    TitanRush,
    PvpAhss,
    Infection,
}

impl GamemodeKind {
    pub const ALL: [GamemodeKind; 9] = [
        GamemodeKind::Titans,
        GamemodeKind::Endless,
        GamemodeKind::Capture,
        GamemodeKind::Wave,
        GamemodeKind::Racing,
        GamemodeKind::Trost,
        GamemodeKind::TitanRush,
        GamemodeKind::PvpAhss,
        GamemodeKind::Infection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GamemodeKind::Titans => "Titans",
            GamemodeKind::Endless => "Endless",
            GamemodeKind::Capture => "Capture",
            GamemodeKind::Wave => "Wave",
            GamemodeKind::Racing => "Racing",
            GamemodeKind::Trost => "Trost",
            GamemodeKind::TitanRush => "TitanRush",
            GamemodeKind::PvpAhss => "PvpAhss",
            GamemodeKind::Infection => "Infection",
        }
    }
}

impl std::fmt::Display for GamemodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GamemodeKind {
    type Err = String;

    /// Case-insensitive; dashes and underscores are ignored (`titan-rush`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        GamemodeKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown gamemode: {}", s))
    }
}

/// Fields every gamemode carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GamemodeCommon {
    pub description: String,
    /// Round time limit in seconds.
    pub time_limit: i32,
    pub lava_mode: bool,
    pub restart_on_titans_killed: bool,

    #[serde(rename = "PvP")]
    pub pvp: Option<PvpSettings>,
    pub titan: Option<TitanSettings>,
    pub horse: Option<HorseSettings>,
    pub respawn: Option<RespawnSettings>,
}

impl GamemodeCommon {
    /// Append the shared fields to a variant's table.
    pub fn describe_into<S: GamemodeVariant>(fields: FieldTableBuilder<S>) -> FieldTableBuilder<S> {
        fields
            .scalar(
                "description",
                |s| &s.common().description,
                |s| &mut s.common_mut().description,
            )
            .scalar(
                "time_limit",
                |s| &s.common().time_limit,
                |s| &mut s.common_mut().time_limit,
            )
            .scalar(
                "lava_mode",
                |s| &s.common().lava_mode,
                |s| &mut s.common_mut().lava_mode,
            )
            .scalar(
                "restart_on_titans_killed",
                |s| &s.common().restart_on_titans_killed,
                |s| &mut s.common_mut().restart_on_titans_killed,
            )
            .nested("pvp", |s| &s.common().pvp, |s| &mut s.common_mut().pvp)
            .nested("titan", |s| &s.common().titan, |s| &mut s.common_mut().titan)
            .nested("horse", |s| &s.common().horse, |s| &mut s.common_mut().horse)
            .nested("respawn", |s| &s.common().respawn, |s| &mut s.common_mut().respawn)
    }
}

/// A concrete gamemode settings shape.
pub trait GamemodeVariant: Shape {
    const KIND: GamemodeKind;

    fn common(&self) -> &GamemodeCommon;
    fn common_mut(&mut self) -> &mut GamemodeCommon;

    /// Borrow the variant out of the union when the kinds match.
    fn from_settings(settings: &GamemodeSettings) -> Option<&Self>;
    fn into_settings(self) -> GamemodeSettings;
}

macro_rules! gamemode_variant {
    ($ty:ty => $kind:ident) => {
        impl GamemodeVariant for $ty {
            const KIND: GamemodeKind = GamemodeKind::$kind;

            fn common(&self) -> &GamemodeCommon {
                &self.common
            }

            fn common_mut(&mut self) -> &mut GamemodeCommon {
                &mut self.common
            }

            fn from_settings(settings: &GamemodeSettings) -> Option<&Self> {
                match settings {
                    GamemodeSettings::$kind(variant) => Some(variant),
                    _ => None,
                }
            }

            fn into_settings(self) -> GamemodeSettings {
                GamemodeSettings::$kind(self)
            }
        }
    };
}

/// Kill every titan on the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct KillTitansSettings {
    #[serde(flatten)]
    pub common: GamemodeCommon,
    pub kill_target: i32,
}

impl Shape for KillTitansSettings {
    const NAME: &'static str = "KillTitans";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        GamemodeCommon::describe_into(fields).scalar(
            "kill_target",
            |s| &s.kill_target,
            |s| &mut s.kill_target,
        )
    }
}

gamemode_variant!(KillTitansSettings => Titans);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct EndlessSettings {
    #[serde(flatten)]
    pub common: GamemodeCommon,
    pub point_limit: i32,
}

impl Shape for EndlessSettings {
    const NAME: &'static str = "Endless";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        GamemodeCommon::describe_into(fields).scalar(
            "point_limit",
            |s| &s.point_limit,
            |s| &mut s.point_limit,
        )
    }
}

gamemode_variant!(EndlessSettings => Endless);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CaptureSettings {
    #[serde(flatten)]
    pub common: GamemodeCommon,
    pub point_limit: i32,
    /// Capture progress per second while standing on a point.
    pub capture_speed: f32,
}

impl Shape for CaptureSettings {
    const NAME: &'static str = "Capture";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        GamemodeCommon::describe_into(fields)
            .scalar("point_limit", |s| &s.point_limit, |s| &mut s.point_limit)
            .scalar("capture_speed", |s| &s.capture_speed, |s| &mut s.capture_speed)
    }
}

gamemode_variant!(CaptureSettings => Capture);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct WaveSettings {
    #[serde(flatten)]
    pub common: GamemodeCommon,
    pub wave_start: i32,
    pub wave_increment: i32,
    pub wave_max: i32,
    /// Every n-th wave spawns a boss; zero disables boss waves.
    pub boss_wave: i32,
}

impl Shape for WaveSettings {
    const NAME: &'static str = "Wave";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        GamemodeCommon::describe_into(fields)
            .scalar("wave_start", |s| &s.wave_start, |s| &mut s.wave_start)
            .scalar("wave_increment", |s| &s.wave_increment, |s| &mut s.wave_increment)
            .scalar("wave_max", |s| &s.wave_max, |s| &mut s.wave_max)
            .scalar("boss_wave", |s| &s.boss_wave, |s| &mut s.boss_wave)
    }
}

gamemode_variant!(WaveSettings => Wave);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RacingSettings {
    #[serde(flatten)]
    pub common: GamemodeCommon,
    pub end_immediately: bool,
    pub restart_on_finish: bool,
}

impl Shape for RacingSettings {
    const NAME: &'static str = "Racing";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        GamemodeCommon::describe_into(fields)
            .scalar("end_immediately", |s| &s.end_immediately, |s| &mut s.end_immediately)
            .scalar(
                "restart_on_finish",
                |s| &s.restart_on_finish,
                |s| &mut s.restart_on_finish,
            )
    }
}

gamemode_variant!(RacingSettings => Racing);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TrostSettings {
    #[serde(flatten)]
    pub common: GamemodeCommon,
    pub eren_invincible: bool,
}

impl Shape for TrostSettings {
    const NAME: &'static str = "Trost";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        GamemodeCommon::describe_into(fields).scalar(
            "eren_invincible",
            |s| &s.eren_invincible,
            |s| &mut s.eren_invincible,
        )
    }
}

gamemode_variant!(TrostSettings => Trost);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RushSettings {
    #[serde(flatten)]
    pub common: GamemodeCommon,
    pub spawn_interval_seconds: f32,
    pub titans_per_spawn: i32,
}

impl Shape for RushSettings {
    const NAME: &'static str = "TitanRush";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        GamemodeCommon::describe_into(fields)
            .scalar(
                "spawn_interval_seconds",
                |s| &s.spawn_interval_seconds,
                |s| &mut s.spawn_interval_seconds,
            )
            .scalar("titans_per_spawn", |s| &s.titans_per_spawn, |s| &mut s.titans_per_spawn)
    }
}

gamemode_variant!(RushSettings => TitanRush);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PvpAhssSettings {
    #[serde(flatten)]
    pub common: GamemodeCommon,
    pub point_limit: i32,
}

impl Shape for PvpAhssSettings {
    const NAME: &'static str = "PvpAhss";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        GamemodeCommon::describe_into(fields).scalar(
            "point_limit",
            |s| &s.point_limit,
            |s| &mut s.point_limit,
        )
    }
}

gamemode_variant!(PvpAhssSettings => PvpAhss);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InfectionSettings {
    #[serde(flatten)]
    pub common: GamemodeCommon,
    pub initial_infected: i32,
}

impl Shape for InfectionSettings {
    const NAME: &'static str = "Infection";

    fn describe(fields: FieldTableBuilder<Self>) -> FieldTableBuilder<Self> {
        GamemodeCommon::describe_into(fields).scalar(
            "initial_infected",
            |s| &s.initial_infected,
            |s| &mut s.initial_infected,
        )
    }
}

gamemode_variant!(InfectionSettings => Infection);

/// One gamemode's settings, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "GamemodeType")]
pub enum GamemodeSettings {
    Titans(KillTitansSettings),
    Endless(EndlessSettings),
    Capture(CaptureSettings),
    Wave(WaveSettings),
    Racing(RacingSettings),
    Trost(TrostSettings),
    TitanRush(RushSettings),
    PvpAhss(PvpAhssSettings),
    Infection(InfectionSettings),
}

impl GamemodeSettings {
    /// A blank variant of the given kind.
    pub fn empty(kind: GamemodeKind) -> Self {
        match kind {
            GamemodeKind::Titans => KillTitansSettings::default().into_settings(),
            GamemodeKind::Endless => EndlessSettings::default().into_settings(),
            GamemodeKind::Capture => CaptureSettings::default().into_settings(),
            GamemodeKind::Wave => WaveSettings::default().into_settings(),
            GamemodeKind::Racing => RacingSettings::default().into_settings(),
            GamemodeKind::Trost => TrostSettings::default().into_settings(),
            GamemodeKind::TitanRush => RushSettings::default().into_settings(),
            GamemodeKind::PvpAhss => PvpAhssSettings::default().into_settings(),
            GamemodeKind::Infection => InfectionSettings::default().into_settings(),
        }
    }

    pub fn kind(&self) -> GamemodeKind {
        match self {
            GamemodeSettings::Titans(_) => GamemodeKind::Titans,
            GamemodeSettings::Endless(_) => GamemodeKind::Endless,
            GamemodeSettings::Capture(_) => GamemodeKind::Capture,
            GamemodeSettings::Wave(_) => GamemodeKind::Wave,
            GamemodeSettings::Racing(_) => GamemodeKind::Racing,
            GamemodeSettings::Trost(_) => GamemodeKind::Trost,
            GamemodeSettings::TitanRush(_) => GamemodeKind::TitanRush,
            GamemodeSettings::PvpAhss(_) => GamemodeKind::PvpAhss,
            GamemodeSettings::Infection(_) => GamemodeKind::Infection,
        }
    }

    pub fn common(&self) -> &GamemodeCommon {
        match self {
            GamemodeSettings::Titans(v) => v.common(),
            GamemodeSettings::Endless(v) => v.common(),
            GamemodeSettings::Capture(v) => v.common(),
            GamemodeSettings::Wave(v) => v.common(),
            GamemodeSettings::Racing(v) => v.common(),
            GamemodeSettings::Trost(v) => v.common(),
            GamemodeSettings::TitanRush(v) => v.common(),
            GamemodeSettings::PvpAhss(v) => v.common(),
            GamemodeSettings::Infection(v) => v.common(),
        }
    }

    /// The concrete variant, if this is a `T`.
    pub fn as_variant<T: GamemodeVariant>(&self) -> Option<&T> {
        T::from_settings(self)
    }

    /// Layer `sources` (lowest precedence first) into a fresh variant of `kind`.
    ///
    /// Sources of another kind are skipped. This is the only place that
    /// dispatches on the kind to reach a typed field table.
    pub fn create_from(
        registry: &ShapeRegistry,
        kind: GamemodeKind,
        sources: &[Option<&GamemodeSettings>],
    ) -> Result<GamemodeSettings, ShapeRegistrationError> {
        match kind {
            GamemodeKind::Titans => merge_variant::<KillTitansSettings>(registry, sources),
            GamemodeKind::Endless => merge_variant::<EndlessSettings>(registry, sources),
            GamemodeKind::Capture => merge_variant::<CaptureSettings>(registry, sources),
            GamemodeKind::Wave => merge_variant::<WaveSettings>(registry, sources),
            GamemodeKind::Racing => merge_variant::<RacingSettings>(registry, sources),
            GamemodeKind::Trost => merge_variant::<TrostSettings>(registry, sources),
            GamemodeKind::TitanRush => merge_variant::<RushSettings>(registry, sources),
            GamemodeKind::PvpAhss => merge_variant::<PvpAhssSettings>(registry, sources),
            GamemodeKind::Infection => merge_variant::<InfectionSettings>(registry, sources),
        }
    }
}

impl Discriminated for GamemodeSettings {
    type Kind = GamemodeKind;

    fn kind(&self) -> GamemodeKind {
        GamemodeSettings::kind(self)
    }
}

fn merge_variant<T: GamemodeVariant>(
    registry: &ShapeRegistry,
    sources: &[Option<&GamemodeSettings>],
) -> Result<GamemodeSettings, ShapeRegistrationError> {
    let typed: Vec<Option<&T>> = sources
        .iter()
        .copied()
        .map(|source| {
            let source = source?;
            let variant = T::from_settings(source);
            if variant.is_none() {
                let expected = T::KIND;
                warn!(
                    expected = %expected,
                    found = %source.kind(),
                    "Skipping gamemode settings of another kind"
                );
            }
            variant
        })
        .collect();
    Ok(registry.create_from(&typed)?.into_settings())
}

/// Register every gamemode variant's field table.
pub fn register_gamemodes(registry: &mut ShapeRegistry) -> Result<(), ShapeRegistrationError> {
    registry
        .register::<KillTitansSettings>()?
        .register::<EndlessSettings>()?
        .register::<CaptureSettings>()?
        .register::<WaveSettings>()?
        .register::<RacingSettings>()?
        .register::<TrostSettings>()?
        .register::<RushSettings>()?
        .register::<PvpAhssSettings>()?
        .register::<InfectionSettings>()?;
    Ok(())
}
