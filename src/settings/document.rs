//! The deserialized settings document: the global tier plus one settings
//! entry per gamemode.

use super::blocks::{HorseSettings, PvpSettings, RespawnSettings, TitanSettings};
use super::gamemodes::{GamemodeKind, GamemodeSettings};
use crate::error::{ConfigurationError, SettingsResult};
use crate::merge::select;
use serde::{Deserialize, Serialize};

/// Raw settings as authored.
///
/// Missing global blocks deserialize as blank blocks; missing gamemode
/// fields deserialize as their sentinels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDocument {
    #[serde(rename = "Gamemodes")]
    pub gamemodes: Vec<GamemodeSettings>,

    #[serde(rename = "PvP")]
    pub pvp: PvpSettings,

    #[serde(rename = "Titan")]
    pub titan: TitanSettings,

    #[serde(rename = "Horse")]
    pub horse: HorseSettings,

    #[serde(rename = "Respawn")]
    pub respawn: RespawnSettings,
}

impl SettingsDocument {
    pub fn new(
        gamemodes: Vec<GamemodeSettings>,
        pvp: PvpSettings,
        titan: TitanSettings,
        horse: HorseSettings,
        respawn: RespawnSettings,
    ) -> Self {
        Self {
            gamemodes,
            pvp,
            titan,
            horse,
            respawn,
        }
    }

    pub fn from_json(json: &str) -> SettingsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml(yaml: &str) -> SettingsResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The single gamemode entry of `kind`.
    pub fn gamemode(&self, kind: GamemodeKind) -> Result<&GamemodeSettings, ConfigurationError> {
        select(&self.gamemodes, kind)
    }

    /// Kinds present in the document, in authored order.
    pub fn kinds(&self) -> Vec<GamemodeKind> {
        self.gamemodes.iter().map(|g| g.kind()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{EndlessSettings, GamemodeVariant, KillTitansSettings};

    const DOCUMENT: &str = r#"{
        "Gamemodes": [
            { "GamemodeType": "Titans", "KillTarget": 10 },
            { "GamemodeType": "Endless", "PointLimit": 100 }
        ],
        "PvP": { "Mode": "FreeForAll" },
        "Titan": { "Limit": 30, "Mindless": { "Chance": 0.8 } },
        "Respawn": { "DelaySeconds": 5 }
    }"#;

    #[test]
    fn test_from_json() {
        let doc = SettingsDocument::from_json(DOCUMENT).unwrap();
        assert_eq!(doc.kinds(), [GamemodeKind::Titans, GamemodeKind::Endless]);
        assert_eq!(doc.pvp.mode, crate::settings::PvpMode::FreeForAll);
        assert_eq!(doc.titan.limit, 30);
        assert_eq!(doc.titan.mindless.chance, 0.8);
        assert_eq!(doc.respawn.delay_seconds, 5);
        // Horse was not authored at all.
        assert_eq!(doc.horse, HorseSettings::default());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
Gamemodes:
  - GamemodeType: Endless
    PointLimit: 25
Horse:
  Enabled: true
"#;
        let doc = SettingsDocument::from_yaml(yaml).unwrap();
        let endless = doc
            .gamemode(GamemodeKind::Endless)
            .unwrap()
            .as_variant::<EndlessSettings>()
            .unwrap();
        assert_eq!(endless.point_limit, 25);
        assert!(doc.horse.enabled);
    }

    #[test]
    fn test_gamemode_lookup_errors() {
        let doc = SettingsDocument::new(
            vec![
                KillTitansSettings::default().into_settings(),
                KillTitansSettings::default().into_settings(),
            ],
            PvpSettings::default(),
            TitanSettings::default(),
            HorseSettings::default(),
            RespawnSettings::default(),
        );
        assert_eq!(
            doc.gamemode(GamemodeKind::Titans).err(),
            Some(ConfigurationError::Ambiguous {
                kind: "Titans".into(),
                count: 2
            })
        );
        assert_eq!(
            doc.gamemode(GamemodeKind::Wave).err(),
            Some(ConfigurationError::NotFound {
                kind: "Wave".into()
            })
        );
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = SettingsDocument::from_json("{ not json").unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::ParseError);
    }
}
