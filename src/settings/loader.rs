//! Locating and reading settings files.

use super::document::SettingsDocument;
use super::gamemodes::GamemodeSettings;
use crate::error::{SettingsError, SettingsResult};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the settings document.
pub const SETTINGS_PATH_ENV: &str = "GAME_SETTINGS_PATH";

/// Used when neither an explicit path nor the environment names a document.
pub const DEFAULT_SETTINGS_PATH: &str = "settings/GameSettings.json";

/// Serialization format of a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml`/`.yml` are YAML; anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }

    pub fn parse<T: DeserializeOwned>(&self, content: &str) -> SettingsResult<T> {
        match self {
            DocumentFormat::Json => Ok(serde_json::from_str(content)?),
            DocumentFormat::Yaml => Ok(serde_yaml::from_str(content)?),
        }
    }
}

/// Resolves the document path and reads settings files.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    path: PathBuf,
}

impl DocumentLoader {
    /// Explicit path, then `GAME_SETTINGS_PATH`, then the default location.
    pub fn resolve(explicit: Option<PathBuf>) -> Self {
        let path = explicit
            .or_else(|| std::env::var(SETTINGS_PATH_ENV).ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
        Self { path }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> SettingsResult<SettingsDocument> {
        let document: SettingsDocument = read_file(&self.path)?;
        debug!(
            path = %self.path.display(),
            gamemodes = document.gamemodes.len(),
            "Loaded settings document"
        );
        Ok(document)
    }

    /// Read a level override: a single gamemode entry.
    pub fn load_level(path: &Path) -> SettingsResult<GamemodeSettings> {
        let level: GamemodeSettings = read_file(path)?;
        debug!(path = %path.display(), gamemode = %level.kind(), "Loaded level settings");
        Ok(level)
    }
}

fn read_file<T: DeserializeOwned>(path: &Path) -> SettingsResult<T> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SettingsError::io(path.display().to_string(), e))?;
    DocumentFormat::from_path(path).parse(&content)
}
