//! User preferences: speech language, speech rate and the TTS program.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::locale::LanguageTag;

pub const DEFAULT_SPEECH_RATE: f32 = 0.5;
pub const MIN_SPEECH_RATE: f32 = 0.1;
pub const MAX_SPEECH_RATE: f32 = 0.75;
pub const DEFAULT_TTS_COMMAND: &str = "espeak-ng";

/// Keep a speech rate inside the supported range. NaN maps to the default.
pub fn clamp_speech_rate(rate: f32) -> f32 {
    if rate.is_nan() {
        DEFAULT_SPEECH_RATE
    } else {
        rate.clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE)
    }
}

/// Persisted preferences. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub language: LanguageTag,
    pub speech_rate: f32,
    /// Program used by the command speech sink.
    pub tts_command: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: LanguageTag::default(),
            speech_rate: DEFAULT_SPEECH_RATE,
            tts_command: DEFAULT_TTS_COMMAND.to_string(),
        }
    }
}

impl Settings {
    /// `<config dir>/voicecal/settings.toml`.
    pub fn default_path() -> Result<PathBuf, SettingsError> {
        dirs::config_dir()
            .map(|dir| dir.join("voicecal").join("settings.toml"))
            .ok_or(SettingsError::NoConfigDir)
    }

    /// Load settings from `path`, or the defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut settings: Settings =
            toml::from_str(&contents).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings.speech_rate = clamp_speech_rate(settings.speech_rate);
        Ok(settings)
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = toml::to_string(self)?;
        fs::write(path, contents).map_err(io_err)?;

        tracing::debug!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn set_speech_rate(&mut self, rate: f32) {
        self.speech_rate = clamp_speech_rate(rate);
    }
}
