use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::PathBuf,
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use crate::audio::WaveMode;

pub const SESSION_LENGTH_MIN_SECS: u32 = 30;
pub const SESSION_LENGTH_MAX_SECS: u32 = 300;
pub const SESSION_LENGTH_STEP_SECS: u32 = 30;
pub const CUSTOM_BEAT_MIN_HZ: f64 = 0.5;
pub const CUSTOM_BEAT_MAX_HZ: f64 = 50.0;

/// Wave picker state: preset mode, optional fine-tuned beat, length and boost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct WaveSettings {
    pub mode: WaveMode,
    /// Overrides the mode's beat frequency when set.
    pub custom_beat_hz: Option<f64>,
    pub session_length_secs: u32,
    pub harmonic_boost: bool,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            mode: WaveMode::GammaPeak,
            custom_beat_hz: None,
            session_length_secs: 180,
            harmonic_boost: true,
        }
    }
}

impl WaveSettings {
    pub fn beat_hz(&self) -> f64 {
        self.custom_beat_hz.unwrap_or_else(|| self.mode.beat_hz())
    }

    /// Snap to the slider grids: 30-300 s in steps of 30, 0.5-50 Hz in steps of 0.5.
    pub fn clamped(mut self) -> Self {
        let steps = (self.session_length_secs as f64 / SESSION_LENGTH_STEP_SECS as f64).round() as u32;
        self.session_length_secs = (steps * SESSION_LENGTH_STEP_SECS)
            .clamp(SESSION_LENGTH_MIN_SECS, SESSION_LENGTH_MAX_SECS);
        self.custom_beat_hz = self
            .custom_beat_hz
            .map(|hz| ((hz * 2.0).round() / 2.0).clamp(CUSTOM_BEAT_MIN_HZ, CUSTOM_BEAT_MAX_HZ));
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct OracleSettings {
    pub endpoint: String,
    pub model: String,
    pub timeout_ms: u64,
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".into(),
            model: "gemini-1.5-flash".into(),
            timeout_ms: 30_000,
        }
    }
}

impl OracleSettings {
    pub fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EchoSettings {
    pub wave: WaveSettings,
    pub oracle: OracleSettings,
    pub log_path: PathBuf,
}

impl Default for EchoSettings {
    fn default() -> Self {
        Self {
            wave: WaveSettings::default(),
            oracle: OracleSettings::default(),
            log_path: PathBuf::from("consciousness_log.csv"),
        }
    }
}

/// JSON-backed settings, reloaded with defaults when the file is missing or unreadable.
pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<EchoSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                log::warn!("Ignoring unreadable settings at {}: {err}", path.display());
                EchoSettings::default()
            })
        } else {
            EchoSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn get(&self) -> EchoSettings {
        self.read().clone()
    }

    pub fn wave(&self) -> WaveSettings {
        self.read().wave.clone()
    }

    pub fn oracle(&self) -> OracleSettings {
        self.read().oracle.clone()
    }

    pub fn update_wave(&self, settings: WaveSettings) -> Result<()> {
        let mut guard = self.write();
        guard.wave = settings.clamped();
        self.persist(&guard)
    }

    pub fn update_oracle(&self, settings: OracleSettings) -> Result<()> {
        let mut guard = self.write();
        guard.oracle = settings;
        self.persist(&guard)
    }

    pub fn update_log_path(&self, log_path: PathBuf) -> Result<()> {
        let mut guard = self.write();
        guard.log_path = log_path;
        self.persist(&guard)
    }

    fn read(&self) -> RwLockReadGuard<'_, EchoSettings> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, EchoSettings> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn persist(&self, data: &EchoSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
