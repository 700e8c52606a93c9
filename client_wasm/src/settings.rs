//! Accessibility settings persisted in localStorage

use game_core::Accessibility;
use serde::{Deserialize, Serialize};

pub const STORAGE_KEY: &str = "accessibility-settings";

/// Player-facing settings snapshot. Missing keys in a stored blob fall
/// back to the defaults, so older saves keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessibilitySettings {
    pub high_contrast: bool,
    pub color_blind_mode: bool,
    pub screen_reader: bool,
    pub keyboard_navigation: bool,
    pub reduced_motion: bool,
    pub large_text: bool,
    pub sound_enabled: bool,
}

impl Default for AccessibilitySettings {
    fn default() -> Self {
        Self {
            high_contrast: false,
            color_blind_mode: false,
            screen_reader: false,
            keyboard_navigation: false,
            reduced_motion: false,
            large_text: false,
            sound_enabled: true,
        }
    }
}

impl AccessibilitySettings {
    /// Parse a stored blob; malformed input yields the defaults
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_default()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Snapshot consumed by the simulation
    pub fn to_core(&self) -> Accessibility {
        Accessibility {
            high_contrast: self.high_contrast,
            color_blind: self.color_blind_mode,
            screen_reader: self.screen_reader,
            keyboard_nav: self.keyboard_navigation,
            reduced_motion: self.reduced_motion,
            large_text: self.large_text,
            sound: self.sound_enabled,
        }
    }
}

/// Load settings from localStorage, defaults on any failure
#[cfg(target_arch = "wasm32")]
pub fn load() -> AccessibilitySettings {
    fn stored() -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(STORAGE_KEY).ok()?
    }
    stored()
        .map(|json| AccessibilitySettings::from_json(&json))
        .unwrap_or_default()
}

/// Persist settings to localStorage, best-effort
#[cfg(target_arch = "wasm32")]
pub fn save(settings: &AccessibilitySettings) {
    if let Some(storage) = web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
    {
        let _ = storage.set_item(STORAGE_KEY, &settings.to_json());
    }
}
