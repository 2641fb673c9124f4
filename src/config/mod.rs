//! Player settings and key bindings, persisted as a RON file next to the
//! save data. Missing or unreadable files fall back to defaults; individual
//! missing fields fall back through serde defaults so old files keep working.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

pub const SETTINGS_FILE: &str = "cloverfall_settings.ron";

// ═══════════════════════════════════════════════════════════════════════
// SETTINGS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub music_volume: f32,
    pub sfx_volume: f32,
    pub bindings: Bindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_volume: 0.25,
            sfx_volume: 0.25,
            bindings: Bindings::default(),
        }
    }
}

/// Key bindings stored by name so the settings file stays hand-editable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Bindings {
    pub fast_forward: BindableKey,
    pub open_inventory: BindableKey,
    pub toggle_legend: BindableKey,
    pub interact: BindableKey,
    pub advance_dialogue: BindableKey,
    pub pause: BindableKey,
    pub use_tool: BindableKey,
    pub plant_seed: BindableKey,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            fast_forward: BindableKey::RShift,
            open_inventory: BindableKey::I,
            toggle_legend: BindableKey::F1,
            interact: BindableKey::E,
            advance_dialogue: BindableKey::Space,
            pause: BindableKey::Escape,
            use_tool: BindableKey::Space,
            plant_seed: BindableKey::Q,
        }
    }
}

/// The closed set of rebindable keys. A dedicated enum rather than
/// `KeyCode` keeps the RON file stable across engine upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindableKey {
    RShift,
    LShift,
    Space,
    Tab,
    Escape,
    E,
    I,
    Q,
    F1,
}

impl BindableKey {
    pub fn key_code(self) -> KeyCode {
        match self {
            BindableKey::RShift => KeyCode::ShiftRight,
            BindableKey::LShift => KeyCode::ShiftLeft,
            BindableKey::Space => KeyCode::Space,
            BindableKey::Tab => KeyCode::Tab,
            BindableKey::Escape => KeyCode::Escape,
            BindableKey::E => KeyCode::KeyE,
            BindableKey::I => KeyCode::KeyI,
            BindableKey::Q => KeyCode::KeyQ,
            BindableKey::F1 => KeyCode::F1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BindableKey::RShift => "Right Shift",
            BindableKey::LShift => "Left Shift",
            BindableKey::Space => "Space",
            BindableKey::Tab => "Tab",
            BindableKey::Escape => "Esc",
            BindableKey::E => "E",
            BindableKey::I => "I",
            BindableKey::Q => "Q",
            BindableKey::F1 => "F1",
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// LOAD / STORE
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn settings_path() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join(SETTINGS_FILE)
}

impl Settings {
    pub fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            match fs::read_to_string(settings_path()) {
                Ok(text) => match ron::from_str(&text) {
                    Ok(settings) => return settings,
                    Err(e) => {
                        warn!("Settings file unreadable ({e}); using defaults.");
                    }
                },
                Err(_) => {
                    info!("No settings file found; using defaults.");
                }
            }
        }
        Settings::default()
    }

    pub fn store(&self) -> Result<(), String> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| e.to_string())?;
            fs::write(settings_path(), text).map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    pub fn clamp_volumes(&mut self) {
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
    }
}
