//! Host settings and preferences
//!
//! Persisted separately from the best score in LocalStorage (web); read from
//! a JSON file on native. Nothing here changes simulation rules; see `tuning` for that.

use serde::{Deserialize, Serialize};

/// Key codes (`KeyboardEvent.code`) bound to each action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub jump: Vec<String>,
    pub crouch: Vec<String>,
    pub autopilot: Vec<String>,
    pub hitboxes: Vec<String>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            jump: vec!["Space".to_string(), "ArrowUp".to_string()],
            crouch: vec!["ArrowDown".to_string()],
            autopilot: vec!["KeyA".to_string()],
            hitboxes: vec!["KeyH".to_string()],
        }
    }
}

impl KeyBindings {
    pub fn is_jump(&self, code: &str) -> bool {
        self.jump.iter().any(|k| k == code)
    }

    pub fn is_crouch(&self, code: &str) -> bool {
        self.crouch.iter().any(|k| k == code)
    }

    pub fn toggles_autopilot(&self, code: &str) -> bool {
        self.autopilot.iter().any(|k| k == code)
    }

    pub fn toggles_hitboxes(&self, code: &str) -> bool {
        self.hitboxes.iter().any(|k| k == code)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bindings: KeyBindings,

    // === Debug ===
    /// Outline the margin-shrunk hitboxes
    pub show_hitboxes: bool,

    // === Timing ===
    /// Step at a fixed 60 Hz instead of once per animation frame
    /// (keeps speed constant on high-refresh displays)
    pub fixed_timestep: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            show_hitboxes: false,
            fixed_timestep: true,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "cat_runner_settings";

    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed settings: {}", e);
            Self::default()
        })
    }

    /// Apply a preference key. Returns true if a setting changed (the host
    /// should persist it).
    pub fn apply_key(&mut self, code: &str, repeat: bool) -> bool {
        if repeat || !self.bindings.toggles_hitboxes(code) {
            return false;
        }
        self.show_hitboxes = !self.show_hitboxes;
        log::info!("Hitbox overlay: {}", self.show_hitboxes);
        true
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Load settings from a JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json_or_default(&json)
            }
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
