//! Player preferences
//!
//! Sound and vibration toggles, persisted separately from the best score in
//! LocalStorage. The effects themselves (WebAudio, the vibration API) live in
//! the front end; the core only carries the flags so event consumers can
//! check them.

use serde::{Deserialize, Serialize};

/// Feedback preferences
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Settings {
    /// Heartbeat and tap/death sounds
    pub sound: bool,
    /// Vibration patterns on taps, near misses and losses
    pub vibration: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { sound: true, vibration: true }
    }
}

impl Settings {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "rage_tiles_settings";

    pub fn toggle_sound(&mut self) -> bool {
        self.sound = !self.sound;
        self.save();
        self.sound
    }

    pub fn toggle_vibration(&mut self) -> bool {
        self.vibration = !self.vibration;
        self.save();
        self.vibration
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
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

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
