//! Presentation settings
//!
//! Colors, fonts and match pacing. Gameplay physics stays in `consts`.
//! Settings are read-only at runtime; nothing here is written back.

use serde::{Deserialize, Serialize};

/// Presentation and pacing preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Board ===
    /// Canvas background fill
    pub background: String,
    /// Score and banner text color
    pub text_color: String,
    /// Computer paddle fill
    pub computer_color: String,
    /// Dimming layer drawn under the countdown and result banner
    pub overlay_color: String,
    /// CSS font family for all text
    pub font_family: String,

    // === Pacing ===
    /// First number shown by the pre-match countdown
    pub countdown_from: i32,
    /// Milliseconds between countdown numbers
    pub countdown_interval_ms: f64,
    /// Delay before the result banner is drawn over the final frame
    pub result_delay_ms: f64,
    /// How long the result banner stays up before the menu returns
    pub menu_delay_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background: "black".to_string(),
            text_color: "white".to_string(),
            computer_color: "white".to_string(),
            overlay_color: "rgba(0, 0, 0, 0.7)".to_string(),
            font_family: "'Press Start 2P'".to_string(),

            countdown_from: 6,
            countdown_interval_ms: 1000.0,
            result_delay_ms: 10.0,
            menu_delay_ms: 2000.0,
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "demit_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"background": "navy", "countdown_from": 3}"#)
            .expect("valid settings");
        assert_eq!(settings.background, "navy");
        assert_eq!(settings.countdown_from, 3);
        assert_eq!(settings.menu_delay_ms, 2000.0);
        assert_eq!(settings.text_color, "white");
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Settings::from_json("{background:").is_err());
    }
}
