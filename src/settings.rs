//! User preferences and animation tuning
//!
//! Preferences are persisted separately from anything else in LocalStorage.
//! The animation itself is never saved: every session starts from scratch.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::i18n::Language;

/// Tuning parameters for one animation run
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    /// Number of oscillating points
    pub point_count: usize,
    /// Phase 1 ends once the frame counter exceeds this
    pub phase1_frames: u32,
    /// Accumulated phase (radians) between line reveals
    pub line_reveal_phase: f32,
    /// Disk radius and oscillation amplitude
    pub scene_radius: f32,
    pub point_radius: f32,
    pub line_width: f32,
    /// Divisor applied to the raw slider value
    pub speed_scale: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            point_count: POINT_COUNT,
            phase1_frames: PHASE1_FRAMES,
            line_reveal_phase: LINE_REVEAL_PHASE,
            scene_radius: SCENE_RADIUS,
            point_radius: POINT_RADIUS,
            line_width: LINE_WIDTH,
            speed_scale: SPEED_SCALE,
        }
    }
}

impl AnimationConfig {
    /// Phase increment per frame for a raw slider value
    ///
    /// Negative and non-finite input freezes the animation instead of running it backwards.
    pub fn speed_from_slider(&self, raw: f32) -> f32 {
        if !raw.is_finite() || raw <= 0.0 || self.speed_scale <= 0.0 {
            return 0.0;
        }
        raw / self.speed_scale
    }
}

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// UI language
    #[serde(default)]
    pub language: Language,
    /// Raw oscillation speed slider value
    #[serde(default = "default_speed")]
    pub speed: f32,
}

fn default_speed() -> f32 {
    SPEED_DEFAULT
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: Language::default(),
            speed: SPEED_DEFAULT,
        }
    }
}

impl Settings {
    /// Set the slider value, clamped to the slider range
    pub fn set_speed(&mut self, raw: f32) {
        self.speed = if raw.is_finite() {
            raw.clamp(SPEED_MIN, SPEED_MAX)
        } else {
            SPEED_DEFAULT
        };
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "illusion_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(mut settings) = serde_json::from_str::<Settings>(&json) {
                    settings.set_speed(settings.speed);
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
                log::debug!("Settings saved");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_from_slider() {
        let config = AnimationConfig::default();
        assert!((config.speed_from_slider(20.0) - 0.02).abs() < 1e-7);
        assert_eq!(config.speed_from_slider(0.0), 0.0);
        assert_eq!(config.speed_from_slider(-5.0), 0.0);
        assert_eq!(config.speed_from_slider(f32::NAN), 0.0);
    }

    #[test]
    fn test_set_speed_clamps() {
        let mut settings = Settings::default();
        settings.set_speed(250.0);
        assert_eq!(settings.speed, SPEED_MAX);
        settings.set_speed(-1.0);
        assert_eq!(settings.speed, SPEED_MIN);
        settings.set_speed(f32::INFINITY);
        assert_eq!(settings.speed, SPEED_DEFAULT);
    }

    #[test]
    fn test_settings_json_defaults() {
        // Older saves without a speed field still load
        let settings: Settings = serde_json::from_str(r#"{"language":"en"}"#).unwrap();
        assert_eq!(settings.language, Language::En);
        assert_eq!(settings.speed, SPEED_DEFAULT);

        let json = serde_json::to_string(&Settings::default()).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Settings::default());
    }
}
