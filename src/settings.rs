//! Page settings
//!
//! Every timing and physics constant the page uses, with defaults matching
//! [`crate::consts`]. On web an optional inline JSON block can override any
//! subset of fields:
//!
//! ```html
//! <script type="application/json" id="greeting-settings">{"fade_steps": 20}</script>
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Invalid or unreadable settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings JSON is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be within [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must be at most {max} ms, got {value}")]
    TooLong { field: &'static str, value: u32, max: u32 },
}

/// Longest delay a `setTimeout`/`setInterval` accepts (ms)
pub const MAX_TIMER_MS: u32 = i32::MAX as u32;

/// Page settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Countdown / unlock ===
    /// Countdown tick period (ms)
    pub tick_ms: u32,
    /// Delay before scrolling content into view after unlock (ms)
    pub scroll_delay_ms: u32,

    // === Audio ===
    /// Volume the fade-in ramps up to (0.0 - 1.0)
    pub music_ceiling: f64,
    /// Total fade-in duration (ms)
    pub fade_duration_ms: u32,
    /// Number of discrete volume increments
    pub fade_steps: u32,

    // === Fireworks ===
    /// Chance of a new burst per animation frame (0.0 - 1.0)
    pub burst_probability: f64,
    pub particles_per_burst: usize,
    pub friction: f64,
    pub gravity: f64,
    pub alpha_decay: f64,

    // === Long press ===
    pub hold_ms: f64,
    pub tooltip_display_ms: f64,
    pub tooltip_fade_ms: f64,

    // === Parallax ===
    pub parallax_divisor: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            scroll_delay_ms: SCROLL_DELAY_MS,

            music_ceiling: MUSIC_CEILING,
            fade_duration_ms: FADE_DURATION_MS,
            fade_steps: FADE_STEPS,

            burst_probability: BURST_PROBABILITY,
            particles_per_burst: PARTICLES_PER_BURST,
            friction: PARTICLE_FRICTION,
            gravity: PARTICLE_GRAVITY,
            alpha_decay: PARTICLE_ALPHA_DECAY,

            hold_ms: HOLD_MS,
            tooltip_display_ms: TOOLTIP_DISPLAY_MS,
            tooltip_fade_ms: TOOLTIP_FADE_MS,

            parallax_divisor: PARALLAX_DIVISOR,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check value ranges that would otherwise panic or stall a loop
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("music_ceiling", self.music_ceiling),
            ("burst_probability", self.burst_probability),
            ("friction", self.friction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::OutOfUnitRange { field, value });
            }
        }

        // Browser timers take a signed 32-bit delay
        for (field, value) in [
            ("tick_ms", self.tick_ms),
            ("scroll_delay_ms", self.scroll_delay_ms),
            ("fade_duration_ms", self.fade_duration_ms),
        ] {
            if value > MAX_TIMER_MS {
                return Err(SettingsError::TooLong {
                    field,
                    value,
                    max: MAX_TIMER_MS,
                });
            }
        }

        if self.tick_ms == 0 {
            return Err(SettingsError::NotPositive { field: "tick_ms" });
        }
        if self.fade_steps == 0 {
            return Err(SettingsError::NotPositive { field: "fade_steps" });
        }
        // A non-decaying particle would live forever
        if self.alpha_decay <= 0.0 {
            return Err(SettingsError::NotPositive { field: "alpha_decay" });
        }
        if self.parallax_divisor <= 0.0 {
            return Err(SettingsError::NotPositive { field: "parallax_divisor" });
        }
        Ok(())
    }

    /// Element id of the inline settings block
    #[cfg(target_arch = "wasm32")]
    const ELEMENT_ID: &'static str = "greeting-settings";

    /// Load settings from the inline JSON block (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from #{}", Self::ELEMENT_ID);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings override: {e}");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
