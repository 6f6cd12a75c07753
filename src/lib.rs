//! Midnight Reveal - a countdown-gated New Year greeting
//!
//! Core modules:
//! - `sim`: Deterministic core (countdown, unlock flow, fireworks, long press)
//! - `renderer`: Drawing surface abstraction (Canvas 2D on web)
//! - `audio`: Background music playback and volume fade-in
//! - `content`: Modal overlay content
//! - `settings`: Tunable timings and physics constants

pub mod audio;
pub mod content;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Page configuration constants
pub mod consts {
    /// Countdown tick period (ms)
    pub const TICK_MS: u32 = 1000;
    /// Countdown display once the deadline has passed
    pub const EXPIRED_DISPLAY: &str = "00:00:00";
    /// Lock prompt shown after expiry
    pub const EXPIRED_LOCK_TEXT: &str = "It\u{2019}s midnight!";
    /// Lock hint shown after expiry
    pub const EXPIRED_LOCK_HINT: &str = "Tap when you\u{2019}re ready \u{2728}";

    /// Delay before scrolling the revealed content into view (ms)
    pub const SCROLL_DELAY_MS: u32 = 100;

    /// Music fade-in defaults
    pub const MUSIC_CEILING: f64 = 0.6;
    pub const FADE_DURATION_MS: u32 = 3000;
    pub const FADE_STEPS: u32 = 30;

    /// Fireworks defaults
    pub const BURST_PROBABILITY: f64 = 0.04;
    pub const PARTICLES_PER_BURST: usize = 40;
    pub const PARTICLE_FRICTION: f64 = 0.98;
    pub const PARTICLE_GRAVITY: f64 = 0.04;
    /// Alpha lost per frame
    pub const PARTICLE_ALPHA_DECAY: f64 = 0.015;
    /// Bursts spawn in the top fraction of the surface
    pub const BURST_HEIGHT_FRACTION: f64 = 0.5;

    /// Long-press tooltip timings (ms)
    pub const HOLD_MS: f64 = 800.0;
    pub const TOOLTIP_DISPLAY_MS: f64 = 3000.0;
    pub const TOOLTIP_FADE_MS: f64 = 400.0;
    pub const TOOLTIP_TEXT: &str = "I meant every bit of this \u{1F49B}";

    /// Device tilt (degrees) is divided by this to get a pixel offset
    pub const PARALLAX_DIVISOR: f64 = 12.0;
}
