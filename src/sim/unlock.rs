//! Unlock flow
//!
//! LOCKED -> UNLOCKED, exactly once. The controller owns only the state bit
//! and the ordering of side effects; the effects themselves sit behind
//! [`UnlockEffects`] so the browser can perform them and tests can record them.

use crate::audio::VolumeRamp;
use crate::settings::Settings;

/// Whether the greeting has been revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnlockState {
    #[default]
    Locked,
    Unlocked,
}

/// Side effects performed on unlock, called in declaration order
pub trait UnlockEffects {
    /// Hide the lock screen
    fn hide_lock_screen(&mut self);
    /// Show the main content and allow the page to scroll
    fn reveal_content(&mut self);
    /// Smooth-scroll the content into view after `delay_ms`
    fn schedule_scroll_into_view(&mut self, delay_ms: u32);
    /// One-shot sparkle pulse; no-op if the page has no sparkle layer
    fn flourish_sparkles(&mut self);
    /// Activate the fireworks and start their frame loop
    fn start_fireworks(&mut self);
    /// Begin playback and drive `ramp` to its ceiling
    fn start_music_fade(&mut self, ramp: VolumeRamp);
    fn reveal_music_toggle(&mut self);
    /// Install the (never removed) device-orientation parallax listener
    fn install_parallax(&mut self);
}

/// Drives the one-way unlock transition
#[derive(Debug, Clone)]
pub struct UnlockController {
    state: UnlockState,
    scroll_delay_ms: u32,
    ramp: VolumeRamp,
}

impl Default for UnlockController {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl UnlockController {
    pub fn new(settings: &Settings) -> Self {
        Self {
            state: UnlockState::Locked,
            scroll_delay_ms: settings.scroll_delay_ms,
            ramp: VolumeRamp::from(settings),
        }
    }

    pub fn state(&self) -> UnlockState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == UnlockState::Unlocked
    }

    /// Reveal the greeting. Returns `false` (and does nothing) if already unlocked.
    pub fn unlock<E: UnlockEffects + ?Sized>(&mut self, effects: &mut E) -> bool {
        if self.is_unlocked() {
            log::debug!("Unlock requested again - ignoring");
            return false;
        }
        self.state = UnlockState::Unlocked;
        log::info!("Unlocked");

        effects.hide_lock_screen();
        effects.reveal_content();
        effects.schedule_scroll_into_view(self.scroll_delay_ms);
        effects.flourish_sparkles();
        effects.start_fireworks();
        effects.start_music_fade(self.ramp.clone());
        effects.reveal_music_toggle();
        effects.install_parallax();
        true
    }
}
