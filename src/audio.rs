//! Background music
//!
//! Playback is best-effort ambience: browsers may reject `play()` until the
//! user interacts with the page, and those rejections are swallowed.

use crate::settings::Settings;

/// An audio output the page can control
pub trait Playback {
    /// Start or resume playback; failures are ignored
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;
    /// Set volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f64);
}

/// Flip between playing and paused. Returns `true` if now playing.
pub fn toggle_playback<P: Playback + ?Sized>(player: &mut P) -> bool {
    if player.is_paused() {
        player.play();
        true
    } else {
        player.pause();
        false
    }
}

/// Resume playback only if currently paused
pub fn resume_if_paused<P: Playback + ?Sized>(player: &mut P) {
    if player.is_paused() {
        player.play();
    }
}

/// Linear fade-in from silence to `ceiling` in fixed steps
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeRamp {
    ceiling: f64,
    duration_ms: u32,
    steps: u32,
    current: u32,
}

impl From<&Settings> for VolumeRamp {
    fn from(s: &Settings) -> Self {
        Self::new(s.music_ceiling, s.fade_duration_ms, s.fade_steps)
    }
}

impl VolumeRamp {
    pub fn new(ceiling: f64, duration_ms: u32, steps: u32) -> Self {
        Self {
            ceiling: ceiling.clamp(0.0, 1.0),
            duration_ms,
            steps: steps.max(1),
            current: 0,
        }
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Period between increments (ms)
    pub fn interval_ms(&self) -> u32 {
        (self.duration_ms / self.steps).max(1)
    }

    /// Volume after `step` increments
    pub fn volume_at(&self, step: u32) -> f64 {
        ((step as f64 / self.steps as f64) * self.ceiling).min(self.ceiling)
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.steps
    }

    /// Silence the player and start playback
    pub fn start<P: Playback + ?Sized>(&mut self, player: &mut P) {
        self.current = 0;
        player.set_volume(0.0);
        player.play();
    }

    /// Apply the next increment. Returns `false` once the ceiling is reached
    /// and the driving interval should be cancelled.
    pub fn advance<P: Playback + ?Sized>(&mut self, player: &mut P) -> bool {
        if self.is_finished() {
            return false;
        }
        self.current += 1;
        player.set_volume(self.volume_at(self.current));
        !self.is_finished()
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::MusicPlayer;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlMediaElement;

    use super::Playback;

    /// Swallow a rejected `play()` promise
    fn play_quietly(media: &HtmlMediaElement) {
        match media.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = JsFuture::from(promise).await {
                    log::debug!("play() rejected: {:?}", e);
                }
            }),
            Err(e) => log::debug!("play() threw: {:?}", e),
        }
    }

    /// `<audio>` element as a [`Playback`]
    #[derive(Clone)]
    pub struct MusicPlayer {
        media: HtmlMediaElement,
    }

    impl MusicPlayer {
        pub fn new(media: HtmlMediaElement) -> Self {
            Self { media }
        }
    }

    impl Playback for MusicPlayer {
        fn play(&mut self) {
            play_quietly(&self.media);
        }

        fn pause(&mut self) {
            let _ = self.media.pause();
        }

        fn is_paused(&self) -> bool {
            self.media.paused()
        }

        fn set_volume(&mut self, volume: f64) {
            self.media.set_volume(volume.clamp(0.0, 1.0));
        }
    }
}
