// Integration tests (native) for the `midnight-reveal` crate.
// These drive a whole simulated session through the public API: countdown to
// expiry, unlock, fireworks frames, music fade and the long-press tooltip.

use chrono::{TimeZone, Utc};
use midnight_reveal::Settings;
use midnight_reveal::audio::{Playback, VolumeRamp};
use midnight_reveal::renderer::CountingSurface;
use midnight_reveal::sim::{
    Countdown, CountdownUpdate, Deadline, Fireworks, FireworksConfig, FrameOutcome, LongPress,
    TooltipEvent, UnlockController, UnlockEffects,
};

#[derive(Default)]
struct Speaker {
    playing: bool,
    volume: f64,
    starts: u32,
}

impl Playback for Speaker {
    fn play(&mut self) {
        self.playing = true;
    }
    fn pause(&mut self) {
        self.playing = false;
    }
    fn is_paused(&self) -> bool {
        !self.playing
    }
    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }
}

/// Page stand-in: applies effects to plain state
#[derive(Default)]
struct FakePage {
    lock_visible: bool,
    content_visible: bool,
    toggle_visible: bool,
    parallax_listeners: u32,
    fireworks_starts: u32,
    ramp: Option<VolumeRamp>,
    speaker: Speaker,
}

impl UnlockEffects for FakePage {
    fn hide_lock_screen(&mut self) {
        self.lock_visible = false;
    }
    fn reveal_content(&mut self) {
        self.content_visible = true;
    }
    fn schedule_scroll_into_view(&mut self, _delay_ms: u32) {}
    fn flourish_sparkles(&mut self) {}
    fn start_fireworks(&mut self) {
        self.fireworks_starts += 1;
    }
    fn start_music_fade(&mut self, mut ramp: VolumeRamp) {
        self.speaker.starts += 1;
        ramp.start(&mut self.speaker);
        self.ramp = Some(ramp);
    }
    fn reveal_music_toggle(&mut self) {
        self.toggle_visible = true;
    }
    fn install_parallax(&mut self) {
        self.parallax_listeners += 1;
    }
}

#[test]
fn full_session_from_new_years_eve() {
    let settings = Settings::default();

    // 23:59:57 on New Year's Eve
    let start = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 57).unwrap();
    let deadline = Deadline::next_new_year(&start).unwrap();
    assert_eq!(deadline.year, 2027);

    let mut countdown = Countdown::new(Some(deadline));
    let t0 = start.timestamp_millis();
    let mut shown = Vec::new();
    let mut expired_at = None;
    for tick in 0..10 {
        match countdown.tick(t0 + tick * settings.tick_ms as i64) {
            Some(CountdownUpdate::Remaining(text)) => shown.push(text),
            Some(CountdownUpdate::Expired) => expired_at = Some(tick),
            None => {}
        }
    }
    assert_eq!(shown, ["00:00:03", "00:00:02", "00:00:01"]);
    assert_eq!(expired_at, Some(3));

    let mut page = FakePage {
        lock_visible: true,
        ..Default::default()
    };
    let mut controller = UnlockController::new(&settings);
    assert!(controller.unlock(&mut page));
    // A double tap changes nothing
    assert!(!controller.unlock(&mut page));

    assert!(!page.lock_visible);
    assert!(page.content_visible);
    assert!(page.toggle_visible);
    assert_eq!(page.fireworks_starts, 1);
    assert_eq!(page.parallax_listeners, 1);
    assert_eq!(page.speaker.starts, 1);
    assert_eq!(page.speaker.volume, 0.0);

    let mut ramp = page.ramp.take().unwrap();
    assert_eq!(ramp.interval_ms(), 100);
    let mut increments = 1;
    while ramp.advance(&mut page.speaker) {
        increments += 1;
    }
    assert_eq!(increments, settings.fade_steps);
    assert_eq!(page.speaker.volume, settings.music_ceiling);
}

#[test]
fn fireworks_field_stays_bounded() {
    let mut fw = Fireworks::new(1280.0, 720.0, 77, FireworksConfig::default());
    fw.activate();
    let mut surface = CountingSurface::default();
    let mut peak = 0;
    for _ in 0..5_000 {
        assert!(matches!(fw.frame(&mut surface), FrameOutcome::Continue { .. }));
        peak = peak.max(fw.particles().len());
    }
    // A burst lives 67 frames; even a dense run holds only a handful at once
    assert!(peak <= 40 * 12, "peak = {peak}");
    assert!(surface.circles > 0);
    assert!(fw.particles().iter().all(|p| p.alpha > 0.0));

    fw.deactivate();
    assert_eq!(fw.frame(&mut surface), FrameOutcome::Stopped);
}

#[test]
fn long_press_tooltip_timeline() {
    let mut lp = LongPress::new(&Settings::default());
    let mut events = Vec::new();

    lp.press(0.0);
    // Poll every 50ms as a coarse timer would
    for i in 0..=100 {
        let now = i as f64 * 50.0;
        if let Some(event) = lp.poll(now) {
            events.push((now, event));
        }
        if now == 1_000.0 {
            lp.release();
        }
    }
    assert_eq!(
        events,
        [
            (800.0, TooltipEvent::Show),
            (3_800.0, TooltipEvent::BeginFade),
            (4_200.0, TooltipEvent::Remove),
        ]
    );
}
