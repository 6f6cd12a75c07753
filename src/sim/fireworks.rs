//! Fireworks animator
//!
//! Owns the live particle field. Each frame integrates, draws and culls the
//! particles, then rolls for a new burst. The loop stops cooperatively: once
//! `active` is cleared, the next frame draws nothing and asks not to be
//! rescheduled.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::particle::Particle;
use crate::consts::BURST_HEIGHT_FRACTION;
use crate::renderer::Surface;
use crate::settings::Settings;

/// Per-particle random ranges (half-open)
pub const RADIUS_RANGE: (f64, f64) = (1.0, 3.0);
pub const SPEED_RANGE: (f64, f64) = (2.0, 7.0);
pub const DEPTH_RANGE: (f64, f64) = (0.4, 1.0);

/// Physics and spawn parameters for the animator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireworksConfig {
    pub burst_probability: f64,
    pub particles_per_burst: usize,
    pub friction: f64,
    pub gravity: f64,
    pub alpha_decay: f64,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for FireworksConfig {
    fn from(s: &Settings) -> Self {
        Self {
            burst_probability: s.burst_probability,
            particles_per_burst: s.particles_per_burst,
            friction: s.friction,
            gravity: s.gravity,
            alpha_decay: s.alpha_decay,
        }
    }
}

/// What a frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Animator is inactive; the loop must not reschedule
    Stopped,
    /// Frame rendered; schedule the next one
    Continue { drawn: usize, culled: usize, burst: bool },
}

/// The fireworks particle field
#[derive(Debug, Clone)]
pub struct Fireworks {
    config: FireworksConfig,
    particles: Vec<Particle>,
    active: bool,
    width: f64,
    height: f64,
    rng: Pcg32,
    frames: u64,
}

impl Fireworks {
    pub fn new(width: f64, height: f64, seed: u64, config: FireworksConfig) -> Self {
        Self {
            config,
            particles: Vec::new(),
            active: false,
            width,
            height,
            rng: Pcg32::seed_from_u64(seed),
            frames: 0,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Request a cooperative stop (takes effect on the next frame)
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Update logical surface size; live particles keep their coordinates
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Frames rendered since creation
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one animation frame against `surface`
    pub fn frame<S: Surface>(&mut self, surface: &mut S) -> FrameOutcome {
        if !self.active {
            return FrameOutcome::Stopped;
        }
        self.frames += 1;

        surface.clear(self.width, self.height);

        let decay = self.config.alpha_decay;
        let before = self.particles.len();
        let mut drawn = 0;
        self.particles.retain_mut(|p| {
            p.update(decay);
            if p.is_dead() {
                return false;
            }
            surface.fill_circle(p.pos.x, p.pos.y, p.render_radius(), p.color());
            drawn += 1;
            true
        });
        let culled = before - self.particles.len();

        let burst = self.rng.random_bool(self.config.burst_probability);
        if burst {
            let x = self.rng.random::<f64>() * self.width;
            let y = self.rng.random::<f64>() * self.height * BURST_HEIGHT_FRACTION;
            self.spawn_burst(DVec2::new(x, y));
        }

        FrameOutcome::Continue {
            drawn,
            culled,
            burst,
        }
    }

    /// Spawn one burst of particles at `origin` with a shared random hue
    pub fn spawn_burst(&mut self, origin: DVec2) {
        let hue = self.rng.random::<f64>() * 360.0;
        let count = self.config.particles_per_burst;
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle {
                pos: origin,
                radius: self.rng.random_range(RADIUS_RANGE.0..RADIUS_RANGE.1),
                speed: self.rng.random_range(SPEED_RANGE.0..SPEED_RANGE.1),
                angle: self.rng.random_range(0.0..TAU),
                friction: self.config.friction,
                gravity: self.config.gravity,
                hue,
                alpha: 1.0,
                depth: self.rng.random_range(DEPTH_RANGE.0..DEPTH_RANGE.1),
            };
            self.particles.push(particle);
        }
        log::debug!(
            "Burst at ({:.0}, {:.0}) hue {:.0}, {} live",
            origin.x,
            origin.y,
            hue,
            self.particles.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::renderer::{CountingSurface, Hsla, Surface};

    /// Records every draw call
    #[derive(Default)]
    struct RecordingSurface {
        clears: usize,
        circles: Vec<(f64, f64, f64, Hsla)>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _width: f64, _height: f64) {
            self.clears += 1;
        }

        fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla) {
            self.circles.push((x, y, radius, color));
        }
    }

    fn no_bursts() -> FireworksConfig {
        FireworksConfig {
            burst_probability: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_inactive_frame_stops_and_draws_nothing() {
        let mut fw = Fireworks::new(800.0, 600.0, 1, FireworksConfig::default());
        let mut surface = RecordingSurface::default();
        assert_eq!(fw.frame(&mut surface), FrameOutcome::Stopped);
        assert_eq!(surface.clears, 0);
        assert_eq!(fw.frames(), 0);
    }

    #[test]
    fn test_deactivate_stops_next_frame() {
        let mut fw = Fireworks::new(800.0, 600.0, 1, FireworksConfig::default());
        let mut surface = CountingSurface::default();
        fw.activate();
        assert!(matches!(fw.frame(&mut surface), FrameOutcome::Continue { .. }));
        fw.deactivate();
        assert_eq!(fw.frame(&mut surface), FrameOutcome::Stopped);
        assert_eq!(surface.clears, 1);
    }

    #[test]
    fn test_burst_spawns_shared_hue_within_ranges() {
        let mut fw = Fireworks::new(800.0, 600.0, 42, FireworksConfig::default());
        fw.spawn_burst(DVec2::new(10.0, 20.0));
        assert_eq!(fw.particles().len(), PARTICLES_PER_BURST);

        let hue = fw.particles()[0].hue;
        assert!((0.0..360.0).contains(&hue));
        for p in fw.particles() {
            assert_eq!(p.hue, hue);
            assert_eq!(p.pos, DVec2::new(10.0, 20.0));
            assert_eq!(p.alpha, 1.0);
            assert!((RADIUS_RANGE.0..RADIUS_RANGE.1).contains(&p.radius));
            assert!((SPEED_RANGE.0..SPEED_RANGE.1).contains(&p.speed));
            assert!((0.0..TAU).contains(&p.angle));
            assert!((DEPTH_RANGE.0..DEPTH_RANGE.1).contains(&p.depth));
        }
    }

    #[test]
    fn test_burst_lifecycle_67_frames() {
        let mut fw = Fireworks::new(800.0, 600.0, 7, no_bursts());
        fw.activate();
        fw.spawn_burst(DVec2::new(400.0, 100.0));

        let mut surface = RecordingSurface::default();
        for frame in 1..=66 {
            let outcome = fw.frame(&mut surface);
            assert_eq!(
                outcome,
                FrameOutcome::Continue {
                    drawn: PARTICLES_PER_BURST,
                    culled: 0,
                    burst: false
                },
                "frame {frame}"
            );
        }
        let outcome = fw.frame(&mut surface);
        assert_eq!(
            outcome,
            FrameOutcome::Continue {
                drawn: 0,
                culled: PARTICLES_PER_BURST,
                burst: false
            }
        );
        assert!(fw.particles().is_empty());
        // Nothing was ever drawn fully transparent or worse
        assert!(surface.circles.iter().all(|(_, _, _, c)| c.alpha > 0.0));
        assert_eq!(surface.clears, 67);
    }

    #[test]
    fn test_certain_burst_spawns_in_top_half() {
        let config = FireworksConfig {
            burst_probability: 1.0,
            ..Default::default()
        };
        let mut fw = Fireworks::new(800.0, 600.0, 3, config);
        fw.activate();
        let mut surface = CountingSurface::default();
        for _ in 0..20 {
            let outcome = fw.frame(&mut surface);
            assert!(matches!(outcome, FrameOutcome::Continue { burst: true, .. }));
        }
        // Fresh bursts from the last frame have not moved yet
        let fresh = &fw.particles()[fw.particles().len() - PARTICLES_PER_BURST..];
        for p in fresh {
            assert!((0.0..800.0).contains(&p.pos.x));
            assert!((0.0..300.0).contains(&p.pos.y));
        }
    }

    #[test]
    fn test_resize_keeps_particle_positions() {
        let mut fw = Fireworks::new(800.0, 600.0, 9, no_bursts());
        fw.spawn_burst(DVec2::new(700.0, 500.0));
        let before: Vec<_> = fw.particles().iter().map(|p| p.pos).collect();
        fw.resize(320.0, 240.0);
        assert_eq!(fw.size(), (320.0, 240.0));
        let after: Vec<_> = fw.particles().iter().map(|p| p.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_same_seed_same_field() {
        let mut a = Fireworks::new(800.0, 600.0, 1234, FireworksConfig::default());
        let mut b = Fireworks::new(800.0, 600.0, 1234, FireworksConfig::default());
        a.activate();
        b.activate();
        let mut sa = CountingSurface::default();
        let mut sb = CountingSurface::default();
        for _ in 0..500 {
            assert_eq!(a.frame(&mut sa), b.frame(&mut sb));
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_burst_rate_roughly_matches_probability() {
        let mut fw = Fireworks::new(800.0, 600.0, 2024, FireworksConfig::default());
        fw.activate();
        let mut surface = CountingSurface::default();
        let bursts = (0..10_000)
            .filter(|_| matches!(fw.frame(&mut surface), FrameOutcome::Continue { burst: true, .. }))
            .count();
        // Expect ~400
        assert!((250..550).contains(&bursts), "bursts = {bursts}");
    }
}
