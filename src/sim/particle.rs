//! Firework particle

use glam::DVec2;

use crate::renderer::Hsla;

/// Particle colour saturation / lightness (percent)
pub const PARTICLE_SATURATION: f64 = 100.0;
pub const PARTICLE_LIGHTNESS: f64 = 70.0;

/// A single firework spark
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    /// Base radius before depth scaling
    pub radius: f64,
    pub speed: f64,
    /// Direction of travel (radians)
    pub angle: f64,
    /// Speed multiplier applied every frame
    pub friction: f64,
    /// Downward drift added every frame
    pub gravity: f64,
    pub hue: f64,
    /// 1 at spawn, removed once <= 0
    pub alpha: f64,
    /// Pseudo-3D factor in [0.4, 1.0]: farther sparks are smaller and drift less sideways
    pub depth: f64,
}

impl Particle {
    /// Advance one frame
    pub fn update(&mut self, alpha_decay: f64) {
        self.speed *= self.friction;
        self.pos.x += self.angle.cos() * self.speed * self.depth;
        self.pos.y += self.angle.sin() * self.speed + self.gravity;
        self.alpha -= alpha_decay;
    }

    pub fn is_dead(&self) -> bool {
        self.alpha <= 0.0
    }

    /// Radius as drawn
    pub fn render_radius(&self) -> f64 {
        self.radius * self.depth
    }

    pub fn color(&self) -> Hsla {
        Hsla::new(self.hue, PARTICLE_SATURATION, PARTICLE_LIGHTNESS, self.alpha)
    }
}
