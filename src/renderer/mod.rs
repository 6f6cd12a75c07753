//! Drawing surface abstraction
//!
//! The fireworks only need two primitives: clear the whole surface and fill a
//! circle. On web these map onto `CanvasRenderingContext2d`.

use std::fmt;

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::CanvasSurface;

/// HSLA colour in CSS terms (hue in degrees, saturation/lightness in percent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
    pub alpha: f64,
}

impl Hsla {
    pub fn new(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
            alpha,
        }
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({},{}%,{}%,{})",
            self.hue, self.saturation, self.lightness, self.alpha
        )
    }
}

/// A 2D raster target
pub trait Surface {
    /// Clear the `width` x `height` area to fully transparent
    fn clear(&mut self, width: f64, height: f64);

    /// Fill a circle centred at (x, y)
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla);
}

/// Surface that only counts draw calls (headless runs)
#[derive(Debug, Default, Clone)]
pub struct CountingSurface {
    pub clears: u64,
    pub circles: u64,
    /// Circles drawn since the last clear
    pub circles_this_frame: u64,
}

impl Surface for CountingSurface {
    fn clear(&mut self, _width: f64, _height: f64) {
        self.clears += 1;
        self.circles_this_frame = 0;
    }

    fn fill_circle(&mut self, _x: f64, _y: f64, _radius: f64, _color: Hsla) {
        self.circles += 1;
        self.circles_this_frame += 1;
    }
}
