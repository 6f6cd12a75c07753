//! Canvas 2D surface

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Hsla, Surface};

/// `CanvasRenderingContext2d` wrapped as a [`Surface`]
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, ctx })
    }

    /// Reset the canvas' logical size; returns the new (width, height)
    pub fn resize(&self, width: u32, height: u32) -> (f64, f64) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        (width as f64, height as f64)
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Hsla) {
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(x, y, radius, 0.0, TAU) {
            // Negative radius is the only failure mode
            log::warn!("arc failed: {:?}", e);
            return;
        }
        self.ctx.set_fill_style_str(&color.to_string());
        self.ctx.fill();
    }
}
