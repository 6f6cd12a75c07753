//! Device-tilt parallax

/// Pixel offset for a device orientation; missing angles count as zero
pub fn parallax_offset(gamma: Option<f64>, beta: Option<f64>, divisor: f64) -> (f64, f64) {
    (gamma.unwrap_or(0.0) / divisor, beta.unwrap_or(0.0) / divisor)
}

/// CSS transform for the page body
pub fn parallax_transform(gamma: Option<f64>, beta: Option<f64>, divisor: f64) -> String {
    let (x, y) = parallax_offset(gamma, beta, divisor);
    format!("translate({x}px, {y}px)")
}
