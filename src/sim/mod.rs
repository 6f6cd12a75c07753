//! Deterministic page core
//!
//! Everything with state or timing lives here. This module must stay free of
//! browser dependencies:
//! - Time is passed in as milliseconds, never read
//! - Seeded RNG only
//! - Drawing goes through `renderer::Surface`

pub mod countdown;
pub mod fireworks;
pub mod long_press;
pub mod parallax;
pub mod particle;
pub mod unlock;

pub use countdown::{Countdown, CountdownPhase, CountdownUpdate, Deadline, format_countdown};
pub use fireworks::{Fireworks, FireworksConfig, FrameOutcome};
pub use long_press::{LongPress, TooltipEvent, TooltipPhase};
pub use parallax::{parallax_offset, parallax_transform};
pub use particle::Particle;
pub use unlock::{UnlockController, UnlockEffects, UnlockState};
