//! Long-press tooltip timing
//!
//! Pure time-driven machine: the caller reports presses/releases with a
//! timestamp and polls when [`LongPress::next_wakeup`] says something is due.
//! Stale timers are harmless since `poll` only acts on elapsed time.

use crate::settings::Settings;

/// Tooltip lifecycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TooltipPhase {
    Idle,
    /// Pointer held down since `since` (ms)
    Pressing { since: f64 },
    /// Tooltip visible since `at` (ms)
    Shown { at: f64 },
    /// Fade-out started at `since` (ms)
    FadingOut { since: f64 },
}

/// Action the caller must apply to the tooltip element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipEvent {
    /// Create the tooltip and fade it in
    Show,
    /// Start fading it out
    BeginFade,
    /// Remove it from the page
    Remove,
}

#[derive(Debug, Clone)]
pub struct LongPress {
    phase: TooltipPhase,
    hold_ms: f64,
    display_ms: f64,
    fade_ms: f64,
}

impl Default for LongPress {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl LongPress {
    pub fn new(settings: &Settings) -> Self {
        Self {
            phase: TooltipPhase::Idle,
            hold_ms: settings.hold_ms,
            display_ms: settings.tooltip_display_ms,
            fade_ms: settings.tooltip_fade_ms,
        }
    }

    pub fn phase(&self) -> TooltipPhase {
        self.phase
    }

    /// Pointer/touch down. Ignored while a tooltip is on screen.
    pub fn press(&mut self, now: f64) {
        if self.phase == TooltipPhase::Idle {
            self.phase = TooltipPhase::Pressing { since: now };
        }
    }

    /// Pointer up/leave or touch end/cancel. Cancels a pending hold only.
    pub fn release(&mut self) {
        if let TooltipPhase::Pressing { .. } = self.phase {
            self.phase = TooltipPhase::Idle;
        }
    }

    /// Time at which the next `poll` will produce an event
    pub fn next_wakeup(&self) -> Option<f64> {
        match self.phase {
            TooltipPhase::Idle => None,
            TooltipPhase::Pressing { since } => Some(since + self.hold_ms),
            TooltipPhase::Shown { at } => Some(at + self.display_ms),
            TooltipPhase::FadingOut { since } => Some(since + self.fade_ms),
        }
    }

    /// Advance to `now`, returning at most one event
    pub fn poll(&mut self, now: f64) -> Option<TooltipEvent> {
        let due = self.next_wakeup()?;
        if now < due {
            return None;
        }
        let (next, event) = match self.phase {
            TooltipPhase::Idle => return None,
            TooltipPhase::Pressing { .. } => (TooltipPhase::Shown { at: due }, TooltipEvent::Show),
            TooltipPhase::Shown { .. } => {
                (TooltipPhase::FadingOut { since: due }, TooltipEvent::BeginFade)
            }
            TooltipPhase::FadingOut { .. } => (TooltipPhase::Idle, TooltipEvent::Remove),
        };
        self.phase = next;
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_before_hold_never_shows() {
        let mut lp = LongPress::default();
        lp.press(0.0);
        lp.release();
        // The already-scheduled timer still fires
        assert_eq!(lp.poll(800.0), None);
        assert_eq!(lp.poll(10_000.0), None);
        assert_eq!(lp.phase(), TooltipPhase::Idle);
    }

    #[test]
    fn test_release_at_799_never_shows() {
        let mut lp = LongPress::default();
        lp.press(0.0);
        assert_eq!(lp.poll(799.0), None);
        lp.release();
        assert_eq!(lp.poll(800.0), None);
    }

    #[test]
    fn test_full_tooltip_lifecycle() {
        let mut lp = LongPress::default();
        lp.press(100.0);
        assert_eq!(lp.next_wakeup(), Some(900.0));
        assert_eq!(lp.poll(900.0), Some(TooltipEvent::Show));
        // Releasing after the tooltip appears does not hide it
        lp.release();
        assert_eq!(lp.next_wakeup(), Some(3_900.0));
        assert_eq!(lp.poll(3_899.0), None);
        assert_eq!(lp.poll(3_900.0), Some(TooltipEvent::BeginFade));
        assert_eq!(lp.next_wakeup(), Some(4_300.0));
        assert_eq!(lp.poll(4_300.0), Some(TooltipEvent::Remove));
        // Removed 3400ms after display
        assert_eq!(lp.phase(), TooltipPhase::Idle);
        assert_eq!(lp.next_wakeup(), None);
    }

    #[test]
    fn test_late_poll_keeps_schedule() {
        let mut lp = LongPress::default();
        lp.press(0.0);
        // Timer fires late; the display window is still measured from the due time
        assert_eq!(lp.poll(850.0), Some(TooltipEvent::Show));
        assert_eq!(lp.phase(), TooltipPhase::Shown { at: 800.0 });
    }

    #[test]
    fn test_press_while_shown_is_ignored() {
        let mut lp = LongPress::default();
        lp.press(0.0);
        lp.poll(800.0);
        lp.press(1_000.0);
        assert_eq!(lp.phase(), TooltipPhase::Shown { at: 800.0 });
    }

    #[test]
    fn test_repress_after_cancel_restarts_hold() {
        let mut lp = LongPress::default();
        lp.press(0.0);
        lp.release();
        lp.press(600.0);
        // First press' timer
        assert_eq!(lp.poll(800.0), None);
        assert_eq!(lp.poll(1_400.0), Some(TooltipEvent::Show));
    }
}
