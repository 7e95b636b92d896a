//! Scroll-position driver for infinite reveal.
//!
//! Time is injected as [`std::time::Instant`] so the throttle is testable
//! without sleeping.

use std::time::{Duration, Instant};

/// A snapshot of scroll geometry, all in pixels.
#[derive(Debug, Clone, Copy)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollMetrics {
    /// Distance between the bottom of the viewport and the bottom of the
    /// content.
    #[must_use]
    pub fn distance_from_bottom(&self) -> f64 {
        self.content_height - (self.scroll_top + self.viewport_height)
    }
}

/// Decides when scrolling should reveal another page: the distance from
/// the bottom dropped below the threshold, evaluated at most once per
/// throttle window so rapid scroll events coalesce.
///
/// Callers gate the trigger further on has-more / not-already-loading /
/// initial-load-complete; the driver only owns geometry and timing.
#[derive(Debug)]
pub struct ScrollDriver {
    threshold_px: f64,
    throttle: Duration,
    last_eval: Option<Instant>,
}

impl ScrollDriver {
    #[must_use]
    pub fn new(threshold_px: f64, throttle_ms: u64) -> Self {
        Self {
            threshold_px,
            throttle: Duration::from_millis(throttle_ms),
            last_eval: None,
        }
    }

    /// Observes a scroll event at `now`. Returns `true` when this event
    /// should trigger revealing another page.
    pub fn observe(&mut self, now: Instant, metrics: &ScrollMetrics) -> bool {
        if let Some(last) = self.last_eval {
            if now.duration_since(last) < self.throttle {
                return false;
            }
        }
        self.last_eval = Some(now);
        metrics.distance_from_bottom() < self.threshold_px
    }
}
