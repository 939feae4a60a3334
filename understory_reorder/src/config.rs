// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

/// Default cap on the auto-scroll distance per frame, in logical pixels.
pub const DEFAULT_MAX_SCROLL_PER_FRAME: f64 = 20.0;

/// Default time for auto-scroll to reach full speed, in milliseconds.
pub const DEFAULT_ACCELERATION_LIMIT_MS: u64 = 1500;

/// Default smallest non-zero auto-scroll step, in logical pixels.
pub const DEFAULT_MIN_SCROLL_STEP: f64 = 1.0;

/// Tunables for [`ReorderState`](crate::ReorderState).
///
/// Setters clamp their inputs: negative distances become `0.0` and non-finite
/// values are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReorderConfig {
    /// Largest auto-scroll step emitted per frame. `0.0` disables auto-scroll.
    pub max_scroll_per_frame: f64,
    /// Time after the auto-scroll starts until it reaches full speed.
    pub acceleration_limit_ms: u64,
    /// Smallest step emitted while the dragged item is past a viewport edge.
    pub min_scroll_step: f64,
    /// Animate the dropped item into its slot on pointer-up, as on cancel.
    ///
    /// Enabled by default; `false` snaps the item into place on release.
    pub animate_drop: bool,
}

impl ReorderConfig {
    /// Creates the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_scroll_per_frame: DEFAULT_MAX_SCROLL_PER_FRAME,
            acceleration_limit_ms: DEFAULT_ACCELERATION_LIMIT_MS,
            min_scroll_step: DEFAULT_MIN_SCROLL_STEP,
            animate_drop: true,
        }
    }

    /// Sets the per-frame auto-scroll cap (builder pattern).
    #[must_use]
    pub fn with_max_scroll_per_frame(mut self, max: f64) -> Self {
        if max.is_finite() {
            self.max_scroll_per_frame = max.max(0.0);
        }
        self
    }

    /// Sets the acceleration ramp (builder pattern). `0` scrolls at full speed immediately.
    #[must_use]
    pub const fn with_acceleration_limit_ms(mut self, limit: u64) -> Self {
        self.acceleration_limit_ms = limit;
        self
    }

    /// Sets the smallest auto-scroll step (builder pattern).
    #[must_use]
    pub fn with_min_scroll_step(mut self, step: f64) -> Self {
        if step.is_finite() {
            self.min_scroll_step = step.max(0.0);
        }
        self
    }

    /// Sets whether a drop runs the settle animation (builder pattern).
    #[must_use]
    pub const fn with_animate_drop(mut self, animate: bool) -> Self {
        self.animate_drop = animate;
        self
    }
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_clamp() {
        let config = ReorderConfig::new()
            .with_max_scroll_per_frame(-4.0)
            .with_min_scroll_step(f64::NAN);
        assert_eq!(config.max_scroll_per_frame, 0.0);
        assert_eq!(config.min_scroll_step, DEFAULT_MIN_SCROLL_STEP);

        let config = ReorderConfig::new().with_max_scroll_per_frame(f64::INFINITY);
        assert_eq!(config.max_scroll_per_frame, DEFAULT_MAX_SCROLL_PER_FRAME);
    }

    #[test]
    fn drop_animates_by_default() {
        assert!(ReorderConfig::default().animate_drop);
        assert!(!ReorderConfig::new().with_animate_drop(false).animate_drop);
    }
}
