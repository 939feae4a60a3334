// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settling a released item back into its slot.
//!
//! When a drag is cancelled the item is visually displaced from its slot by
//! the accumulated drag offset. A [`DragCancelledAnimation`] takes that offset
//! and brings it back to zero, either at once ([`NoDragCancelledAnimation`]) or
//! with a damped spring ([`SpringDragCancelledAnimation`]). While it runs the
//! engine keeps the item on the dragged layer so it still paints above its
//! siblings.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::ItemPosition;

/// Largest integration step, in seconds. Longer frames are subdivided.
const MAX_STEP_SECS: f64 = 0.004;

/// Whether an animation still needs frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// More ticks are needed.
    Running,
    /// The offset reached zero.
    Finished,
}

/// Animates a released item's offset back to zero.
pub trait DragCancelledAnimation<K> {
    /// Starts settling the item at `position` from `offset` (item-order space).
    fn start(&mut self, position: ItemPosition<K>, offset: f64);

    /// Advances the animation by `dt_ms` milliseconds.
    fn tick(&mut self, dt_ms: u64) -> AnimationStatus;

    /// Stops immediately, leaving the offset at zero.
    fn finish(&mut self);

    /// The settling item, or `None` when idle.
    fn position(&self) -> Option<&ItemPosition<K>>;

    /// Current animated offset; `0.0` when idle.
    fn offset(&self) -> f64;

    /// Returns `true` while an item is settling.
    fn is_running(&self) -> bool {
        self.position().is_some()
    }
}

/// Snaps the item back without animating.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDragCancelledAnimation;

impl<K> DragCancelledAnimation<K> for NoDragCancelledAnimation {
    fn start(&mut self, _position: ItemPosition<K>, _offset: f64) {}

    fn tick(&mut self, _dt_ms: u64) -> AnimationStatus {
        AnimationStatus::Finished
    }

    fn finish(&mut self) {}

    fn position(&self) -> Option<&ItemPosition<K>> {
        None
    }

    fn offset(&self) -> f64 {
        0.0
    }
}

/// Stiffness and damping of a settle spring.
///
/// The spring is critically damped when `damping == 2 * sqrt(stiffness)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Restoring force per unit of displacement.
    pub stiffness: f64,
    /// Velocity drag.
    pub damping: f64,
    /// Offset below which the spring may come to rest.
    pub rest_offset: f64,
    /// Speed (per second) below which the spring may come to rest.
    pub rest_velocity: f64,
}

impl SpringSpec {
    /// Medium-low stiffness, critically damped: no overshoot, settles in about half a second.
    pub const MEDIUM_LOW: Self = Self {
        stiffness: 400.0,
        damping: 40.0,
        rest_offset: 0.5,
        rest_velocity: 1.0,
    };

    /// High stiffness, critically damped.
    pub const HIGH: Self = Self {
        stiffness: 10_000.0,
        damping: 200.0,
        rest_offset: 0.5,
        rest_velocity: 1.0,
    };

    /// Creates a spec; stiffness is clamped to a small positive minimum and damping to `>= 0`.
    #[must_use]
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness: stiffness.max(0.1),
            damping: damping.max(0.0),
            ..Self::MEDIUM_LOW
        }
    }

    /// Creates a critically damped spec for `stiffness`.
    #[must_use]
    pub fn critically_damped(stiffness: f64) -> Self {
        let stiffness = stiffness.max(0.1);
        Self::new(stiffness, 2.0 * stiffness.sqrt())
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::MEDIUM_LOW
    }
}

/// Settles the item with a damped spring.
#[derive(Debug, Clone)]
pub struct SpringDragCancelledAnimation<K> {
    spec: SpringSpec,
    position: Option<ItemPosition<K>>,
    offset: f64,
    velocity: f64,
}

impl<K> SpringDragCancelledAnimation<K> {
    /// Creates an idle animation using [`SpringSpec::MEDIUM_LOW`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_spec(SpringSpec::MEDIUM_LOW)
    }

    /// Creates an idle animation with a custom spring.
    #[must_use]
    pub fn with_spec(spec: SpringSpec) -> Self {
        Self {
            spec,
            position: None,
            offset: 0.0,
            velocity: 0.0,
        }
    }

    /// The spring parameters.
    #[must_use]
    pub fn spec(&self) -> SpringSpec {
        self.spec
    }

    /// Current velocity, per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    fn step(&mut self, dt: f64) {
        // Semi-implicit Euler.
        let force = -self.spec.stiffness * self.offset - self.spec.damping * self.velocity;
        self.velocity += force * dt;
        self.offset += self.velocity * dt;
    }

    fn at_rest(&self) -> bool {
        self.offset.abs() < self.spec.rest_offset && self.velocity.abs() < self.spec.rest_velocity
    }
}

impl<K> Default for SpringDragCancelledAnimation<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> DragCancelledAnimation<K> for SpringDragCancelledAnimation<K> {
    fn start(&mut self, position: ItemPosition<K>, offset: f64) {
        self.position = Some(position);
        self.offset = offset;
        self.velocity = 0.0;
        if self.at_rest() {
            self.finish();
        }
    }

    fn tick(&mut self, dt_ms: u64) -> AnimationStatus {
        if self.position.is_none() {
            return AnimationStatus::Finished;
        }
        let mut remaining = dt_ms as f64 / 1000.0;
        while remaining > 0.0 {
            let dt = remaining.min(MAX_STEP_SECS);
            self.step(dt);
            remaining -= dt;
        }
        if self.at_rest() {
            self.finish();
            AnimationStatus::Finished
        } else {
            AnimationStatus::Running
        }
    }

    fn finish(&mut self) {
        self.position = None;
        self.offset = 0.0;
        self.velocity = 0.0;
    }

    fn position(&self) -> Option<&ItemPosition<K>> {
        self.position.as_ref()
    }

    fn offset(&self) -> f64 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_is_never_running() {
        let mut anim = NoDragCancelledAnimation;
        DragCancelledAnimation::<u32>::start(&mut anim, ItemPosition::new(0, 7), 120.0);
        assert!(!DragCancelledAnimation::<u32>::is_running(&anim));
        assert_eq!(DragCancelledAnimation::<u32>::offset(&anim), 0.0);
    }

    #[test]
    fn spring_settles_to_zero() {
        let mut anim = SpringDragCancelledAnimation::new();
        anim.start(ItemPosition::new(2, 'c'), 300.0);
        assert!(anim.is_running());
        assert_eq!(anim.position(), Some(&ItemPosition::new(2, 'c')));

        let mut frames = 0;
        while anim.tick(16) == AnimationStatus::Running {
            frames += 1;
            assert!(frames < 200, "spring did not settle");
        }
        assert!(frames > 3);
        assert_eq!(anim.offset(), 0.0);
        assert_eq!(anim.position(), None);
    }

    #[test]
    fn spring_moves_towards_zero() {
        let mut anim = SpringDragCancelledAnimation::new();
        anim.start(ItemPosition::new(0, 1_u8), -80.0);
        anim.tick(16);
        let first = anim.offset();
        assert!(first > -80.0 && first < 0.0);
        anim.tick(16);
        assert!(anim.offset() > first);
    }

    #[test]
    fn tiny_offset_finishes_on_start() {
        let mut anim = SpringDragCancelledAnimation::new();
        anim.start(ItemPosition::new(0, 1_u8), 0.2);
        assert!(!anim.is_running());
        assert_eq!(anim.tick(16), AnimationStatus::Finished);
    }

    #[test]
    fn critically_damped_matches_presets() {
        assert_eq!(SpringSpec::critically_damped(400.0), SpringSpec::MEDIUM_LOW);
        assert_eq!(SpringSpec::critically_damped(10_000.0), SpringSpec::HIGH);
    }

    #[test]
    fn finish_resets() {
        let mut anim = SpringDragCancelledAnimation::new();
        anim.start(ItemPosition::new(0, 1_u8), 50.0);
        anim.tick(16);
        anim.finish();
        assert!(!anim.is_running());
        assert_eq!(anim.offset(), 0.0);
        assert_eq!(anim.velocity(), 0.0);
    }
}
