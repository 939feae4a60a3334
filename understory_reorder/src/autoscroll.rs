// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge auto-scroll.
//!
//! While the dragged item's bounding box hangs past a viewport edge, the list
//! scrolls towards that edge. The step grows with how far the box is out of
//! bounds (an ease-in curve over the fraction of the item that is outside) and
//! with how long the auto-scroll has been running (an ease-out ramp), and is
//! capped at [`ReorderConfig::max_scroll_per_frame`].

use crate::{ReorderConfig, Span};

/// Signed distance by which `dragged_box` hangs past the viewport.
///
/// Positive past the end edge, negative past the start edge, `0.0` inside.
/// When the box is past both edges (it is larger than the viewport),
/// `direction` picks the edge; a zero `direction` yields `0.0`.
#[must_use]
pub fn out_of_bounds(dragged_box: Span, viewport: Span, direction: f64) -> f64 {
    let past_end = (dragged_box.end - viewport.end).max(0.0);
    let past_start = (viewport.start - dragged_box.start).max(0.0);
    match (past_start > 0.0, past_end > 0.0) {
        (true, true) if direction > 0.0 => past_end,
        (true, true) if direction < 0.0 => -past_start,
        (true, true) => 0.0,
        (false, true) => past_end,
        (true, false) => -past_start,
        (false, false) => 0.0,
    }
}

/// Auto-scroll step for one frame, in item-order space.
///
/// `elapsed_ms` is the time since this auto-scroll run started. The result is
/// `0.0` while the box is inside the viewport; otherwise its sign follows the
/// crossed edge and its magnitude lies in
/// `[min_scroll_step, max_scroll_per_frame]` (both clamped by the cap).
#[must_use]
pub fn autoscroll_delta(
    dragged_box: Span,
    viewport: Span,
    direction: f64,
    elapsed_ms: u64,
    config: &ReorderConfig,
) -> f64 {
    let out = out_of_bounds(dragged_box, viewport, direction);
    if out == 0.0 || config.max_scroll_per_frame <= 0.0 {
        return 0.0;
    }
    let size = dragged_box.len();
    let ratio = if size > 0.0 {
        (out.abs() / size).min(1.0)
    } else {
        1.0
    };
    let capped = config.max_scroll_per_frame * ease_in_quint(ratio);
    let time_ratio = if config.acceleration_limit_ms == 0 {
        1.0
    } else {
        (elapsed_ms as f64 / config.acceleration_limit_ms as f64).min(1.0)
    };
    let step = (capped * ease_out_quart(time_ratio))
        .max(config.min_scroll_step)
        .min(config.max_scroll_per_frame);
    if out > 0.0 { step } else { -step }
}

fn ease_in_quint(t: f64) -> f64 {
    t * t * t * t * t
}

fn ease_out_quart(t: f64) -> f64 {
    let inv = 1.0 - t;
    1.0 - inv * inv * inv * inv
}
