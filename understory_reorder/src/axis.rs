// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-axis geometry for list reordering.
//!
//! The engine never looks at raw `x`/`y` coordinates. Screen-space vectors are
//! projected once through an [`AxisProjection`] into *item-order space*, a 1D
//! coordinate that grows with the item index no matter how the list is laid
//! out on screen. Scroll deltas produced in item-order space are projected back
//! through the same [`AxisProjection`] before they reach the host container.

use kurbo::{Point, Vec2};

/// Scroll axis of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Items stack top to bottom (a column).
    #[default]
    Vertical,
    /// Items stack along the horizontal axis (a row).
    Horizontal,
}

/// Horizontal reading direction of the host layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left. Only affects horizontal lists.
    Rtl,
}

/// Projection between screen space and item-order space.
///
/// A horizontal list in a right-to-left layout places item `0` on the right,
/// exactly like a reversed horizontal list in a left-to-right layout. Both flags
/// cancel out when set together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisProjection {
    /// Scroll axis.
    pub orientation: Orientation,
    /// `true` when item `0` sits at the bottom (vertical) or the far side (horizontal).
    pub reverse_layout: bool,
    /// Reading direction of the hosting layout.
    pub direction: LayoutDirection,
}

impl AxisProjection {
    /// A top-to-bottom column.
    pub const VERTICAL: Self = Self {
        orientation: Orientation::Vertical,
        reverse_layout: false,
        direction: LayoutDirection::Ltr,
    };

    /// A left-to-right row.
    pub const HORIZONTAL: Self = Self {
        orientation: Orientation::Horizontal,
        reverse_layout: false,
        direction: LayoutDirection::Ltr,
    };

    /// Creates a projection for the given axis.
    #[must_use]
    pub const fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            reverse_layout: false,
            direction: LayoutDirection::Ltr,
        }
    }

    /// Sets the reversed-layout flag (builder pattern).
    #[must_use]
    pub const fn with_reverse_layout(mut self, reverse_layout: bool) -> Self {
        self.reverse_layout = reverse_layout;
        self
    }

    /// Sets the layout direction (builder pattern).
    #[must_use]
    pub const fn with_direction(mut self, direction: LayoutDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Returns `true` if the list scrolls vertically.
    #[must_use]
    pub const fn is_vertical(&self) -> bool {
        matches!(self.orientation, Orientation::Vertical)
    }

    /// Returns `true` if item order runs against the screen axis.
    #[must_use]
    pub const fn is_flipped(&self) -> bool {
        let rtl_row = matches!(self.orientation, Orientation::Horizontal)
            && matches!(self.direction, LayoutDirection::Rtl);
        self.reverse_layout != rtl_row
    }

    /// Screen-space component that lies along the scroll axis, without any sign change.
    #[must_use]
    pub const fn main(&self, v: Vec2) -> f64 {
        match self.orientation {
            Orientation::Vertical => v.y,
            Orientation::Horizontal => v.x,
        }
    }

    /// Converts a screen-space movement into an item-order delta.
    #[must_use]
    pub fn axis_delta(&self, v: Vec2) -> f64 {
        let main = self.main(v);
        if self.is_flipped() { -main } else { main }
    }

    /// Converts an item-order delta into a screen-space vector on the scroll axis.
    #[must_use]
    pub fn to_screen(&self, delta: f64) -> Vec2 {
        let main = if self.is_flipped() { -delta } else { delta };
        match self.orientation {
            Orientation::Vertical => Vec2::new(0.0, main),
            Orientation::Horizontal => Vec2::new(main, 0.0),
        }
    }

    /// Maps a pointer position, relative to the list's own origin, into item-order space.
    ///
    /// For a normal layout item-order offsets start at `viewport.start` on the
    /// leading screen edge; for a flipped layout they start at `viewport.end`
    /// and decrease along the screen axis.
    #[must_use]
    pub fn axis_position(&self, position: Point, viewport: Span) -> f64 {
        let main = self.main(position.to_vec2());
        if self.is_flipped() {
            viewport.end - main
        } else {
            viewport.start + main
        }
    }
}

/// A half-open interval `[start, end)` along the list axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Span {
    /// Leading edge.
    pub start: f64,
    /// Trailing edge.
    pub end: f64,
}

impl Span {
    /// Creates a span; the edges are reordered if `end < start`.
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        if end < start {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// Creates a span from a leading edge and a size.
    #[must_use]
    pub fn from_offset(offset: f64, size: f64) -> Self {
        Self::new(offset, offset + size.max(0.0))
    }

    /// Length of the span.
    #[must_use]
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    /// Returns `true` for a zero-length span.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Center of the span.
    #[must_use]
    pub fn center(&self) -> f64 {
        (self.start + self.end) * 0.5
    }

    /// Returns `true` if `pos` lies within the span, edges included.
    #[must_use]
    pub fn contains(&self, pos: f64) -> bool {
        pos >= self.start && pos <= self.end
    }

    /// Returns the span moved by `delta`.
    #[must_use]
    pub fn translate(&self, delta: f64) -> Self {
        Self {
            start: self.start + delta,
            end: self.end + delta,
        }
    }

    /// Length of the intersection with `other`, `0.0` when disjoint.
    #[must_use]
    pub fn overlap(&self, other: &Self) -> f64 {
        let lo = self.start.max(other.start);
        let hi = self.end.min(other.end);
        (hi - lo).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_projection_reads_y() {
        let p = AxisProjection::VERTICAL;
        assert_eq!(p.axis_delta(Vec2::new(7.0, 3.0)), 3.0);
        assert_eq!(p.to_screen(5.0), Vec2::new(0.0, 5.0));
    }

    #[test]
    fn reversed_layout_flips_sign() {
        let p = AxisProjection::VERTICAL.with_reverse_layout(true);
        assert!(p.is_flipped());
        assert_eq!(p.axis_delta(Vec2::new(0.0, 3.0)), -3.0);
        assert_eq!(p.to_screen(5.0), Vec2::new(0.0, -5.0));
    }

    #[test]
    fn rtl_only_flips_horizontal_lists() {
        let row = AxisProjection::HORIZONTAL.with_direction(LayoutDirection::Rtl);
        assert!(row.is_flipped());
        assert_eq!(row.axis_delta(Vec2::new(4.0, 9.0)), -4.0);

        let column = AxisProjection::VERTICAL.with_direction(LayoutDirection::Rtl);
        assert!(!column.is_flipped());
    }

    #[test]
    fn rtl_and_reverse_cancel_out() {
        let p = AxisProjection::HORIZONTAL
            .with_reverse_layout(true)
            .with_direction(LayoutDirection::Rtl);
        assert!(!p.is_flipped());
        assert_eq!(p.axis_delta(Vec2::new(4.0, 0.0)), 4.0);
    }

    #[test]
    fn axis_position_accounts_for_viewport_and_flip() {
        let viewport = Span::new(-10.0, 190.0);
        let p = AxisProjection::VERTICAL;
        assert_eq!(p.axis_position(Point::new(0.0, 25.0), viewport), 15.0);

        let flipped = p.with_reverse_layout(true);
        assert_eq!(flipped.axis_position(Point::new(0.0, 25.0), viewport), 165.0);
    }

    #[test]
    fn span_overlap() {
        let a = Span::new(0.0, 10.0);
        assert_eq!(a.overlap(&Span::new(5.0, 20.0)), 5.0);
        assert_eq!(a.overlap(&Span::new(10.0, 20.0)), 0.0);
        assert_eq!(a.overlap(&Span::new(30.0, 40.0)), 0.0);
        assert_eq!(a.overlap(&Span::new(2.0, 4.0)), 2.0);
    }

    #[test]
    fn span_new_orders_edges() {
        let s = Span::new(8.0, 2.0);
        assert_eq!(s, Span::new(2.0, 8.0));
        assert_eq!(s.len(), 6.0);
        assert_eq!(s.center(), 5.0);
        assert_eq!(s.translate(2.0), Span::new(4.0, 10.0));
    }
}
