// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Reorder: drag-to-reorder for scrollable lists.
//!
//! This crate is the engine behind press-drag-release reordering in a 1D list.
//! It decides which slot the dragged item belongs in, asks the host to move it
//! there, scrolls the list when the item is dragged against a viewport edge,
//! and settles the item back into its slot when the gesture ends.
//!
//! The core concepts are:
//!
//! - [`AxisProjection`]: maps screen-space vectors into *item-order space*, a 1D
//!   coordinate growing with the item index. Vertical and horizontal lists,
//!   reversed layouts, and right-to-left rows all share one code path.
//! - [`ListLayout`]: a per-frame snapshot of the rendered items
//!   ([`VisibleItem`]) and the viewport, supplied by the host.
//! - [`ReorderState`]: the state machine. Hosts feed it pointer events, layout
//!   changes, and frame ticks; it reports through [`DragUpdate`] values and
//!   [`ReorderHandler`] callbacks.
//! - [`resolve_target`]: the pure drop target rule. The dragged item moves into
//!   the slot its bounding box overlaps the most, and only when that overlap is
//!   strictly larger than the overlap with its own slot.
//! - [`ScrollCommand`] and [`ScrollConsumer`]: the queue from the engine to the
//!   host scroll container, drained per frame or awaited as a task.
//! - [`DragCancelledAnimation`]: what happens to the item's offset on release,
//!   either a snap ([`NoDragCancelledAnimation`]) or a spring
//!   ([`SpringDragCancelledAnimation`]).
//!
//! The crate does not render, hit test drag handles, or own list data. Hosts
//! are responsible for:
//!
//! - Building a [`ListLayout`] after every layout pass.
//! - Reordering their data in [`ReorderHandler::on_move`].
//! - Drawing each item with the translation and layer from
//!   [`ReorderState::appearance`].
//! - Applying scroll commands with a [`ScrollTarget`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Vec2};
//! use understory_reorder::{
//!     AxisProjection, DragUpdate, ItemPosition, ListLayout, ReorderConfig, ReorderState, Span,
//!     VisibleItem, move_item,
//! };
//!
//! let mut items = vec!['a', 'b', 'c'];
//! let (mut state, _scroll) = ReorderState::<char>::new(ReorderConfig::new());
//!
//! let layout_of = |items: &[char]| -> Vec<VisibleItem<char>> {
//!     items
//!         .iter()
//!         .enumerate()
//!         .map(|(i, k)| VisibleItem::new(i, *k, i as f64 * 40.0, 40.0))
//!         .collect()
//! };
//! let viewport = Span::new(0.0, 400.0);
//!
//! let visible = layout_of(&items);
//! let layout = ListLayout::new(&visible, viewport, AxisProjection::VERTICAL);
//! assert!(state.on_drag_start(None, Point::new(10.0, 20.0), &layout));
//!
//! let mut on_move = |from: ItemPosition<char>, to: ItemPosition<char>| {
//!     move_item(&mut items, from.index, to.index);
//! };
//! let update = state.on_drag(None, Vec2::new(0.0, 30.0), 16, &layout, &mut on_move);
//! assert!(matches!(update, DragUpdate::Committed { .. }));
//! state.on_drag_end(None, &mut on_move);
//!
//! assert_eq!(items, ['b', 'a', 'c']);
//! ```

#![no_std]

extern crate alloc;

mod animation;
mod autoscroll;
mod axis;
mod config;
mod handler;
mod item;
mod resolver;
mod scroll;
mod state;

pub use animation::{
    AnimationStatus, DragCancelledAnimation, NoDragCancelledAnimation,
    SpringDragCancelledAnimation, SpringSpec,
};
pub use autoscroll::{autoscroll_delta, out_of_bounds};
pub use axis::{AxisProjection, LayoutDirection, Orientation, Span};
pub use config::{
    DEFAULT_ACCELERATION_LIMIT_MS, DEFAULT_MAX_SCROLL_PER_FRAME, DEFAULT_MIN_SCROLL_STEP,
    ReorderConfig,
};
pub use handler::ReorderHandler;
pub use item::{ItemPosition, ListLayout, VisibleItem, move_item};
pub use resolver::{DropTarget, resolve_target, slot_after_move};
pub use scroll::{
    ScrollCommand, ScrollConsumer, ScrollReceiver, ScrollSender, ScrollTarget, scroll_channel,
};
pub use state::{
    DEFAULT_POINTER, DragPhase, DragState, DragUpdate, ItemAppearance, ItemLayer, PointerId,
    ReorderState,
};
