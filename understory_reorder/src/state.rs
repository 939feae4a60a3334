// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reorder state machine.
//!
//! [`ReorderState`] is driven by discrete host events: pointer down/move/up and
//! cancel, layout changes, and animation frames. Each event reads the current
//! [`ListLayout`] snapshot and reports back through [`ReorderHandler`] callbacks,
//! [`DragUpdate`] values, and the scroll queue.
//!
//! Per gesture the state moves through
//! `Idle → Dragging → (commit → Dragging)* → Idle` for a drop, or
//! `… → Cancelling → Idle` when the item settles with an animation.

use core::num::NonZeroU64;

use kurbo::{Point, Vec2};

use crate::resolver::{resolve_target, slot_after_move};
use crate::{
    AxisProjection, DragCancelledAnimation, ItemPosition, ListLayout, ReorderConfig,
    ReorderHandler, ScrollCommand, ScrollReceiver, ScrollSender, Span,
    SpringDragCancelledAnimation, VisibleItem, autoscroll_delta, scroll_channel,
};

/// Pointer identifier, as delivered by the host input system.
pub type PointerId = NonZeroU64;

/// Pointer assumed when the host does not track pointer ids.
pub const DEFAULT_POINTER: PointerId = NonZeroU64::MIN;

/// Coarse engine phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No drag and no settle animation.
    Idle,
    /// A pointer is dragging an item.
    Dragging,
    /// A released item is animating back into its slot.
    Cancelling,
}

/// Stacking layer for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ItemLayer {
    /// Regular stacking order.
    Normal,
    /// Settling after a release; still drawn above its siblings.
    Settling,
    /// Being dragged; drawn on top.
    Dragged,
}

/// How the renderer should draw one item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemAppearance {
    /// Screen-space translation from the item's laid out position.
    pub translation: Vec2,
    /// Stacking layer.
    pub layer: ItemLayer,
}

impl ItemAppearance {
    /// An item drawn where it is laid out.
    pub const NORMAL: Self = Self {
        translation: Vec2::ZERO,
        layer: ItemLayer::Normal,
    };
}

/// Result of feeding a movement or layout change to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragUpdate<K> {
    /// No active drag for this pointer; the event was not consumed.
    Ignored,
    /// The drag offset changed; no slot change.
    Moved,
    /// The dragged item moved into another slot.
    Committed {
        /// Where the item was.
        from: ItemPosition<K>,
        /// The slot it moved into.
        to: ItemPosition<K>,
    },
}

impl<K> DragUpdate<K> {
    /// Returns `true` if the event belonged to the active drag.
    #[must_use]
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// State of the active drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState<K> {
    /// Key of the dragged item.
    pub key: K,
    /// Pointer driving the drag.
    pub pointer: PointerId,
    /// Index the drag started from.
    pub start_index: usize,
    /// Index of the slot the item currently occupies.
    pub current_index: usize,
    /// Drag offset from the current slot, in item-order space.
    pub offset: f64,
    /// The slot the item currently settles into.
    pub slot: Span,
    /// Projection captured at drag start.
    pub projection: AxisProjection,
    direction: f64,
    autoscroll_since: Option<u64>,
}

impl<K: Clone> DragState<K> {
    /// Current position of the dragged item.
    #[must_use]
    pub fn position(&self) -> ItemPosition<K> {
        ItemPosition::new(self.current_index, self.key.clone())
    }
}

impl<K> DragState<K> {
    /// The slot translated by the drag offset.
    #[must_use]
    pub fn dragged_box(&self) -> Span {
        self.slot.translate(self.offset)
    }

    /// Screen-space translation of the dragged item.
    #[must_use]
    pub fn translation(&self) -> Vec2 {
        self.projection.to_screen(self.offset)
    }

    /// Moves the slot to `slot`, keeping the dragged box where it is.
    fn rebase(&mut self, slot: Span) {
        self.offset -= slot.start - self.slot.start;
        self.slot = slot;
    }
}

/// Drag-to-reorder engine for one list.
///
/// The engine owns the active drag, the settle animation, and the producer
/// side of the scroll queue. The host keeps the matching [`ScrollReceiver`]
/// (usually wrapped in a [`ScrollConsumer`](crate::ScrollConsumer)) alive for
/// as long as the engine; dropping the engine closes the queue.
#[derive(Debug)]
pub struct ReorderState<K, A = SpringDragCancelledAnimation<K>> {
    config: ReorderConfig,
    drag: Option<DragState<K>>,
    animation: A,
    settle_projection: AxisProjection,
    last_frame: Option<u64>,
    sender: ScrollSender,
}

impl<K, A> ReorderState<K, A>
where
    K: Clone + PartialEq + core::fmt::Debug,
    A: DragCancelledAnimation<K> + Default,
{
    /// Creates an engine and the receiving end of its scroll queue.
    #[must_use]
    pub fn new(config: ReorderConfig) -> (Self, ScrollReceiver) {
        Self::with_animation(config, A::default())
    }
}

impl<K, A> ReorderState<K, A>
where
    K: Clone + PartialEq + core::fmt::Debug,
    A: DragCancelledAnimation<K>,
{
    /// Creates an engine with a specific settle animation.
    #[must_use]
    pub fn with_animation(config: ReorderConfig, animation: A) -> (Self, ScrollReceiver) {
        let (sender, receiver) = scroll_channel();
        (
            Self {
                config,
                drag: None,
                animation,
                settle_projection: AxisProjection::default(),
                last_frame: None,
                sender,
            },
            receiver,
        )
    }

    /// The engine configuration.
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// The settle animation.
    pub fn animation(&self) -> &A {
        &self.animation
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        if self.drag.is_some() {
            DragPhase::Dragging
        } else if self.animation.is_running() {
            DragPhase::Cancelling
        } else {
            DragPhase::Idle
        }
    }

    /// The active drag, if any.
    pub fn drag(&self) -> Option<&DragState<K>> {
        self.drag.as_ref()
    }

    /// Key of the item being dragged.
    pub fn dragging_key(&self) -> Option<&K> {
        self.drag.as_ref().map(|drag| &drag.key)
    }

    /// Index of the slot the dragged item occupies.
    pub fn dragging_index(&self) -> Option<usize> {
        self.drag.as_ref().map(|drag| drag.current_index)
    }

    /// Offset of the dragged item from its slot, in item-order space.
    pub fn dragging_offset(&self) -> Option<f64> {
        self.drag.as_ref().map(|drag| drag.offset)
    }

    /// Returns `true` if `key` is under an active drag.
    ///
    /// A settling item is not dragged; use [`Self::appearance`] for stacking.
    pub fn is_dragging(&self, key: &K) -> bool {
        self.drag.as_ref().is_some_and(|drag| drag.key == *key)
    }

    /// How the renderer should draw the item with `key`.
    pub fn appearance(&self, key: &K) -> ItemAppearance {
        if let Some(drag) = self.drag.as_ref().filter(|drag| drag.key == *key) {
            return ItemAppearance {
                translation: drag.translation(),
                layer: ItemLayer::Dragged,
            };
        }
        match self.animation.position() {
            Some(position) if position.key == *key => ItemAppearance {
                translation: self.settle_projection.to_screen(self.animation.offset()),
                layer: ItemLayer::Settling,
            },
            _ => ItemAppearance::NORMAL,
        }
    }

    /// Starts a drag on the item under `position`.
    ///
    /// `position` is relative to the list's own origin. Returns `false`, without
    /// changing anything, when no visible item is under the pointer or a drag
    /// is already active.
    pub fn on_drag_start(
        &mut self,
        pointer: Option<PointerId>,
        position: Point,
        layout: &ListLayout<'_, K>,
    ) -> bool {
        if self.drag.is_some() {
            return false;
        }
        let pos = layout.projection.axis_position(position, layout.viewport);
        match layout.item_at(pos) {
            Some(item) => {
                self.begin(pointer, item, layout.projection);
                true
            }
            None => false,
        }
    }

    /// Starts a drag on the item with `key`, for hosts that hit test their own drag handles.
    pub fn on_drag_start_key(
        &mut self,
        pointer: Option<PointerId>,
        key: &K,
        layout: &ListLayout<'_, K>,
    ) -> bool {
        if self.drag.is_some() {
            return false;
        }
        match layout.item_by_key(key) {
            Some(item) => {
                self.begin(pointer, item, layout.projection);
                true
            }
            None => false,
        }
    }

    fn begin(
        &mut self,
        pointer: Option<PointerId>,
        item: &VisibleItem<K>,
        projection: AxisProjection,
    ) {
        if self.animation.is_running() {
            self.animation.finish();
        }
        log::debug!("drag start: key {:?} at index {}", item.key, item.index);
        self.drag = Some(DragState {
            key: item.key.clone(),
            pointer: pointer.unwrap_or(DEFAULT_POINTER),
            start_index: item.index,
            current_index: item.index,
            offset: 0.0,
            slot: item.span(),
            projection,
            direction: 0.0,
            autoscroll_since: None,
        });
    }

    /// Feeds a pointer movement (screen space) to the active drag.
    ///
    /// Moves from a pointer other than the dragging one are ignored.
    pub fn on_drag<H: ReorderHandler<K>>(
        &mut self,
        pointer: Option<PointerId>,
        delta: Vec2,
        timestamp: u64,
        layout: &ListLayout<'_, K>,
        handler: &mut H,
    ) -> DragUpdate<K> {
        let pointer = pointer.unwrap_or(DEFAULT_POINTER);
        match self.drag.as_mut() {
            Some(drag) if drag.pointer == pointer => {
                let axis = drag.projection.axis_delta(delta);
                drag.offset += axis;
                if axis != 0.0 {
                    drag.direction = axis.signum();
                }
            }
            _ => return DragUpdate::Ignored,
        }
        self.update(timestamp, layout, handler)
    }

    /// Re-evaluates the drag after the visible items changed, for example after a scroll.
    pub fn on_layout_changed<H: ReorderHandler<K>>(
        &mut self,
        timestamp: u64,
        layout: &ListLayout<'_, K>,
        handler: &mut H,
    ) -> DragUpdate<K> {
        if self.drag.is_none() {
            return DragUpdate::Ignored;
        }
        self.update(timestamp, layout, handler)
    }

    /// Advances animations and continues a running auto-scroll.
    ///
    /// Returns `true` while another frame is needed.
    pub fn on_frame(&mut self, timestamp: u64, layout: &ListLayout<'_, K>) -> bool {
        let dt = self
            .last_frame
            .map_or(0, |last| timestamp.saturating_sub(last));
        self.last_frame = Some(timestamp);

        if self.animation.is_running() {
            self.animation.tick(dt);
        }

        let mut scrolling = false;
        if let Some(drag) = self.drag.as_mut()
            && let Some(since) = drag.autoscroll_since
        {
            // Without a usable layout the run is kept alive until one arrives.
            scrolling = true;
            if sync_slot(drag, layout) {
                let delta = autoscroll_delta(
                    drag.dragged_box(),
                    layout.viewport,
                    drag.direction,
                    timestamp.saturating_sub(since),
                    &self.config,
                );
                if delta == 0.0 {
                    drag.autoscroll_since = None;
                    scrolling = false;
                } else {
                    log::trace!("auto-scroll by {delta}");
                    self.sender.send(ScrollCommand::By {
                        delta,
                        projection: drag.projection,
                    });
                }
            }
        }

        let needs_frame = scrolling || self.animation.is_running();
        if !needs_frame {
            // The next settle or auto-scroll run starts its own clock.
            self.last_frame = None;
        }
        needs_frame
    }

    /// Ends the drag of `pointer` with a drop.
    ///
    /// Returns `false` if that pointer was not dragging.
    pub fn on_drag_end<H: ReorderHandler<K>>(
        &mut self,
        pointer: Option<PointerId>,
        handler: &mut H,
    ) -> bool {
        let pointer = pointer.unwrap_or(DEFAULT_POINTER);
        if !self.drag.as_ref().is_some_and(|drag| drag.pointer == pointer) {
            return false;
        }
        self.finish(self.config.animate_drop, handler)
    }

    /// Cancels the active drag and animates the item back into its slot.
    ///
    /// Safe in any phase; returns `false` when there was nothing to cancel.
    pub fn on_drag_cancel<H: ReorderHandler<K>>(&mut self, handler: &mut H) -> bool {
        self.finish(true, handler)
    }

    fn finish<H: ReorderHandler<K>>(&mut self, animate: bool, handler: &mut H) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        log::debug!(
            "drag end: key {:?} from index {} to {}",
            drag.key,
            drag.start_index,
            drag.current_index
        );
        if animate {
            self.settle_projection = drag.projection;
            self.animation.start(drag.position(), drag.offset);
        }
        handler.on_drag_end(drag.start_index, drag.current_index);
        true
    }

    fn update<H: ReorderHandler<K>>(
        &mut self,
        timestamp: u64,
        layout: &ListLayout<'_, K>,
        handler: &mut H,
    ) -> DragUpdate<K> {
        let Some(drag) = self.drag.as_mut() else {
            return DragUpdate::Ignored;
        };
        if !sync_slot(drag, layout) {
            return DragUpdate::Moved;
        }

        let dragging = drag.position();
        let target = resolve_target(
            &dragging,
            drag.slot,
            drag.dragged_box(),
            layout.items,
            |candidate, dragging| handler.can_drag_over(candidate, dragging),
        );

        let result = match target {
            Some(target) => {
                let from = dragging;
                let to = target.position.clone();
                log::debug!("drag commit: {:?} -> {:?}", from, to);
                handler.on_move(from.clone(), to.clone());
                if from.index == layout.first_visible_index
                    || to.index == layout.first_visible_index
                {
                    self.sender.send(ScrollCommand::ToItem {
                        index: layout.first_visible_index,
                        offset: layout.first_visible_offset,
                    });
                }
                drag.rebase(slot_after_move(drag.slot, from.index, &target));
                drag.current_index = to.index;
                DragUpdate::Committed { from, to }
            }
            None => DragUpdate::Moved,
        };

        let delta = autoscroll_delta(
            drag.dragged_box(),
            layout.viewport,
            drag.direction,
            0,
            &self.config,
        );
        if delta == 0.0 {
            drag.autoscroll_since = None;
        } else if drag.autoscroll_since.is_none() {
            log::trace!("auto-scroll start by {delta}");
            drag.autoscroll_since = Some(timestamp);
            self.sender.send(ScrollCommand::By {
                delta,
                projection: drag.projection,
            });
        }

        result
    }
}

/// Moves the drag's slot to where `layout` shows the dragged item.
///
/// Returns `false` when the layout cannot be used: the item is not visible, or
/// the host has not yet laid out the result of the last commit.
fn sync_slot<K: PartialEq + core::fmt::Debug>(
    drag: &mut DragState<K>,
    layout: &ListLayout<'_, K>,
) -> bool {
    match layout.item_by_key(&drag.key) {
        Some(item) if item.index == drag.current_index => {
            drag.rebase(item.span());
            true
        }
        Some(item) => {
            log::trace!(
                "stale layout: {:?} at index {}, expected {}",
                drag.key,
                item.index,
                drag.current_index
            );
            false
        }
        None => false,
    }
}
