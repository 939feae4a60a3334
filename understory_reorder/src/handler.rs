// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host callbacks.

use crate::ItemPosition;

/// Callbacks the engine invokes while a drag is in progress.
///
/// Handlers are passed to each event method rather than stored in the engine,
/// so a host can implement this trait directly on the state that owns its
/// list data. Any `FnMut(ItemPosition<K>, ItemPosition<K>)` closure is a handler
/// that only reacts to moves.
pub trait ReorderHandler<K> {
    /// The dragged item moved from `from` into the slot of `to`.
    ///
    /// Hosts reorder their backing data here, typically with
    /// [`move_item`](crate::move_item).
    fn on_move(&mut self, from: ItemPosition<K>, to: ItemPosition<K>);

    /// Whether `dragging` may be moved into the slot held by `target`.
    ///
    /// Returning `false` excludes `target` from the candidates, for example to
    /// keep pinned items in place.
    fn can_drag_over(&mut self, target: &ItemPosition<K>, dragging: &ItemPosition<K>) -> bool {
        let _ = (target, dragging);
        true
    }

    /// The drag that started at `start_index` ended at `end_index`.
    ///
    /// Called for both a drop and a cancel.
    fn on_drag_end(&mut self, start_index: usize, end_index: usize) {
        let _ = (start_index, end_index);
    }
}

impl<K, F> ReorderHandler<K> for F
where
    F: FnMut(ItemPosition<K>, ItemPosition<K>),
{
    fn on_move(&mut self, from: ItemPosition<K>, to: ItemPosition<K>) {
        self(from, to);
    }
}
