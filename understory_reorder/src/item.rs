// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item identity and per-frame layout snapshots.

use alloc::vec::Vec;

use crate::{AxisProjection, Span};

/// A list slot: its current index plus the stable key of the item in it.
///
/// The key survives reorders, the index does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemPosition<K> {
    /// Index in the list at the time the position was captured.
    pub index: usize,
    /// Stable item key.
    pub key: K,
}

impl<K> ItemPosition<K> {
    /// Creates a new position.
    pub const fn new(index: usize, key: K) -> Self {
        Self { index, key }
    }
}

/// Geometry of one rendered item along the list axis.
///
/// `offset` is the leading edge in item-order space, so offsets grow with
/// `index` even for reversed layouts.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleItem<K> {
    /// Index in the list.
    pub index: usize,
    /// Stable item key.
    pub key: K,
    /// Leading edge along the list axis.
    pub offset: f64,
    /// Extent along the list axis.
    pub size: f64,
}

impl<K> VisibleItem<K> {
    /// Creates a new visible item record.
    pub const fn new(index: usize, key: K, offset: f64, size: f64) -> Self {
        Self {
            index,
            key,
            offset,
            size,
        }
    }

    /// The slot this item occupies.
    #[must_use]
    pub fn span(&self) -> Span {
        Span::from_offset(self.offset, self.size)
    }
}

impl<K: Clone> VisibleItem<K> {
    /// Position (index and key) of this item.
    #[must_use]
    pub fn position(&self) -> ItemPosition<K> {
        ItemPosition::new(self.index, self.key.clone())
    }
}

/// Snapshot of the host list's layout for one frame.
///
/// The engine only reads from it; hosts rebuild it after every layout pass.
#[derive(Debug, Clone, Copy)]
pub struct ListLayout<'a, K> {
    /// Currently rendered items, in index order.
    pub items: &'a [VisibleItem<K>],
    /// Visible region of the list in item-order space.
    pub viewport: Span,
    /// Index of the first visible item.
    pub first_visible_index: usize,
    /// How far the first visible item is scrolled past the viewport start.
    pub first_visible_offset: f64,
    /// Screen projection of the list axis.
    pub projection: AxisProjection,
}

impl<'a, K: PartialEq> ListLayout<'a, K> {
    /// Creates a snapshot from visible items and the viewport span.
    ///
    /// The first visible index and scroll offset are derived from the first
    /// item intersecting the viewport.
    pub fn new(items: &'a [VisibleItem<K>], viewport: Span, projection: AxisProjection) -> Self {
        let first = items
            .iter()
            .find(|item| item.offset + item.size > viewport.start);
        Self {
            items,
            viewport,
            first_visible_index: first.map_or(0, |item| item.index),
            first_visible_offset: first.map_or(0.0, |item| (viewport.start - item.offset).max(0.0)),
            projection,
        }
    }

    /// Looks up a visible item by key.
    pub fn item_by_key(&self, key: &K) -> Option<&'a VisibleItem<K>> {
        self.items.iter().find(|item| item.key == *key)
    }

    /// Looks up the visible item whose slot contains `pos`.
    pub fn item_at(&self, pos: f64) -> Option<&'a VisibleItem<K>> {
        self.items.iter().find(|item| item.span().contains(pos))
    }
}

/// Moves the element at `from` to `to`, shifting the elements in between.
///
/// This is the edit a host applies to its backing list inside
/// [`ReorderHandler::on_move`](crate::ReorderHandler::on_move). Out of range
/// indices leave the list untouched and return `false`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from != to {
        let item = items.remove(from);
        items.insert(to, item);
    }
    true
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn move_item_forward_and_back() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e'];
        assert!(move_item(&mut v, 0, 2));
        assert_eq!(v, vec!['b', 'c', 'a', 'd', 'e']);
        assert!(move_item(&mut v, 4, 1));
        assert_eq!(v, vec!['b', 'e', 'c', 'a', 'd']);
    }

    #[test]
    fn move_item_out_of_range_is_rejected() {
        let mut v = vec![1, 2, 3];
        assert!(!move_item(&mut v, 3, 0));
        assert!(!move_item(&mut v, 0, 3));
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn layout_derives_first_visible() {
        let items = [
            VisibleItem::new(3, 'a', 0.0, 50.0),
            VisibleItem::new(4, 'b', 50.0, 50.0),
            VisibleItem::new(5, 'c', 100.0, 50.0),
        ];
        let layout = ListLayout::new(&items, Span::new(60.0, 160.0), AxisProjection::VERTICAL);
        assert_eq!(layout.first_visible_index, 4);
        assert_eq!(layout.first_visible_offset, 10.0);
        assert_eq!(layout.item_at(120.0).map(|i| i.key), Some('c'));
        assert_eq!(layout.item_by_key(&'a').map(|i| i.index), Some(3));
        assert!(layout.item_by_key(&'z').is_none());
    }
}
