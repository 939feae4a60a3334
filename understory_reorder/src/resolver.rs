// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drop target selection.
//!
//! Resolution is a pure function of the dragged item's slot, its expanded
//! bounding box, and the visible items. List items share the cross-axis extent,
//! so comparing overlap lengths along the list axis ranks candidates the same
//! way overlap areas would.

use crate::{ItemPosition, Span, VisibleItem};

/// The slot a dragged item should move into.
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget<K> {
    /// Position of the item currently holding the slot.
    pub position: ItemPosition<K>,
    /// Slot geometry of that item.
    pub span: Span,
    /// Overlap between the slot and the dragged item's bounding box.
    pub overlap: f64,
}

/// Picks the visible item whose slot the dragged box overlaps the most.
///
/// - `dragging` is the dragged item's current position.
/// - `slot` is where the dragged item currently settles; it competes as the
///   "stay" candidate, so a neighbour only wins when it overlaps the dragged box
///   strictly more than `slot` does.
/// - `dragged_box` is `slot` translated by the accumulated drag offset.
/// - `can_drag_over(candidate, dragging)` can veto candidates.
///
/// Equal overlaps go to the candidate closest to `dragging.index`, then to the
/// lower index. Returns `None` when the item should stay where it is.
pub fn resolve_target<K, F>(
    dragging: &ItemPosition<K>,
    slot: Span,
    dragged_box: Span,
    items: &[VisibleItem<K>],
    mut can_drag_over: F,
) -> Option<DropTarget<K>>
where
    K: Clone + PartialEq,
    F: FnMut(&ItemPosition<K>, &ItemPosition<K>) -> bool,
{
    let stay = slot.overlap(&dragged_box);
    let mut best: Option<(&VisibleItem<K>, f64)> = None;

    for item in items {
        if item.key == dragging.key || item.index == dragging.index {
            continue;
        }
        let overlap = item.span().overlap(&dragged_box);
        if overlap <= 0.0 || overlap <= stay {
            continue;
        }
        if let Some((current, current_overlap)) = best {
            if !outranks(item, overlap, current, current_overlap, dragging.index) {
                continue;
            }
        }
        if !can_drag_over(&item.position(), dragging) {
            continue;
        }
        best = Some((item, overlap));
    }

    best.map(|(item, overlap)| DropTarget {
        position: item.position(),
        span: item.span(),
        overlap,
    })
}

fn outranks<K>(
    item: &VisibleItem<K>,
    overlap: f64,
    current: &VisibleItem<K>,
    current_overlap: f64,
    from: usize,
) -> bool {
    if overlap != current_overlap {
        return overlap > current_overlap;
    }
    let distance = item.index.abs_diff(from);
    let current_distance = current.index.abs_diff(from);
    if distance != current_distance {
        return distance < current_distance;
    }
    item.index < current.index
}

/// Slot the dragged item settles into after moving from `from` into `target`.
///
/// Moving towards higher indices shifts the items in between back by the
/// dragged item's size, so its new slot ends where `target` ended. Moving
/// towards lower indices puts its leading edge where `target` started.
#[must_use]
pub fn slot_after_move<K>(slot: Span, from: usize, target: &DropTarget<K>) -> Span {
    let size = slot.len();
    if target.position.index > from {
        Span::from_offset(target.span.end - size, size)
    } else {
        Span::from_offset(target.span.start, size)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn column(keys: &[char], size: f64) -> Vec<VisibleItem<char>> {
        keys.iter()
            .enumerate()
            .map(|(i, k)| VisibleItem::new(i, *k, i as f64 * size, size))
            .collect()
    }

    fn resolve(items: &[VisibleItem<char>], index: usize, delta: f64) -> Option<DropTarget<char>> {
        let dragged = &items[index];
        let slot = dragged.span();
        resolve_target(
            &dragged.position(),
            slot,
            slot.translate(delta),
            items,
            |_, _| true,
        )
    }

    #[test]
    fn small_drag_stays_in_place() {
        let items = column(&['a', 'b', 'c'], 100.0);
        assert_eq!(resolve(&items, 0, 30.0), None);
        assert_eq!(resolve(&items, 0, 50.0), None);
        assert_eq!(resolve(&items, 1, -40.0), None);
    }

    #[test]
    fn past_halfway_picks_neighbour() {
        let items = column(&['a', 'b', 'c'], 100.0);
        let target = resolve(&items, 0, 60.0).unwrap();
        assert_eq!(target.position, ItemPosition::new(1, 'b'));
        assert_eq!(target.overlap, 60.0);

        let target = resolve(&items, 2, -70.0).unwrap();
        assert_eq!(target.position, ItemPosition::new(1, 'b'));
    }

    #[test]
    fn largest_overlap_wins() {
        let items = column(&['a', 'b', 'c', 'd', 'e'], 100.0);
        let target = resolve(&items, 0, 190.0).unwrap();
        assert_eq!(target.position, ItemPosition::new(2, 'c'));
    }

    #[test]
    fn equal_overlap_prefers_closest_index() {
        let items = column(&['a', 'b', 'c', 'd', 'e'], 100.0);
        // Box covers 150..250: half of `b`, half of `c`.
        let target = resolve(&items, 0, 150.0).unwrap();
        assert_eq!(target.position.key, 'b');

        // Box covers 250..350 from `e`: half of `c`, half of `d`.
        let target = resolve(&items, 4, -150.0).unwrap();
        assert_eq!(target.position.key, 'd');
    }

    #[test]
    fn equal_distance_prefers_lower_index() {
        // The dragged item is larger than its neighbours and overlaps both sides equally.
        let items = [
            VisibleItem::new(0, 'a', 0.0, 40.0),
            VisibleItem::new(1, 'b', 40.0, 20.0),
            VisibleItem::new(2, 'c', 60.0, 40.0),
        ];
        let dragged = &items[1];
        let target = resolve_target(
            &dragged.position(),
            dragged.span(),
            Span::new(10.0, 90.0),
            &items,
            |_, _| true,
        )
        .unwrap();
        assert_eq!(target.position.key, 'a');
    }

    #[test]
    fn vetoed_candidates_are_skipped() {
        let items = column(&['a', 'b', 'c', 'd'], 100.0);
        let dragged = &items[0];
        let slot = dragged.span();
        let target = resolve_target(
            &dragged.position(),
            slot,
            slot.translate(190.0),
            &items,
            |candidate, _| candidate.key != 'c',
        )
        .unwrap();
        assert_eq!(target.position.key, 'b');

        let none = resolve_target(
            &dragged.position(),
            slot,
            slot.translate(60.0),
            &items,
            |_, _| false,
        );
        assert!(none.is_none());
    }

    #[test]
    fn resolution_is_deterministic() {
        let items = column(&['a', 'b', 'c', 'd', 'e', 'f'], 48.0);
        for step in -40..40 {
            let delta = f64::from(step) * 7.5;
            let first = resolve(&items, 2, delta);
            for _ in 0..3 {
                assert_eq!(resolve(&items, 2, delta), first);
            }
        }
    }

    #[test]
    fn slot_after_move_follows_direction() {
        let items = column(&['a', 'b', 'c'], 100.0);
        let slot = items[0].span();
        let forward = resolve(&items, 0, 190.0).unwrap();
        assert_eq!(slot_after_move(slot, 0, &forward), Span::new(200.0, 300.0));

        let slot = items[2].span();
        let back = resolve(&items, 2, -110.0).unwrap();
        assert_eq!(back.position.key, 'b');
        assert_eq!(slot_after_move(slot, 2, &back), Span::new(100.0, 200.0));
    }

    #[test]
    fn uneven_sizes_rebase_to_target_edge() {
        let items = [
            VisibleItem::new(0, 'a', 0.0, 30.0),
            VisibleItem::new(1, 'b', 30.0, 90.0),
        ];
        let slot = items[0].span();
        let target = resolve_target(
            &items[0].position(),
            slot,
            slot.translate(60.0),
            &items,
            |_, _| true,
        )
        .unwrap();
        assert_eq!(slot_after_move(slot, 0, &target), Span::new(90.0, 120.0));
    }
}
