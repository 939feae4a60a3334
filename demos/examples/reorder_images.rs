// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless drag-to-reorder over a scrolling list of images.
//!
//! The list holds 20 image URLs, 100px tall each, in a 500px viewport. The
//! example drags the first image past the bottom edge so the list auto-scrolls,
//! drops it, then starts a second drag and cancels it.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example reorder_images`

use kurbo::{Point, Vec2};
use understory_reorder::{
    AxisProjection, DragPhase, ItemPosition, ListLayout, ReorderConfig, ReorderHandler,
    ReorderState, ScrollConsumer, ScrollTarget, Span, VisibleItem,
};

const ITEM_SIZE: f64 = 100.0;
const VIEWPORT: f64 = 500.0;
const FRAME_MS: u64 = 16;

/// The list data, keyed by URL.
#[derive(Debug)]
struct ImageList {
    images: Vec<String>,
}

impl ImageList {
    fn new(count: usize) -> Self {
        Self {
            images: (0..count)
                .map(|i| format!("https://picsum.photos/seed/compose{i}/200/300"))
                .collect(),
        }
    }

    fn visible(&self, scroll: f64) -> Vec<VisibleItem<String>> {
        self.images
            .iter()
            .enumerate()
            .map(|(i, url)| {
                VisibleItem::new(i, url.clone(), i as f64 * ITEM_SIZE - scroll, ITEM_SIZE)
            })
            .filter(|item| item.offset + item.size > 0.0 && item.offset < VIEWPORT)
            .collect()
    }

    fn index_of(&self, key: &str) -> Option<usize> {
        self.images.iter().position(|url| url == key)
    }
}

impl ReorderHandler<String> for ImageList {
    fn on_move(&mut self, from: ItemPosition<String>, to: ItemPosition<String>) {
        // Look both items up by key so a move against stale indices is still correct.
        if let (Some(from), Some(to)) = (self.index_of(&from.key), self.index_of(&to.key)) {
            let image = self.images.remove(from);
            self.images.insert(to, image);
        }
    }

    fn can_drag_over(&mut self, target: &ItemPosition<String>, _: &ItemPosition<String>) -> bool {
        self.index_of(&target.key).is_some()
    }

    fn on_drag_end(&mut self, start_index: usize, end_index: usize) {
        println!("drag ended: start index {start_index}, end index {end_index}");
    }
}

/// Scroll container state; clamped to the content extent.
#[derive(Debug)]
struct Scroller {
    offset: f64,
    max: f64,
    projection: AxisProjection,
}

impl ScrollTarget for Scroller {
    fn scroll_by(&mut self, delta: Vec2) {
        self.offset = (self.offset + self.projection.main(delta)).clamp(0.0, self.max);
    }

    fn scroll_to_item(&mut self, index: usize, offset: f64) {
        self.offset = (index as f64 * ITEM_SIZE + offset).clamp(0.0, self.max);
    }
}

fn short(url: &str) -> &str {
    url.split('/').nth(4).unwrap_or(url)
}

fn print_visible(list: &ImageList, scroll: f64) {
    let keys: Vec<&str> = list
        .visible(scroll)
        .iter()
        .map(|item| short(&list.images[item.index]))
        .collect();
    println!("  scroll {scroll:>6.1}: {keys:?}");
}

fn main() {
    env_logger::init();

    let projection = AxisProjection::VERTICAL;
    let viewport = Span::new(0.0, VIEWPORT);
    let mut list = ImageList::new(20);
    let (mut state, receiver) = ReorderState::<String>::new(ReorderConfig::new());
    let mut scroller = ScrollConsumer::new(
        receiver,
        Scroller {
            offset: 0.0,
            max: list.images.len() as f64 * ITEM_SIZE - VIEWPORT,
            projection,
        },
    );

    println!("== Drag the first image to the bottom edge ==");
    print_visible(&list, 0.0);
    let items = list.visible(0.0);
    let layout = ListLayout::new(&items, viewport, projection);
    assert!(state.on_drag_start(None, Point::new(40.0, 50.0), &layout));

    let mut now = 0;
    // Move down in 20px steps until the image hangs past the bottom, then hold still.
    for step in 0..60 {
        now += FRAME_MS;
        let scroll = scroller.target().offset;
        let items = list.visible(scroll);
        let layout = ListLayout::new(&items, viewport, projection);
        if step < 22 {
            state.on_drag(None, Vec2::new(0.0, 20.0), now, &layout, &mut list);
        } else {
            state.on_layout_changed(now, &layout, &mut list);
        }
        state.on_frame(now, &layout);
        scroller.drain();
    }
    print_visible(&list, scroller.target().offset);
    println!(
        "  dragging {:?} at index {:?}",
        state.dragging_key().map(|url| short(url)),
        state.dragging_index()
    );
    state.on_drag_end(None, &mut list);

    println!("\n== Drag one slot up and cancel ==");
    let scroll = scroller.target().offset;
    let items = list.visible(scroll);
    let layout = ListLayout::new(&items, viewport, projection);
    if state.on_drag_start(None, Point::new(40.0, 250.0), &layout) {
        let start = state.dragging_index();
        state.on_drag(None, Vec2::new(0.0, -120.0), now, &layout, &mut list);
        println!("  moved from {start:?} to {:?}", state.dragging_index());
        state.on_drag_cancel(&mut list);
        while state.phase() == DragPhase::Cancelling {
            now += FRAME_MS;
            let items = list.visible(scroll);
            state.on_frame(now, &ListLayout::new(&items, viewport, projection));
        }
    }
    print_visible(&list, scroller.target().offset);
}
