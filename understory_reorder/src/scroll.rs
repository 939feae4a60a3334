// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll queue between the engine and the host's scroll container.
//!
//! The engine produces [`ScrollCommand`]s while it handles pointer events; a
//! [`ScrollConsumer`] applies them to a [`ScrollTarget`]. Both sides live on the
//! same thread: the queue is unbounded, FIFO, has a single reader, and never
//! blocks the producer. The consumer can be drained synchronously from a frame
//! callback or awaited as a long-lived task that ends once the engine (and any
//! other sender) is dropped.

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::future::poll_fn;
use core::task::{Context, Poll, Waker};

use kurbo::Vec2;

use crate::AxisProjection;

/// A request for the host scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollCommand {
    /// Scroll by `delta` in item-order space.
    By {
        /// Distance in item-order space; positive reveals later items.
        delta: f64,
        /// Projection used to map `delta` back to screen space.
        projection: AxisProjection,
    },
    /// Restore the scroll position to `offset` past the start of item `index`.
    ToItem {
        /// Item to anchor on.
        index: usize,
        /// Scroll offset past the item's leading edge.
        offset: f64,
    },
}

/// A scroll container driven by a [`ScrollConsumer`].
pub trait ScrollTarget {
    /// Scrolls by a screen-space vector along the list axis.
    fn scroll_by(&mut self, delta: Vec2);

    /// Scrolls so that item `index` starts `offset` before the viewport start.
    fn scroll_to_item(&mut self, index: usize, offset: f64);
}

#[derive(Debug)]
struct Shared {
    queue: VecDeque<ScrollCommand>,
    waker: Option<Waker>,
    senders: usize,
}

/// Creates a connected sender/receiver pair.
#[must_use]
pub fn scroll_channel() -> (ScrollSender, ScrollReceiver) {
    let shared = Rc::new(RefCell::new(Shared {
        queue: VecDeque::new(),
        waker: None,
        senders: 1,
    }));
    (
        ScrollSender {
            shared: shared.clone(),
        },
        ScrollReceiver { shared },
    )
}

/// Producer half of the scroll queue.
#[derive(Debug)]
pub struct ScrollSender {
    shared: Rc<RefCell<Shared>>,
}

impl ScrollSender {
    /// Appends a command and wakes a pending receiver.
    pub fn send(&self, command: ScrollCommand) {
        let waker = {
            let mut shared = self.shared.borrow_mut();
            shared.queue.push_back(command);
            shared.waker.take()
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

impl Clone for ScrollSender {
    fn clone(&self) -> Self {
        self.shared.borrow_mut().senders += 1;
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl Drop for ScrollSender {
    fn drop(&mut self) {
        let waker = {
            let mut shared = self.shared.borrow_mut();
            shared.senders -= 1;
            if shared.senders == 0 {
                shared.waker.take()
            } else {
                None
            }
        };
        if let Some(waker) = waker {
            waker.wake();
        }
    }
}

/// Consumer half of the scroll queue.
#[derive(Debug)]
pub struct ScrollReceiver {
    shared: Rc<RefCell<Shared>>,
}

impl ScrollReceiver {
    /// Takes the oldest queued command, if any.
    pub fn try_recv(&mut self) -> Option<ScrollCommand> {
        self.shared.borrow_mut().queue.pop_front()
    }

    /// Polls for the next command.
    ///
    /// Resolves to `None` once the queue is empty and every sender is gone.
    pub fn poll_recv(&mut self, cx: &mut Context<'_>) -> Poll<Option<ScrollCommand>> {
        let mut shared = self.shared.borrow_mut();
        if let Some(command) = shared.queue.pop_front() {
            return Poll::Ready(Some(command));
        }
        if shared.senders == 0 {
            return Poll::Ready(None);
        }
        shared.waker = Some(cx.waker().clone());
        Poll::Pending
    }

    /// Waits for the next command.
    pub async fn recv(&mut self) -> Option<ScrollCommand> {
        poll_fn(|cx| self.poll_recv(cx)).await
    }

    /// Number of queued commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shared.borrow().queue.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` once every sender has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.borrow().senders == 0
    }
}

/// Applies queued [`ScrollCommand`]s to a [`ScrollTarget`].
#[derive(Debug)]
pub struct ScrollConsumer<T> {
    receiver: ScrollReceiver,
    target: T,
}

impl<T: ScrollTarget> ScrollConsumer<T> {
    /// Creates a consumer over `receiver` driving `target`.
    pub fn new(receiver: ScrollReceiver, target: T) -> Self {
        Self { receiver, target }
    }

    /// The driven scroll container.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutable access to the driven scroll container.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Applies one command.
    ///
    /// Item-order deltas are mapped through their projection, so reversed
    /// layouts and right-to-left rows scroll with the opposite screen sign.
    pub fn apply(&mut self, command: ScrollCommand) {
        match command {
            ScrollCommand::By { delta, projection } => {
                self.target.scroll_by(projection.to_screen(delta));
            }
            ScrollCommand::ToItem { index, offset } => {
                self.target.scroll_to_item(index, offset);
            }
        }
    }

    /// Applies every queued command and returns how many there were.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Some(command) = self.receiver.try_recv() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    /// Applies commands as they arrive until every sender is dropped.
    ///
    /// Returns the scroll target once the queue closes.
    pub async fn run(mut self) -> T {
        while let Some(command) = self.receiver.recv().await {
            self.apply(command);
        }
        log::trace!("scroll queue closed");
        self.target
    }

    /// Splits the consumer back into its parts.
    pub fn into_parts(self) -> (ScrollReceiver, T) {
        (self.receiver, self.target)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::future::Future;
    use core::pin::pin;

    use super::*;
    use crate::LayoutDirection;

    #[derive(Debug, Default)]
    struct Recorder {
        scrolled: Vec<Vec2>,
        anchored: Vec<(usize, f64)>,
    }

    impl ScrollTarget for Recorder {
        fn scroll_by(&mut self, delta: Vec2) {
            self.scrolled.push(delta);
        }

        fn scroll_to_item(&mut self, index: usize, offset: f64) {
            self.anchored.push((index, offset));
        }
    }

    fn by(delta: f64, projection: AxisProjection) -> ScrollCommand {
        ScrollCommand::By { delta, projection }
    }

    #[test]
    fn queue_is_fifo() {
        let (tx, mut rx) = scroll_channel();
        tx.send(by(1.0, AxisProjection::VERTICAL));
        tx.send(ScrollCommand::ToItem { index: 3, offset: 4.0 });
        tx.send(by(2.0, AxisProjection::VERTICAL));
        assert_eq!(rx.len(), 3);
        assert_eq!(rx.try_recv(), Some(by(1.0, AxisProjection::VERTICAL)));
        assert_eq!(rx.try_recv(), Some(ScrollCommand::ToItem { index: 3, offset: 4.0 }));
        assert_eq!(rx.try_recv(), Some(by(2.0, AxisProjection::VERTICAL)));
        assert_eq!(rx.try_recv(), None);
        assert!(rx.is_empty());
    }

    #[test]
    fn drain_applies_projection_sign() {
        let (tx, rx) = scroll_channel();
        let mut consumer = ScrollConsumer::new(rx, Recorder::default());
        tx.send(by(5.0, AxisProjection::VERTICAL));
        tx.send(by(5.0, AxisProjection::VERTICAL.with_reverse_layout(true)));
        tx.send(by(
            5.0,
            AxisProjection::HORIZONTAL.with_direction(LayoutDirection::Rtl),
        ));
        tx.send(ScrollCommand::ToItem { index: 2, offset: 7.5 });
        assert_eq!(consumer.drain(), 4);
        assert_eq!(
            consumer.target().scrolled,
            [Vec2::new(0.0, 5.0), Vec2::new(0.0, -5.0), Vec2::new(-5.0, 0.0)]
        );
        assert_eq!(consumer.target().anchored, [(2, 7.5)]);
        assert_eq!(consumer.drain(), 0);
    }

    #[test]
    fn run_waits_for_commands_and_ends_when_senders_drop() {
        let (tx, rx) = scroll_channel();
        let extra = tx.clone();
        let consumer = ScrollConsumer::new(rx, Recorder::default());
        let mut cx = Context::from_waker(Waker::noop());
        let mut run = pin!(consumer.run());

        assert!(run.as_mut().poll(&mut cx).is_pending());
        tx.send(by(3.0, AxisProjection::VERTICAL));
        assert!(run.as_mut().poll(&mut cx).is_pending());

        drop(tx);
        assert!(run.as_mut().poll(&mut cx).is_pending());
        extra.send(by(4.0, AxisProjection::VERTICAL));
        drop(extra);

        let Poll::Ready(target) = run.as_mut().poll(&mut cx) else {
            panic!("consumer should finish once all senders are gone");
        };
        assert_eq!(target.scrolled, [Vec2::new(0.0, 3.0), Vec2::new(0.0, 4.0)]);
    }

    #[test]
    fn receiver_reports_closed() {
        let (tx, rx) = scroll_channel();
        assert!(!rx.is_closed());
        drop(tx);
        assert!(rx.is_closed());
    }
}
