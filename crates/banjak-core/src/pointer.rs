//! Injectable pointer-tracking service.
//!
//! The host owns one [`PointerTracker`] and feeds it from its mouse event
//! arm, making it the single writer. Every mounted effect holds a
//! [`PointerReader`] and only ever reads. All of this lives on the single UI
//! thread between frame callbacks, so interior mutability is plain
//! `Rc<RefCell>` with no locking.
//!
//! Clicks queue up until the host calls [`PointerTracker::end_frame`], so
//! every instance stepped during a frame sees the same click set.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

/// Clicks beyond this within a single frame are dropped.
const MAX_QUEUED_CLICKS: usize = 8;

#[derive(Debug, Default)]
struct PointerState {
    position: Option<Vec2>,
    clicks: Vec<Vec2>,
    subscribers: usize,
}

/// Host-owned pointer state, written by exactly one event handler.
#[derive(Debug, Default)]
pub struct PointerTracker {
    shared: Rc<RefCell<PointerState>>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer-move.
    pub fn update(&self, pos: Vec2) {
        self.shared.borrow_mut().position = Some(pos);
    }

    /// Queue a click for the current frame.
    pub fn click(&self, pos: Vec2) {
        let mut state = self.shared.borrow_mut();
        if state.clicks.len() < MAX_QUEUED_CLICKS {
            state.clicks.push(pos);
        }
        state.position = Some(pos);
    }

    /// Drain the click queue. Called by the host after every frame drain.
    pub fn end_frame(&self) {
        self.shared.borrow_mut().clicks.clear();
    }

    /// Mount-time subscription; the reader releases it on drop.
    pub fn subscribe(&self) -> PointerReader {
        self.shared.borrow_mut().subscribers += 1;
        PointerReader {
            shared: Rc::clone(&self.shared),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.borrow().subscribers
    }
}

/// Read-only view of the pointer state held by a mounted effect.
#[derive(Debug)]
pub struct PointerReader {
    shared: Rc<RefCell<PointerState>>,
}

impl PointerReader {
    /// Last-known pointer coordinate, if the pointer has ever moved.
    pub fn position(&self) -> Option<Vec2> {
        self.shared.borrow().position
    }

    /// Clicks queued since the previous frame.
    pub fn clicks(&self) -> Vec<Vec2> {
        self.shared.borrow().clicks.clone()
    }
}

impl Drop for PointerReader {
    fn drop(&mut self) {
        let mut state = self.shared.borrow_mut();
        state.subscribers = state.subscribers.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_starts_unknown_then_tracks_moves() {
        let tracker = PointerTracker::new();
        let reader = tracker.subscribe();
        assert_eq!(reader.position(), None);
        tracker.update(Vec2::new(3.0, 4.0));
        assert_eq!(reader.position(), Some(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn subscriptions_release_on_drop() {
        let tracker = PointerTracker::new();
        let a = tracker.subscribe();
        let b = tracker.subscribe();
        assert_eq!(tracker.subscriber_count(), 2);
        drop(a);
        assert_eq!(tracker.subscriber_count(), 1);
        drop(b);
        assert_eq!(tracker.subscriber_count(), 0);
    }

    #[test]
    fn clicks_queue_until_end_frame_and_are_capped() {
        let tracker = PointerTracker::new();
        let reader = tracker.subscribe();
        for i in 0..20 {
            tracker.click(Vec2::new(i as f32, 0.0));
        }
        assert_eq!(reader.clicks().len(), MAX_QUEUED_CLICKS);
        tracker.end_frame();
        assert!(reader.clicks().is_empty());
    }

    #[test]
    fn many_readers_see_the_same_state() {
        let tracker = PointerTracker::new();
        let a = tracker.subscribe();
        let b = tracker.subscribe();
        tracker.click(Vec2::new(1.0, 2.0));
        assert_eq!(a.clicks(), b.clicks());
        assert_eq!(a.position(), b.position());
    }
}
