//! Cooperative frame scheduler.
//!
//! The host owns one [`FrameScheduler`] and drains it once per display
//! frame. Each mounted effect keeps itself alive as a chain of one-shot
//! callbacks: the callback runs, returns [`FrameFlow::Continue`], and is
//! re-armed for the next drain. Everything happens on the single UI thread;
//! there is no preemption and no ordering guarantee between chains.
//!
//! Cancellation is the one correctness-sensitive contract here: once a
//! chain's token is cancelled (or its handle removed), no later drain may
//! fire it. The token is checked both before invoking a callback and before
//! re-arming it, so a callback firing against a disposed effect is
//! structurally impossible rather than caught-and-ignored.

use std::cell::Cell;
use std::rc::Rc;

/// Timing information handed to every frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTick {
    /// Milliseconds since the host started animating.
    pub elapsed_ms: u64,
    /// Milliseconds since the previous drain.
    pub delta_ms: u64,
}

/// What a frame callback wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFlow {
    /// Re-arm for the next drain.
    Continue,
    /// End the chain.
    Stop,
}

/// Shared single-threaded cancellation flag. Cloning shares the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent.
    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

/// Identity of a pending callback chain, stable across re-arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(u64);

type FrameCallback = Box<dyn FnMut(FrameTick) -> FrameFlow>;

struct Entry {
    id: u64,
    token: CancelToken,
    callback: FrameCallback,
}

/// Queue of pending frame callbacks, drained once per host frame.
#[derive(Default)]
pub struct FrameScheduler {
    pending: Vec<Entry>,
    next_id: u64,
    frames_run: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a one-shot callback guarded by `token`.
    pub fn request_frame(
        &mut self,
        token: &CancelToken,
        callback: impl FnMut(FrameTick) -> FrameFlow + 'static,
    ) -> FrameHandle {
        self.next_id += 1;
        self.pending.push(Entry {
            id: self.next_id,
            token: token.clone(),
            callback: Box::new(callback),
        });
        FrameHandle(self.next_id)
    }

    /// Synchronously remove a pending chain. Safe to call with a handle that
    /// already fired or was already cancelled.
    pub fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|e| e.id != handle.0);
    }

    /// Drain the queue once. Cancelled entries are dropped without firing;
    /// the rest run and re-arm themselves if they return
    /// [`FrameFlow::Continue`]. Entries queued during the drain (including
    /// re-arms) never fire in the same drain.
    pub fn run_frame(&mut self, tick: FrameTick) {
        self.frames_run += 1;
        let drained = std::mem::take(&mut self.pending);
        for mut entry in drained {
            if entry.token.is_cancelled() {
                continue;
            }
            if (entry.callback)(tick) == FrameFlow::Continue && !entry.token.is_cancelled() {
                self.pending.push(entry);
            }
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }
}
