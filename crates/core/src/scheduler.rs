//! Frame scheduling: the host primitive that paces the animation.
//!
//! A scheduler hands out a [`FrameHandle`] per requested frame and later
//! fires it (on the next display refresh in a browser, on [`FrameQueue::next_due`]
//! headless). The effect keeps the handle so it can cancel the frame.

use crate::error::FlowError;
use std::collections::VecDeque;

/// Opaque identifier of one requested frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

/// Requests and cancels frames.
pub trait FrameScheduler {
    /// Asks for one callback on the next refresh.
    fn request_frame(&mut self) -> Result<FrameHandle, FlowError>;

    /// Withdraws a request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Deterministic in-process scheduler.
///
/// Requests queue up in order; the driver pulls them with
/// [`next_due`](FrameQueue::next_due) and hands each to the effect. Used by
/// the CLI and by tests to single-step an animation.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest pending frame, if any.
    pub fn next_due(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> Result<FrameHandle, FlowError> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|&h| h != handle);
    }
}
