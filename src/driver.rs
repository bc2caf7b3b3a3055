//! Frame scheduling
//!
//! The engine ticks once per display refresh, not on a wall-clock timer. A
//! `FrameScheduler` is the host's refresh signal: the engine asks for the
//! next frame after each tick and cancels the outstanding request on stop.
//! Only one request is ever outstanding.

use std::collections::VecDeque;

/// Identifies one requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host display-refresh signal
pub trait FrameScheduler {
    /// Ask for a callback on the next refresh
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a request; unknown handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }
}

/// Scheduler pumped by hand: headless hosts and tests pull due frames and
/// feed them back to the engine.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queue: VecDeque<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest requested frame that is still live
    pub fn next_due(&mut self) -> Option<FrameHandle> {
        self.queue.pop_front()
    }

    /// Number of outstanding requests
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.queue.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queue.retain(|h| *h != handle);
    }
}
