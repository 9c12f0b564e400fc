/// Token for one scheduled frame.
///
/// Returned by [`FrameScheduler::request`]; pass it to [`FrameScheduler::cancel`] to
/// withdraw the request. Handles are never reused within one scheduler.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Single-slot frame request queue.
///
/// At most one frame is pending at any time, so a restarted animation loop can never run
/// alongside the loop it replaced.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl FrameScheduler {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules the next frame, superseding any request still pending.
    pub fn request(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        if let Some(prev) = self.pending.replace(handle) {
            log::debug!("frame request {} superseded by {}", prev.id(), handle.id());
        }
        handle
    }

    /// Withdraws `handle` if it is still pending. Returns whether anything was cancelled.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[inline]
    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Takes the pending request, if any. Called by the runtime when the frame is due.
    #[inline]
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_then_fire() {
        let mut s = FrameScheduler::new();
        let h = s.request();
        assert!(s.is_pending());
        assert_eq!(s.fire(), Some(h));
        assert!(!s.is_pending());
        assert_eq!(s.fire(), None);
    }

    #[test]
    fn at_most_one_request_is_pending() {
        let mut s = FrameScheduler::new();
        let first = s.request();
        let second = s.request();
        assert_ne!(first, second);
        assert_eq!(s.pending(), Some(second));
        assert_eq!(s.fire(), Some(second));
        assert_eq!(s.fire(), None);
    }

    #[test]
    fn cancel_pending_request() {
        let mut s = FrameScheduler::new();
        let h = s.request();
        assert!(s.cancel(h));
        assert!(!s.is_pending());
        assert!(!s.cancel(h));
    }

    #[test]
    fn cancel_stale_handle_keeps_current_request() {
        let mut s = FrameScheduler::new();
        let stale = s.request();
        let live = s.request();
        assert!(!s.cancel(stale));
        assert_eq!(s.pending(), Some(live));
    }

    #[test]
    fn handles_are_not_reused() {
        let mut s = FrameScheduler::new();
        let a = s.request();
        s.fire();
        let b = s.request();
        assert_ne!(a, b);
    }
}
