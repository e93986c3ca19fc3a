//! Frame scheduling capability.
//!
//! The stroke loop only needs "run this once on the next frame" and "never
//! mind". In a browser that is `requestAnimationFrame` (or a ~60Hz timer);
//! headless hosts step frames by hand with `ManualScheduler`.

use crate::error::SurfaceError;
use std::cell::RefCell;
use std::rc::Rc;

/// Opaque id of a scheduled frame, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub i32);

pub type FrameCallback = Box<dyn FnOnce()>;

pub trait FrameScheduler {
    /// Run `callback` once, on the next frame.
    fn schedule(&mut self, callback: FrameCallback) -> Result<FrameHandle, SurfaceError>;

    /// Drop a scheduled callback. Unknown or already-run handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

#[derive(Default)]
struct FrameQueue {
    next_id: i32,
    pending: Vec<(FrameHandle, FrameCallback)>,
}

/// A scheduler whose frames advance only when `advance` is called.
///
/// Clones share one queue, so a host can hand one clone to a surface and
/// keep another to drive it.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    queue: Rc<RefCell<FrameQueue>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for the next frame.
    pub fn pending(&self) -> usize {
        self.queue.borrow().pending.len()
    }

    /// Run one frame: every callback scheduled before this call, in order.
    /// Callbacks scheduled while the frame runs wait for the next one.
    /// Returns how many callbacks ran.
    pub fn advance(&self) -> usize {
        let due = std::mem::take(&mut self.queue.borrow_mut().pending);
        let count = due.len();
        for (_, callback) in due {
            callback();
        }
        count
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self, callback: FrameCallback) -> Result<FrameHandle, SurfaceError> {
        let mut queue = self.queue.borrow_mut();
        queue.next_id += 1;
        let handle = FrameHandle(queue.next_id);
        queue.pending.push((handle, callback));
        Ok(handle)
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.queue
            .borrow_mut()
            .pending
            .retain(|(pending, _)| *pending != handle);
    }
}
