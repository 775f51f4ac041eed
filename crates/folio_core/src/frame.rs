//! Frame scheduler
//!
//! Coalesces high-frequency notifications (scroll, resize) into at most one
//! update per rendered frame. The host calls [`FrameScheduler::notify`] from
//! its event handlers and [`FrameScheduler::run_frame`] from its animation
//! frame callback. Nothing is queued: callbacks read the current state of the
//! context themselves, so a burst of notifications loses no information.

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
    /// Handle for a registered frame callback
    pub struct FrameCallbackId;
}

/// Frame callback, given the shared context and timing for the frame
pub type FrameCallback<C> = Box<dyn FnMut(&mut C, &FrameInfo)>;

/// Timing information handed to frame callbacks
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameInfo {
    /// Number of frames that ran before this one
    pub frame: u64,
    /// Host timestamp of this frame in milliseconds
    pub timestamp_ms: f64,
    /// Milliseconds since the previous frame ran (0 for the first frame)
    pub delta_ms: f64,
    /// Notifications folded into this frame
    pub notifications: u32,
}

/// Runs registered callbacks at most once per frame
pub struct FrameScheduler<C> {
    callbacks: SlotMap<FrameCallbackId, FrameCallback<C>>,
    pending: bool,
    notifications: u32,
    frames_run: u64,
    coalesced: u64,
    last_timestamp_ms: Option<f64>,
}

impl<C> FrameScheduler<C> {
    pub fn new() -> Self {
        Self {
            callbacks: SlotMap::with_key(),
            pending: false,
            notifications: 0,
            frames_run: 0,
            coalesced: 0,
            last_timestamp_ms: None,
        }
    }

    /// Register a callback to run on every frame that has pending work
    pub fn register<F>(&mut self, callback: F) -> FrameCallbackId
    where
        F: FnMut(&mut C, &FrameInfo) + 'static,
    {
        self.callbacks.insert(Box::new(callback))
    }

    /// Remove a registered callback
    pub fn unregister(&mut self, id: FrameCallbackId) -> bool {
        self.callbacks.remove(id).is_some()
    }

    /// Record that something changed since the last frame.
    ///
    /// Returns `true` when the host must request an animation frame, which
    /// is only the first notification after a frame has run.
    pub fn notify(&mut self) -> bool {
        self.notifications = self.notifications.saturating_add(1);
        if self.pending {
            self.coalesced += 1;
            return false;
        }
        self.pending = true;
        true
    }

    /// Withdraw a pending frame; its notifications are discarded.
    ///
    /// Returns whether a frame was pending.
    pub fn cancel(&mut self) -> bool {
        self.notifications = 0;
        std::mem::replace(&mut self.pending, false)
    }

    /// Whether a frame has been requested and not yet run
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Run the frame if one is pending.
    ///
    /// Returns `true` if the callbacks ran. The pending flag is cleared
    /// before the callbacks run, so a callback that notifies schedules the
    /// following frame rather than re-running this one.
    pub fn run_frame(&mut self, context: &mut C, timestamp_ms: f64) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;

        let info = FrameInfo {
            frame: self.frames_run,
            timestamp_ms,
            delta_ms: self
                .last_timestamp_ms
                .map(|last| (timestamp_ms - last).max(0.0))
                .unwrap_or(0.0),
            notifications: std::mem::take(&mut self.notifications),
        };
        self.last_timestamp_ms = Some(timestamp_ms);
        self.frames_run += 1;

        trace!(
            frame = info.frame,
            notifications = info.notifications,
            "running frame callbacks"
        );

        for (_, callback) in self.callbacks.iter_mut() {
            callback(context, &info);
        }

        true
    }

    /// Frames that actually ran callbacks
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Notifications absorbed by an already pending frame
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }
}

impl<C> Default for FrameScheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}
