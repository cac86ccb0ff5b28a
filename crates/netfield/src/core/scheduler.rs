/// Whether the frame loop is currently scheduling frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No frame scheduled. Pointer input or activation wakes the loop.
    Idle,
    /// A frame is requested after every tick.
    Running,
}

/// Frame loop state machine.
///
/// Pure bookkeeping: the host owns the actual display callback, and asks
/// the scheduler whether to request or cancel one.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    state: LoopState,
    /// A frame request is outstanding with the host.
    pending: bool,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            pending: false,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending
    }

    /// Idle → Running. Returns true when the caller must request a frame.
    pub fn wake(&mut self) -> bool {
        if self.state == LoopState::Running {
            return false;
        }
        self.state = LoopState::Running;
        self.request()
    }

    /// Mark an outstanding frame request. Returns false if one already exists.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// The host delivered the requested frame.
    pub fn frame_fired(&mut self) {
        self.pending = false;
    }

    /// Running → Idle once everything has faded.
    pub fn pause(&mut self) {
        self.state = LoopState::Idle;
    }

    /// Force Idle. Returns true when an outstanding frame must be cancelled.
    pub fn stop(&mut self) -> bool {
        self.state = LoopState::Idle;
        std::mem::take(&mut self.pending)
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}
