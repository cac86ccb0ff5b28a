use glam::Vec2;

/// Last known pointer position and movement state.
///
/// Written only when queued input is applied at the start of a tick,
/// read by every simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub pos: Vec2,
    /// True between a move and the idle threshold (or a pointer-leave).
    pub moving: bool,
    /// Timestamp of the last move, in the host's frame clock (ms).
    pub last_move_ms: f64,
    /// Whether any move has been seen since activation.
    pub seen: bool,
    /// The idle clock runs from `last_move_ms` even though no move was seen.
    armed: bool,
}

impl PointerState {
    pub fn new() -> Self {
        Self {
            pos: Vec2::ZERO,
            moving: false,
            last_move_ms: 0.0,
            seen: false,
            armed: false,
        }
    }

    pub fn moved(&mut self, pos: Vec2, at_ms: f64) {
        self.pos = pos;
        self.moving = true;
        self.seen = true;
        self.last_move_ms = at_ms;
    }

    /// Start the idle clock at `at_ms` without a move, so a field that runs
    /// before any pointer input still fades out after the threshold.
    /// No-op once a move was seen or the clock is already running.
    pub fn start_idle_clock(&mut self, at_ms: f64) {
        if self.seen || self.armed {
            return;
        }
        self.armed = true;
        self.last_move_ms = at_ms;
    }

    pub fn left(&mut self) {
        self.moving = false;
    }

    /// Milliseconds since the last move (or the idle clock start), infinity
    /// if neither happened.
    pub fn idle_for(&self, now_ms: f64) -> f64 {
        if self.seen || self.armed {
            (now_ms - self.last_move_ms).max(0.0)
        } else {
            f64::INFINITY
        }
    }

    pub fn is_idle(&self, now_ms: f64, threshold_ms: f64) -> bool {
        self.idle_for(now_ms) >= threshold_ms
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}
