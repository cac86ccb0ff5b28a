/// Fixed-step clock driven by display-refresh timestamps.
///
/// Frame callbacks arrive at whatever rate the display runs (60Hz, 120Hz,
/// throttled background tabs). All per-step tuning constants are expressed
/// per 1/60 s step, so real elapsed milliseconds are converted into a whole
/// number of steps here.
#[derive(Debug, Clone)]
pub struct StepClock {
    /// Length of one simulation step in milliseconds.
    step_ms: f64,
    /// Upper bound on steps run for a single frame.
    max_steps: u32,
    /// Timestamp of the previous frame, `None` right after a (re)start.
    last_ms: Option<f64>,
    /// Carried-over time that did not fill a whole step.
    accumulator: f64,
}

impl StepClock {
    pub fn new(step_ms: f64, max_steps: u32) -> Self {
        Self {
            step_ms: step_ms.max(1.0),
            max_steps: max_steps.max(1),
            last_ms: None,
            accumulator: 0.0,
        }
    }

    /// Feed the current frame timestamp. Returns the number of steps to run.
    ///
    /// The first frame after construction or `reset` always runs one step.
    /// Long gaps (tab switch, debugger pause) are capped at `max_steps`.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let Some(last) = self.last_ms.replace(now_ms) else {
            self.accumulator = 0.0;
            return 1;
        };

        self.accumulator += (now_ms - last).max(0.0);
        self.accumulator = self.accumulator.min(self.step_ms * self.max_steps as f64);
        let steps = (self.accumulator / self.step_ms) as u32;
        self.accumulator -= steps as f64 * self.step_ms;
        steps
    }

    /// Forget the previous timestamp. Call when the loop pauses so the
    /// resume frame does not see the whole pause as elapsed time.
    pub fn reset(&mut self) {
        self.last_ms = None;
        self.accumulator = 0.0;
    }

    /// The fixed step length in milliseconds.
    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }
}
