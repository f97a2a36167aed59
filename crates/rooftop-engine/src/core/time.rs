/// Converts variable host frame times into whole simulation frames.
///
/// The simulation is frame-based: one `World::step` is one fixed frame, and
/// every timer in the core counts those frames. The clock only decides how
/// many steps a host callback should run.
pub struct FrameClock {
    /// Seconds per simulation frame.
    step: f32,
    /// Leftover host time not yet consumed by a step.
    accumulator: f32,
    /// Upper bound on steps per host callback.
    max_catch_up: u32,
    /// Total frames handed out since creation.
    frame: u64,
}

impl FrameClock {
    pub const DEFAULT_MAX_CATCH_UP: u32 = 10;

    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_catch_up: Self::DEFAULT_MAX_CATCH_UP,
            frame: 0,
        }
    }

    pub fn with_max_catch_up(mut self, steps: u32) -> Self {
        self.max_catch_up = steps.max(1);
        self
    }

    /// Add host time. Returns the number of simulation frames to run now.
    pub fn advance(&mut self, host_dt: f32) -> u32 {
        self.accumulator += host_dt.max(0.0);
        // Drop time beyond the catch-up cap instead of spiralling.
        self.accumulator = self.accumulator.min(self.step * self.max_catch_up as f32);
        let steps = (self.accumulator / self.step) as u32;
        self.accumulator -= steps as f32 * self.step;
        self.frame += steps as u64;
        steps
    }

    /// Fraction of a frame left in the accumulator (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Frames handed out so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Forget leftover time, e.g. after the host was suspended.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
