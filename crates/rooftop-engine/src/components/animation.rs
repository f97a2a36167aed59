//! Frame-counted animation phase.
//!
//! The core only tracks which frame of a sequence is showing; mapping that
//! to sprites is the renderer's business.

/// Advances an animation frame index every `period` simulation frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameCycle {
    period: u32,
    timer: u32,
    frame: usize,
}

impl FrameCycle {
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            timer: 0,
            frame: 0,
        }
    }

    /// Count one simulation frame against a sequence of `frame_count` frames.
    pub fn tick(&mut self, frame_count: usize) {
        self.timer += 1;
        if self.timer >= self.period {
            self.timer = 0;
            self.frame = (self.frame + 1) % frame_count.max(1);
        }
    }

    /// Jump back to the first frame, e.g. when a new sequence starts.
    pub fn restart(&mut self) {
        self.timer = 0;
        self.frame = 0;
    }

    pub fn frame(&self) -> usize {
        self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_phase_toggle() {
        let mut cycle = FrameCycle::new(15);
        for _ in 0..14 {
            cycle.tick(2);
        }
        assert_eq!(cycle.frame(), 0);
        cycle.tick(2);
        assert_eq!(cycle.frame(), 1);
        for _ in 0..15 {
            cycle.tick(2);
        }
        assert_eq!(cycle.frame(), 0);
    }

    #[test]
    fn shorter_sequence_wraps_frame() {
        let mut cycle = FrameCycle::new(1);
        for _ in 0..3 {
            cycle.tick(4);
        }
        assert_eq!(cycle.frame(), 3);
        cycle.tick(2);
        assert_eq!(cycle.frame(), 0);
    }
}
