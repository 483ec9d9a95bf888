//! Frame timing
//!
//! The game advances in whole-millisecond frames handed in by the host loop.
//! `FrameClock` replaces a process-wide master timer: whoever owns the level
//! owns its clock.

/// Accumulating frame clock driven by explicit millisecond deltas
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    elapsed: u64,
    frame_count: u64,
    last_delta: u32,
}

impl FrameClock {
    /// Create a new clock at time zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by one frame of `delta` milliseconds
    pub fn tick(&mut self, delta: u32) {
        self.elapsed += u64::from(delta);
        self.frame_count += 1;
        self.last_delta = delta;
    }

    /// Total elapsed milliseconds
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Number of frames ticked so far
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Delta of the most recent frame in milliseconds
    pub fn last_delta(&self) -> u32 {
        self.last_delta
    }

    /// Whether the most recent tick was the very first one
    pub fn is_first_frame(&self) -> bool {
        self.frame_count == 1
    }

    /// Whether the most recent tick carried the clock across a multiple of `period`
    pub fn crossed(&self, period: u64) -> bool {
        if period == 0 || self.frame_count == 0 {
            return false;
        }
        let before = self.elapsed - u64::from(self.last_delta);
        before / period != self.elapsed / period
    }

    /// Reset to time zero
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_accumulates() {
        let mut clock = FrameClock::new();
        clock.tick(16);
        assert!(clock.is_first_frame());
        clock.tick(17);
        assert_eq!(clock.elapsed(), 33);
        assert_eq!(clock.frame(), 2);
        assert!(!clock.is_first_frame());
    }

    #[test]
    fn test_crossed_period() {
        let mut clock = FrameClock::new();
        clock.tick(4990);
        assert!(!clock.crossed(5000));
        clock.tick(20);
        assert!(clock.crossed(5000));
        clock.tick(20);
        assert!(!clock.crossed(5000));
    }
}
