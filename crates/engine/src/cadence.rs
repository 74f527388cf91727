/// Fixed-period timer fed by elapsed milliseconds from the frame loop.
///
/// A disarmed cadence ignores time entirely, so a stopped countdown or
/// spawner can never fire late.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    period_ms: u32,
    accumulator_ms: u32,
    armed: bool,
}

impl Cadence {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            accumulator_ms: 0,
            armed: false,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Start counting from zero.
    pub fn arm(&mut self) {
        self.armed = true;
        self.accumulator_ms = 0;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
        self.accumulator_ms = 0;
    }

    /// Feed elapsed time; returns how many full periods completed.
    pub fn advance(&mut self, elapsed_ms: u32) -> u32 {
        if !self.armed {
            return 0;
        }
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);
        let fired = self.accumulator_ms / self.period_ms;
        self.accumulator_ms %= self.period_ms;
        fired
    }

    /// Milliseconds until the next period completes.
    pub fn remaining_ms(&self) -> Option<u32> {
        self.armed.then(|| self.period_ms - self.accumulator_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disarmed_never_fires() {
        let mut c = Cadence::new(1000);
        assert_eq!(c.advance(5000), 0);
        assert_eq!(c.remaining_ms(), None);
    }

    #[test]
    fn accumulates_across_frames() {
        let mut c = Cadence::new(600);
        c.arm();
        assert_eq!(c.advance(400), 0);
        assert_eq!(c.advance(400), 1);
        assert_eq!(c.remaining_ms(), Some(400));
        assert_eq!(c.advance(1400), 2);
    }

    #[test]
    fn rearm_resets_phase() {
        let mut c = Cadence::new(1000);
        c.arm();
        c.advance(900);
        c.arm();
        assert_eq!(c.advance(200), 0);
        c.disarm();
        assert!(!c.is_armed());
    }
}
