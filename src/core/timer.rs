/// Self-contained timers - accumulate delta time and decide when to fire

/// Fixed rate timer - fires at specific Hz
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    pub interval: f32,
    pub accumulator: f32,
}

impl FixedHz {
    /// Create timer that fires at given frequency
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz.max(f32::EPSILON),
            accumulator: 0.0,
        }
    }

    /// Update with delta, returns true if should fire
    pub fn tick(&mut self, delta: f32) -> bool {
        self.accumulator += delta;

        if self.accumulator >= self.interval {
            // Drop whole intervals missed during a stall
            self.accumulator %= self.interval;
            true
        } else {
            false
        }
    }
}

/// Frame rate meter - counts frames and reports once per window
#[derive(Debug, Clone, Copy)]
pub struct FrameRate {
    window: f32,
    elapsed: f32,
    frames: u32,
}

impl FrameRate {
    /// Report every `window` seconds
    pub fn new(window: f32) -> Self {
        Self {
            window,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Count one frame; returns frames per second when a window closes
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed >= self.window {
            let fps = self.frames as f32 / self.elapsed;
            self.frames = 0;
            self.elapsed = 0.0;
            Some(fps)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_hz_fires_at_rate() {
        let mut timer = FixedHz::new(60.0); // 60Hz = 0.0166s

        // Small delta - no fire
        assert!(!timer.tick(0.01));

        // Accumulate to threshold
        assert!(timer.tick(0.01)); // Total ~0.02s >= 0.0166s

        // Immediate next - no fire
        assert!(!timer.tick(0.001));
    }

    #[test]
    fn fixed_hz_skips_stalls() {
        let mut timer = FixedHz::new(10.0);

        assert!(timer.tick(1.05));
        // Only the remainder of the stall carries over
        assert!(timer.accumulator < timer.interval);
        assert!(!timer.tick(0.01));
    }

    #[test]
    fn frame_rate_reports_per_window() {
        let mut meter = FrameRate::new(1.0);

        for _ in 0..59 {
            assert!(meter.tick(1.0 / 60.0).is_none());
        }
        let fps = meter.tick(1.0 / 60.0 + 0.001).unwrap();
        assert!((fps - 60.0).abs() < 0.1);

        // Window restarts
        assert!(meter.tick(0.5).is_none());
    }
}
