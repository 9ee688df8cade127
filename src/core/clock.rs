use std::time::Instant;

/// Source of elapsed time for the frame loop.
///
/// Monotonic and never reset; consumers wrap it with modulo arithmetic,
/// never by changing the source.
pub trait TimeSource {
    /// Seconds since the source started
    fn now(&self) -> f64;
}

/// Timing of a single frame, shared by everything updated in that frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameInfo {
    /// Frame counter, starting at 0
    pub number: u64,
    /// Seconds since the clock started
    pub time: f64,
    /// Seconds since the previous frame
    pub delta: f32,
}

/// Wall clock time since construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Create new clock starting now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to; for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start at a given time
    pub fn starting_at(seconds: f64) -> Self {
        Self {
            now: seconds.max(0.0),
        }
    }

    /// Move forward; negative steps are ignored
    pub fn advance(&mut self, seconds: f64) {
        if seconds > 0.0 {
            self.now += seconds;
        }
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> f64 {
        self.now
    }
}
