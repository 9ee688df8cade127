use glam::Vec3;
use log::trace;

pub use crate::core::clock::FrameInfo;
use crate::core::clock::{ManualClock, TimeSource};
use crate::error::SceneResult;
use crate::path::PathAnimator;
use crate::scene::SceneContext;

/// Seconds per loop when nothing else is configured
pub const DEFAULT_PERIOD_SECS: f64 = 2.0;

/// Outcome of one tick
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: FrameInfo,
    /// Position written to the tracked object, or why nothing was written
    pub placement: SceneResult<Vec3>,
}

/// Explicit scheduler for the per-frame work.
///
/// Each tick reads the injected time source, lets pending assets land, then
/// moves the tracked object along the path. Per-frame errors end up in the
/// report and never stop the loop.
pub struct FrameLoop<T: TimeSource> {
    clock: T,
    animator: PathAnimator,
    period: f64,
    next_frame: u64,
    last_time: Option<f64>,
}

impl<T: TimeSource> FrameLoop<T> {
    pub fn new(clock: T, animator: PathAnimator) -> Self {
        Self {
            clock,
            animator,
            period: DEFAULT_PERIOD_SECS,
            next_frame: 0,
            last_time: None,
        }
    }

    /// Seconds per traversal of the path
    pub fn with_period(mut self, period: f64) -> Self {
        if period > 0.0 {
            self.period = period;
        }
        self
    }

    /// Sample the clock into the next frame's timing
    pub fn advance(&mut self) -> FrameInfo {
        let time = self.clock.now();
        let delta = self.last_time.map_or(0.0, |last| (time - last).max(0.0)) as f32;

        let frame = FrameInfo {
            number: self.next_frame,
            time,
            delta,
        };

        self.next_frame += 1;
        self.last_time = Some(time);
        frame
    }

    /// Move the tracked object to where it belongs at `frame.time`
    pub fn animate(&self, frame: &FrameInfo, scene: &mut SceneContext) -> SceneResult<Vec3> {
        let position = self.animator.position_at_time(frame.time, self.period);

        match scene.place_tracked(position) {
            Ok(()) => Ok(position),
            Err(e) => {
                trace!("frame {}: {}", frame.number, e);
                Err(e)
            }
        }
    }

    /// One full frame of scene updates
    pub fn tick(&mut self, scene: &mut SceneContext) -> FrameReport {
        let frame = self.advance();
        scene.poll_assets();
        let placement = self.animate(&frame, scene);
        FrameReport { frame, placement }
    }

    pub fn animator(&self) -> &PathAnimator {
        &self.animator
    }

    pub fn period(&self) -> f64 {
        self.period
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut T {
        &mut self.clock
    }
}

impl FrameLoop<ManualClock> {
    /// Tick, then move the clock on by `step` seconds; drives headless runs
    pub fn step(&mut self, scene: &mut SceneContext, step: f64) -> FrameReport {
        let report = self.tick(scene);
        self.clock.advance(step);
        report
    }
}
