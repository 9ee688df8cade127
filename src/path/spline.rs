use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Fewest control points a path accepts
pub const MIN_CONTROL_POINTS: usize = 4;

/// Chord lengths below this collapse to a unit knot interval
const KNOT_EPSILON: f32 = 1e-4;

/// Knot spacing used when fitting Catmull-Rom segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CurveKind {
    /// Evenly spaced knots, tangents scaled by tension; C¹ at every joint
    #[default]
    Uniform,
    /// Knots spaced by the square root of chord length; no cusps or self-loops,
    /// but speed can jump at joints
    Centripetal,
    /// Knots spaced by chord length
    Chordal,
}

impl CurveKind {
    fn knot_exponent(self) -> Option<f32> {
        match self {
            CurveKind::Uniform => None,
            // Applied to squared distances
            CurveKind::Centripetal => Some(0.25),
            CurveKind::Chordal => Some(0.5),
        }
    }
}

/// Cubic Hermite segment in power form: c0 + c1 w + c2 w² + c3 w³
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    c0: Vec3,
    c1: Vec3,
    c2: Vec3,
    c3: Vec3,
}

impl CubicSegment {
    /// Hermite cubic from `p1` to `p2` with end tangents `t1`, `t2`
    pub fn hermite(p1: Vec3, p2: Vec3, t1: Vec3, t2: Vec3) -> Self {
        Self {
            c0: p1,
            c1: t1,
            c2: -3.0 * p1 + 3.0 * p2 - 2.0 * t1 - t2,
            c3: 2.0 * p1 - 2.0 * p2 + t1 + t2,
        }
    }

    /// Catmull-Rom segment between `p1` and `p2`
    pub fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, kind: CurveKind, tension: f32) -> Self {
        let Some(exponent) = kind.knot_exponent() else {
            return Self::hermite(p1, p2, tension * (p2 - p0), tension * (p3 - p1));
        };

        let mut dt0 = p0.distance_squared(p1).powf(exponent);
        let mut dt1 = p1.distance_squared(p2).powf(exponent);
        let mut dt2 = p2.distance_squared(p3).powf(exponent);

        // Coincident neighbours would divide by zero
        if dt1 < KNOT_EPSILON {
            dt1 = 1.0;
        }
        if dt0 < KNOT_EPSILON {
            dt0 = dt1;
        }
        if dt2 < KNOT_EPSILON {
            dt2 = dt1;
        }

        let t1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1) + (p2 - p1) / dt1) * dt1;
        let t2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2) + (p3 - p2) / dt2) * dt1;

        Self::hermite(p1, p2, t1, t2)
    }

    /// Evaluate at local weight `w` in [0, 1]
    pub fn point(&self, w: f32) -> Vec3 {
        ((self.c3 * w + self.c2) * w + self.c1) * w + self.c0
    }

    /// First derivative with respect to `w`
    pub fn tangent(&self, w: f32) -> Vec3 {
        (3.0 * self.c3 * w + 2.0 * self.c2) * w + self.c1
    }
}

/// Catmull-Rom spline through an ordered point sequence.
///
/// Segments are fitted once at construction. Closed curves wrap neighbour
/// lookups around the ends; open curves extrapolate a phantom point past each
/// end so the first and last segments still have four points.
#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    segments: Vec<CubicSegment>,
    closed: bool,
    kind: CurveKind,
}

impl CatmullRomCurve {
    pub fn new(points: &[Vec3], closed: bool, kind: CurveKind, tension: f32) -> SceneResult<Self> {
        if points.len() < MIN_CONTROL_POINTS {
            return Err(SceneError::InsufficientControlPoints {
                found: points.len(),
                required: MIN_CONTROL_POINTS,
            });
        }

        let mut points = points.to_vec();

        // A closing point that repeats the first would add a zero-length segment
        if closed && points.first() == points.last() {
            points.pop();
        }

        let segments = Self::fit_segments(&points, closed, kind, tension);

        Ok(Self {
            points,
            segments,
            closed,
            kind,
        })
    }

    fn fit_segments(points: &[Vec3], closed: bool, kind: CurveKind, tension: f32) -> Vec<CubicSegment> {
        let n = points.len();
        let count = if closed { n } else { n - 1 };

        (0..count)
            .map(|i| {
                let (p0, p1, p2, p3) = if closed {
                    (
                        points[(i + n - 1) % n],
                        points[i],
                        points[(i + 1) % n],
                        points[(i + 2) % n],
                    )
                } else {
                    let p0 = if i > 0 {
                        points[i - 1]
                    } else {
                        2.0 * points[0] - points[1]
                    };
                    let p3 = if i + 2 < n {
                        points[i + 2]
                    } else {
                        2.0 * points[n - 1] - points[n - 2]
                    };
                    (p0, points[i], points[i + 1], p3)
                };

                CubicSegment::catmull_rom(p0, p1, p2, p3, kind, tension)
            })
            .collect()
    }

    /// Position at index parameter `t` in [0, 1]: each segment spans an equal share of `t`
    pub fn point(&self, t: f32) -> Vec3 {
        let (segment, weight) = self.locate(t);
        self.segments[segment].point(weight)
    }

    fn locate(&self, t: f32) -> (usize, f32) {
        let count = self.segments.len();
        let scaled = t.clamp(0.0, 1.0) * count as f32;
        let segment = (scaled.floor() as usize).min(count - 1);
        (segment, scaled - segment as f32)
    }

    /// `divisions + 1` evenly spaced samples in index parameter, end points included
    pub fn sample(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point(i as f32 / divisions as f32))
            .collect()
    }

    /// Control points after closing-point removal
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }
}
