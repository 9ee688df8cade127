use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::SceneResult;

use super::arc_length::ArcLengthTable;
use super::spline::{CatmullRomCurve, CurveKind};

/// How a normalized time maps onto the curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Parameterization {
    /// Equal time per segment; speed follows control-point spacing
    Index,
    /// Equal time per unit of length; constant speed
    #[default]
    ArcLength,
}

/// Builder-side description of a path
#[derive(Debug, Clone)]
pub struct PathSpec {
    pub points: Vec<Vec3>,
    pub closed: bool,
    pub kind: CurveKind,
    pub tension: f32,
    pub parameterization: Parameterization,
    pub divisions: usize,
}

impl PathSpec {
    pub fn new(points: Vec<Vec3>) -> Self {
        Self {
            points,
            closed: true,
            kind: CurveKind::default(),
            tension: 0.5,
            parameterization: Parameterization::default(),
            divisions: 1000,
        }
    }

    pub fn closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    pub fn kind(mut self, kind: CurveKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn tension(mut self, tension: f32) -> Self {
        self.tension = tension;
        self
    }

    pub fn parameterization(mut self, parameterization: Parameterization) -> Self {
        self.parameterization = parameterization;
        self
    }

    pub fn divisions(mut self, divisions: usize) -> Self {
        self.divisions = divisions;
        self
    }

    pub fn build(self) -> SceneResult<PathAnimator> {
        PathAnimator::new(&self)
    }
}

/// Maps time to a position on a spline.
///
/// Immutable once built: the curve and, in arc-length mode, the lookup table
/// are fixed at construction, so every query is a pure function of `t`.
#[derive(Debug, Clone)]
pub struct PathAnimator {
    curve: CatmullRomCurve,
    table: Option<ArcLengthTable>,
    parameterization: Parameterization,
}

impl PathAnimator {
    pub fn new(spec: &PathSpec) -> SceneResult<Self> {
        let curve = CatmullRomCurve::new(&spec.points, spec.closed, spec.kind, spec.tension)?;

        let table = match spec.parameterization {
            Parameterization::Index => None,
            Parameterization::ArcLength => Some(ArcLengthTable::build(&curve, spec.divisions)?),
        };

        Ok(Self {
            curve,
            table,
            parameterization: spec.parameterization,
        })
    }

    /// Position at normalized time `t`; one unit of `t` is one traversal
    pub fn position_at(&self, t: f32) -> Vec3 {
        let u = t.rem_euclid(1.0);
        match &self.table {
            Some(table) => self.curve.point(table.u_to_t(u)),
            None => self.curve.point(u),
        }
    }

    /// Position after `elapsed` seconds when one traversal takes `period` seconds
    pub fn position_at_time(&self, elapsed: f64, period: f64) -> Vec3 {
        let period = if period > 0.0 { period } else { 1.0 };
        let t = (elapsed / period).rem_euclid(1.0);
        self.position_at(t as f32)
    }

    pub fn parameterization(&self) -> Parameterization {
        self.parameterization
    }

    pub fn curve(&self) -> &CatmullRomCurve {
        &self.curve
    }

    /// Total curve length, when the lookup table exists
    pub fn length(&self) -> Option<f32> {
        self.table.as_ref().map(ArcLengthTable::total_length)
    }
}
