use crate::error::{SceneError, SceneResult};

use super::spline::CatmullRomCurve;

/// Fewest samples an arc-length table is built with
pub const MIN_DIVISIONS: usize = 50;

/// Below this total length the table cannot be inverted
const MIN_TOTAL_LENGTH: f32 = 1e-5;

/// Cumulative chord lengths of a curve sampled at evenly spaced index parameters.
///
/// `lengths[i]` is the distance travelled from the start to index parameter
/// `i / divisions`. Inverting it maps a fraction of the total length back to an
/// index parameter, which gives constant-speed traversal.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    lengths: Vec<f32>,
}

impl ArcLengthTable {
    pub fn build(curve: &CatmullRomCurve, divisions: usize) -> SceneResult<Self> {
        let divisions = divisions.max(MIN_DIVISIONS);
        let samples = curve.sample(divisions);

        let mut lengths = Vec::with_capacity(samples.len());
        let mut travelled = 0.0f32;
        lengths.push(travelled);
        for pair in samples.windows(2) {
            travelled += pair[0].distance(pair[1]);
            lengths.push(travelled);
        }

        if !(travelled > MIN_TOTAL_LENGTH) {
            return Err(SceneError::InsufficientControlPoints {
                found: curve.points().len(),
                required: super::spline::MIN_CONTROL_POINTS,
            });
        }

        Ok(Self { lengths })
    }

    pub fn total_length(&self) -> f32 {
        self.lengths[self.lengths.len() - 1]
    }

    pub fn divisions(&self) -> usize {
        self.lengths.len() - 1
    }

    /// Index parameter at which `u` of the total length has been travelled
    pub fn u_to_t(&self, u: f32) -> f32 {
        let divisions = self.divisions();
        let target = u.clamp(0.0, 1.0) * self.total_length();

        // Last sample not past the target
        let i = self
            .lengths
            .partition_point(|&length| length <= target)
            .saturating_sub(1)
            .min(divisions - 1);

        let before = self.lengths[i];
        let span = self.lengths[i + 1] - before;
        let fraction = if span > 0.0 { (target - before) / span } else { 0.0 };

        (i as f32 + fraction) / divisions as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::spline::CurveKind;
    use glam::Vec3;

    fn line() -> CatmullRomCurve {
        let points: Vec<Vec3> = (0..5).map(|i| Vec3::new(i as f32 * 10.0, 0.0, 0.0)).collect();
        CatmullRomCurve::new(&points, false, CurveKind::Centripetal, 0.5).unwrap()
    }

    #[test]
    fn straight_line_length() {
        let table = ArcLengthTable::build(&line(), 100).unwrap();
        assert!((table.total_length() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn divisions_have_a_floor() {
        let table = ArcLengthTable::build(&line(), 3).unwrap();
        assert_eq!(table.divisions(), MIN_DIVISIONS);
    }

    #[test]
    fn inversion_hits_the_ends() {
        let table = ArcLengthTable::build(&line(), 200).unwrap();
        assert_eq!(table.u_to_t(0.0), 0.0);
        assert!((table.u_to_t(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn inversion_is_monotonic() {
        let table = ArcLengthTable::build(&line(), 200).unwrap();
        let mut last = -1.0;
        for i in 0..=100 {
            let t = table.u_to_t(i as f32 / 100.0);
            assert!(t >= last);
            last = t;
        }
    }

    #[test]
    fn degenerate_curve_has_no_table() {
        let points = [Vec3::ONE; 5];
        let curve = CatmullRomCurve::new(&points, false, CurveKind::Centripetal, 0.5).unwrap();
        assert!(matches!(
            ArcLengthTable::build(&curve, 200),
            Err(SceneError::InsufficientControlPoints { .. })
        ));
    }
}
