pub mod animator;
pub mod arc_length;
pub mod spline;

pub use animator::{Parameterization, PathAnimator, PathSpec};
pub use arc_length::ArcLengthTable;
pub use spline::{CatmullRomCurve, CubicSegment, CurveKind, MIN_CONTROL_POINTS};
