//! Animated procedural background drawn behind the scene

pub mod field;
pub mod layer;
pub mod noise;

pub use field::{Band, BackgroundField};
pub use layer::{bake, fragment_coord, BackgroundLogic, BACKGROUND_PRIORITY};
pub use noise::random;
