use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::StarsConfig;

/// Star color, plain white
pub const STAR_COLOR: [u8; 4] = [255, 255, 255, 255];

/// Fixed point cloud scattered around the origin
#[derive(Debug, Clone, PartialEq)]
pub struct Starfield {
    points: Vec<Vec3>,
}

impl Starfield {
    /// `count` points uniform in a cube of side `extent` centred on the origin.
    /// Same seed, same stars.
    pub fn generate(count: usize, extent: f32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let half = extent.abs() * 0.5;

        let points = if half > 0.0 {
            (0..count)
                .map(|_| {
                    Vec3::new(
                        rng.gen_range(-half..=half),
                        rng.gen_range(-half..=half),
                        rng.gen_range(-half..=half),
                    )
                })
                .collect()
        } else {
            vec![Vec3::ZERO; count]
        };

        Self { points }
    }

    pub fn from_config(config: &StarsConfig) -> Self {
        Self::generate(config.count, config.extent, config.seed)
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Vec3> {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_stay_in_cube() {
        let stars = Starfield::generate(500, 2000.0, 7);
        assert_eq!(stars.points().len(), 500);
        assert!(stars
            .points()
            .iter()
            .all(|p| p.abs().max_element() <= 1000.0));
    }

    #[test]
    fn seed_is_reproducible() {
        assert_eq!(Starfield::generate(50, 10.0, 3), Starfield::generate(50, 10.0, 3));
        assert_ne!(Starfield::generate(50, 10.0, 3), Starfield::generate(50, 10.0, 4));
    }

    #[test]
    fn zero_extent_collapses() {
        let stars = Starfield::generate(3, 0.0, 1);
        assert_eq!(stars.points(), &[Vec3::ZERO; 3]);
    }
}
