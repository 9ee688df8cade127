use glam::Vec3;

/// Corner index pairs forming the twelve box edges
const EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 3), (3, 2), (2, 0), // min z face
    (4, 5), (5, 7), (7, 6), (6, 4), // max z face
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Axis-aligned bounding box
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around `points`; `None` when there are none
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self::new(first, first), |aabb, p| aabb.extend(*p)))
    }

    /// Box grown to contain `point`
    pub fn extend(&self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn translated(&self, offset: Vec3) -> Aabb {
        Aabb::new(self.min + offset, self.max + offset)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Corners ordered by bit pattern: bit 0 picks x, bit 1 y, bit 2 z
    pub fn corners(&self) -> [Vec3; 8] {
        std::array::from_fn(|i| {
            Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }

    /// Twelve wireframe edges as corner pairs
    pub fn edges(&self) -> impl Iterator<Item = (Vec3, Vec3)> {
        let corners = self.corners();
        EDGES.into_iter().map(move |(a, b)| (corners[a], corners[b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_center() {
        let aabb = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.size(), Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_from_points() {
        let points = [
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 5.0, 0.0),
            Vec3::new(0.0, 0.0, 9.0),
        ];
        let aabb = Aabb::from_points(&points).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 5.0, 9.0));
        assert!(Aabb::from_points(&[] as &[Vec3]).is_none());
    }

    #[test]
    fn test_aabb_union_negative_coords() {
        let aabb1 = Aabb::new(Vec3::splat(-3.0), Vec3::splat(-1.0));
        let aabb2 = Aabb::new(Vec3::splat(1.0), Vec3::splat(3.0));
        let union = aabb1.union(&aabb2);
        assert_eq!(union.min, Vec3::splat(-3.0));
        assert_eq!(union.max, Vec3::splat(3.0));
    }

    #[test]
    fn test_edges_are_axis_aligned() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0));
        let edges: Vec<_> = aabb.edges().collect();
        assert_eq!(edges.len(), 12);

        for (a, b) in edges {
            let d = (b - a).abs();
            // Exactly one axis differs
            let moving = [d.x, d.y, d.z].iter().filter(|c| **c > 0.0).count();
            assert_eq!(moving, 1);
        }
    }

    #[test]
    fn test_translated() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE).translated(Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(aabb.min.x, 10.0);
        assert_eq!(aabb.max.x, 11.0);
    }
}
