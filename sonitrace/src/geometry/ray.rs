use crate::math::Vec3;

/// A ray cast from a receiver through the scene.
///
/// `distance` is the accumulated path length of all segments traveled
/// before reaching `origin`; it starts at zero for a primary ray and grows
/// with every bounce. Contributions and reflections are cut off once the
/// accumulated length exceeds the path budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction of propagation.
    pub direction: Vec3,
    /// Path length traveled before `origin`, in meters.
    pub distance: f32,
}

impl Ray {
    /// Creates a primary ray with zero accumulated distance.
    ///
    /// The direction is normalized here and must be non-zero.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_distance(origin, direction, 0.0)
    }

    /// Creates a ray that has already traveled `distance` meters.
    pub fn with_distance(origin: Vec3, direction: Vec3, distance: f32) -> Self {
        debug_assert!(direction.length_squared() > 0.0, "ray direction must be non-zero");
        Self {
            origin,
            direction: direction.normalize(),
            distance,
        }
    }

    /// Point along the ray at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_direction() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0));
        assert_eq!(ray.direction, Vec3::Y);
        assert_eq!(ray.distance, 0.0);
    }

    #[test]
    fn at_walks_along_direction() {
        let ray = Ray::new(Vec3::new(1.0, 0.0, 0.0), Vec3::X);
        assert_eq!(ray.at(2.5), Vec3::new(3.5, 0.0, 0.0));
    }
}
