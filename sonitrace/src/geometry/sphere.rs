use crate::geometry::Ray;
use crate::math::Vec3;

/// Spherical hit shape around a point sound source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Distance along the ray at which it enters the sphere.
    ///
    /// Solves `|origin + t*dir - center|^2 = radius^2` and returns the
    /// smaller root, falling back to the larger one when the smaller is
    /// negative (origin inside the sphere, or sphere behind the ray). The
    /// returned distance can still be non-positive; callers must filter on
    /// `t > 0`. A negative discriminant is a miss.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = ray.direction.dot(oc);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - a * c;
        if discriminant > 0.0 {
            let sqrt_disc = discriminant.sqrt();
            let mut t = (-b - sqrt_disc) / a;
            if t < 0.0 {
                t = (-b + sqrt_disc) / a;
            }
            Some(t)
        } else if discriminant == 0.0 {
            Some(-b / a)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn hits_front_surface() {
        let sphere = Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_relative_eq!(sphere.intersect(&ray).unwrap(), 1.0);
    }

    #[test]
    fn misses_offset_ray() {
        let sphere = Sphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::X);
        assert_eq!(sphere.intersect(&ray), None);
    }

    #[test]
    fn origin_inside_uses_exit_root() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_relative_eq!(sphere.intersect(&ray).unwrap(), 1.0);
    }

    #[test]
    fn sphere_behind_returns_negative_distance() {
        let sphere = Sphere::new(Vec3::new(-3.0, 0.0, 0.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = sphere.intersect(&ray).unwrap();
        assert!(t < 0.0);
    }
}
