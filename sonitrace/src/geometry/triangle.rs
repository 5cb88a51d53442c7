use crate::geometry::Ray;
use crate::math::{self, Vec3};

/// Predicate used to accept a ray/triangle intersection.
///
/// `Permissive` is the default: it tests only `beta + gamma < 1` on the
/// raw solver output. In the solver's coordinate convention (see
/// [`Triangle::intersect_with`]) those values come out negated relative to
/// the usual barycentric coordinates, so this admits hits on the triangle's
/// plane well outside the triangle itself on one side. `Strict` requires
/// true barycentric containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceMode {
    #[default]
    Permissive,
    Strict,
}

/// Result of a ray/triangle intersection test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Ray parameter of the hit. May be negative; callers that only want
    /// hits in front of the ray must filter on `t > 0`.
    pub t: f32,
    /// Intersection point, `ray.at(t)`.
    pub point: Vec3,
}

/// A single-sided planar surface patch.
///
/// Vertices are given in counter-clockwise order as seen from the outward
/// side, so that [`Triangle::normal`] points outward. Triangles are
/// immutable once added to a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub vertices: [Vec3; 3],
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Unit normal, `(v1 - v0) x (v2 - v0)` normalized.
    ///
    /// Undefined (NaN components) for degenerate triangles; those never
    /// produce intersections, so the tracer never asks for their normal.
    pub fn normal(&self) -> Vec3 {
        let e1 = self.vertices[1] - self.vertices[0];
        let e2 = self.vertices[2] - self.vertices[0];
        e1.cross(e2).normalize()
    }

    /// Intersects with the permissive acceptance predicate.
    pub fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.intersect_with(ray, SurfaceMode::Permissive)
    }

    /// Solves `beta*e1 + gamma*e2 + t*dir = v0 - origin` by Cramer's rule
    /// and applies the acceptance predicate of `mode`.
    ///
    /// The system is written with `+dir` in the third column and
    /// `v0 - origin` on the right-hand side, which makes the solved
    /// `beta`/`gamma` the negation of the textbook barycentric
    /// coordinates while `t` keeps its usual meaning. The permissive
    /// predicate operates on the raw solved values; the strict predicate
    /// undoes the sign flip and checks containment.
    ///
    /// A singular system (ray parallel to the plane, or a degenerate
    /// triangle) is a miss.
    pub fn intersect_with(&self, ray: &Ray, mode: SurfaceMode) -> Option<SurfaceHit> {
        let e1 = self.vertices[1] - self.vertices[0];
        let e2 = self.vertices[2] - self.vertices[0];
        let rhs = self.vertices[0] - ray.origin;
        let dir = ray.direction;

        let det = e1.cross(e2).dot(dir);
        if det.abs() < f32::EPSILON {
            return None;
        }

        let beta = rhs.cross(e2).dot(dir) / det;
        let gamma = e1.cross(rhs).dot(dir) / det;
        let t = e1.cross(e2).dot(rhs) / det;

        let accepted = match mode {
            SurfaceMode::Permissive => beta + gamma < 1.0,
            SurfaceMode::Strict => beta <= 0.0 && gamma <= 0.0 && beta + gamma >= -1.0,
        };

        accepted.then(|| SurfaceHit {
            t,
            point: ray.at(t),
        })
    }

    /// Specular reflection of `direction` off this triangle's plane.
    pub fn reflect(&self, direction: Vec3) -> Vec3 {
        let e1 = self.vertices[1] - self.vertices[0];
        let e2 = self.vertices[2] - self.vertices[0];
        math::reflect(direction, e1.cross(e2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wall_x2() -> Triangle {
        // Spans y in [0, 1], z in [0, 1] on the plane x = 2.
        Triangle::new(
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(2.0, 0.0, 1.0),
        )
    }

    #[test]
    fn hits_interior_point() {
        let tri = wall_x2();
        let ray = Ray::new(Vec3::new(0.0, 0.3, 0.2), Vec3::X);
        let hit = tri.intersect(&ray).unwrap();
        assert_relative_eq!(hit.t, 2.0);
        assert_relative_eq!(hit.point.y, 0.3);
        assert_relative_eq!(hit.point.z, 0.2);
    }

    #[test]
    fn parallel_ray_misses() {
        let tri = wall_x2();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(tri.intersect(&ray), None);
    }

    #[test]
    fn degenerate_triangle_misses() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0));
        let ray = Ray::new(Vec3::new(0.5, -1.0, 0.0), Vec3::Y);
        assert_eq!(tri.intersect(&ray), None);
    }

    #[test]
    fn permissive_accepts_outside_strict_rejects() {
        // A point on the plane far outside the triangle's edges, on the
        // side the permissive test does not cull.
        let tri = wall_x2();
        let ray = Ray::new(Vec3::new(0.0, 2.0, 2.0), Vec3::X);
        assert!(tri.intersect(&ray).is_some());
        assert_eq!(tri.intersect_with(&ray, SurfaceMode::Strict), None);
    }

    #[test]
    fn permissive_rejects_far_negative_side() {
        let tri = wall_x2();
        let ray = Ray::new(Vec3::new(0.0, -3.0, 0.0), Vec3::X);
        assert_eq!(tri.intersect(&ray), None);
    }

    #[test]
    fn strict_accepts_interior() {
        let tri = wall_x2();
        let ray = Ray::new(Vec3::new(0.0, 0.3, 0.2), Vec3::X);
        assert!(tri.intersect_with(&ray, SurfaceMode::Strict).is_some());
    }

    #[test]
    fn behind_ray_still_reported_with_negative_t() {
        let tri = wall_x2();
        let ray = Ray::new(Vec3::new(4.0, 0.3, 0.2), Vec3::X);
        let hit = tri.intersect(&ray).unwrap();
        assert!(hit.t < 0.0);
    }

    #[test]
    fn normal_points_along_winding() {
        let tri = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert_relative_eq!(tri.normal().z, 1.0);
    }

    #[test]
    fn reflect_reverses_normal_component() {
        let tri = wall_x2();
        let reflected = tri.reflect(Vec3::new(1.0, 0.5, 0.0));
        assert_relative_eq!(reflected.x, -1.0, epsilon = 1e-6);
        assert_relative_eq!(reflected.y, 0.5, epsilon = 1e-6);
    }
}
