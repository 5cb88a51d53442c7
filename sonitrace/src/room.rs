//! Pre-defined scene geometry builders.

use crate::geometry::Triangle;
use crate::math::Vec3;
use crate::scene::Scene;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// A closed axis-aligned rectangular room in the positive octant.
///
/// Width spans x, length spans y, height spans z, with one corner at the
/// origin. This is a builder, not a scene: [`RectRoom::scene`] produces a
/// fresh [`Scene`] holding the room's twelve wall triangles, which can
/// then be populated with sources and receivers (and [`Scene::clear`]ed
/// for reuse).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectRoom {
    pub width: f32,
    pub length: f32,
    pub height: f32,
}

// Crude stand-in for a human height distribution: an equal-weight mixture
// of two normals (roughly adult female/male ear height, meters).
const HEIGHT_MEAN_LOW: f32 = 1.63;
const HEIGHT_STDDEV_LOW: f32 = 0.07;
const HEIGHT_MEAN_HIGH: f32 = 1.75;
const HEIGHT_STDDEV_HIGH: f32 = 0.075;

impl RectRoom {
    pub fn new(width: f32, length: f32, height: f32) -> Self {
        Self {
            width,
            length,
            height,
        }
    }

    /// Builds a scene containing the room's six faces as twelve triangles.
    pub fn scene(&self) -> Scene {
        let (w, l, h) = (self.width, self.length, self.height);
        let v1 = Vec3::ZERO;
        let v2 = Vec3::new(0.0, 0.0, h);
        let v3 = Vec3::new(w, 0.0, h);
        let v4 = Vec3::new(w, 0.0, 0.0);
        let v5 = Vec3::new(0.0, l, 0.0);
        let v6 = Vec3::new(0.0, l, h);
        let v7 = Vec3::new(w, l, h);
        let v8 = Vec3::new(w, l, 0.0);

        let mut scene = Scene::new();
        // Near wall (y = 0)
        scene.add_surfaces([Triangle::new(v1, v2, v4), Triangle::new(v2, v3, v4)]);
        // Far wall (y = length)
        scene.add_surfaces([Triangle::new(v5, v6, v8), Triangle::new(v6, v7, v8)]);
        // Left wall (x = 0)
        scene.add_surfaces([Triangle::new(v1, v2, v5), Triangle::new(v2, v6, v5)]);
        // Right wall (x = width)
        scene.add_surfaces([Triangle::new(v4, v3, v8), Triangle::new(v3, v7, v8)]);
        // Floor
        scene.add_surfaces([Triangle::new(v1, v5, v4), Triangle::new(v5, v8, v4)]);
        // Ceiling
        scene.add_surfaces([Triangle::new(v2, v6, v3), Triangle::new(v6, v7, v3)]);
        scene
    }

    /// Random positions inside the room, `padding` meters away from the
    /// walls on x and y; z is drawn from the human-height mixture.
    pub fn random_positions<R: Rng + ?Sized>(
        &self,
        count: usize,
        padding: f32,
        rng: &mut R,
    ) -> Vec<Vec3> {
        let low = Normal::new(HEIGHT_MEAN_LOW, HEIGHT_STDDEV_LOW).expect("stddev is positive");
        let high = Normal::new(HEIGHT_MEAN_HIGH, HEIGHT_STDDEV_HIGH).expect("stddev is positive");

        (0..count)
            .map(|_| {
                let x = rng.gen_range(padding..self.width - padding);
                let y = rng.gen_range(padding..self.length - padding);
                let z = if rng.gen_bool(0.5) {
                    low.sample(rng)
                } else {
                    high.sample(rng)
                };
                Vec3::new(x, y, z)
            })
            .collect()
    }
}
