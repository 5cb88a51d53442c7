//! Math types for sonitrace

pub use glam::Vec3;

/// Unit direction for the spherical angles used by the tracing driver.
///
/// `polar` is measured away from the +z axis in `[0, pi]`, `azimuth` around
/// the z axis from the +x axis in `[0, 2*pi)`.
pub fn spherical_direction(polar: f32, azimuth: f32) -> Vec3 {
    let planar = polar.sin();
    Vec3::new(
        planar * azimuth.cos(),
        planar * azimuth.sin(),
        polar.cos(),
    )
}

/// Specular reflection of `direction` about `normal`.
///
/// The normal does not need to be unit length; it is normalized here. The
/// result has the same length as `direction`, and the formula is symmetric
/// in the normal's sign, so either surface orientation works.
pub fn reflect(direction: Vec3, normal: Vec3) -> Vec3 {
    let n = normal.normalize();
    direction - 2.0 * n.dot(direction) * n
}
