use crate::geometry::{Ray, SurfaceMode, Triangle};
use crate::math::Vec3;
use crate::scene::Scene;
use crate::trace::{ATM_ATTEN, MAX_BOUNCES, MAX_PATH_LEN, PROP_SPEED, REFL_COEFF};

/// Traces a single ray, returning its private time-domain buffer.
///
/// Each bounce spawns at most one reflected segment (the nearest surface),
/// so the whole path is a linear chain and runs as a loop. Per segment:
///
/// 1. Every source whose hit sphere lies on the segment within the path
///    budget writes its signal into the buffer, delayed by the cumulative
///    distance quantized at the source's own rate and scaled by the
///    atmospheric loss `exp(-ATM_ATTEN * dist / 2)`.
/// 2. The ray reflects off the nearest surface with strictly positive
///    parameter, accumulating `REFL_COEFF * exp(-ATM_ATTEN * dist / 2)`
///    into a running attenuation product.
///
/// The product is applied to the whole buffer on exit. Writes happen while
/// walking down the chain and the multiplies all land afterward, so every
/// contribution, including the very first direct one, ends up scaled by
/// the attenuation of every bounce the chain went on to take. Each
/// reflection scales the entire accumulated tape, not just the segments
/// recorded after it.
///
/// Termination comes from the `MAX_PATH_LEN` budget; `MAX_BOUNCES` guards
/// degenerate geometry where bounce distances stop advancing the budget.
pub(crate) fn trace_ray(
    scene: &Scene,
    origin: Vec3,
    direction: Vec3,
    num_samples: usize,
    mode: SurfaceMode,
) -> Vec<f32> {
    let mut ray_data = vec![0.0f32; num_samples];
    let mut ray = Ray::new(origin, direction);
    let mut attenuation = 1.0f32;

    for _ in 0..MAX_BOUNCES {
        add_direct_contributions(scene, &ray, &mut ray_data);

        let Some((t, point, triangle)) = nearest_surface(scene, &ray, mode) else {
            break;
        };
        let total_dist = ray.distance + t;
        if total_dist >= MAX_PATH_LEN {
            break;
        }

        let reflected = triangle.reflect(ray.direction);
        ray = Ray::with_distance(point, reflected, total_dist);
        attenuation *= bounce_attenuation(total_dist);
    }

    if attenuation != 1.0 {
        for sample in &mut ray_data {
            *sample *= attenuation;
        }
    }
    ray_data
}

/// Per-bounce loss: reflection coefficient times the atmospheric loss over
/// the path accumulated up to the bounce.
fn bounce_attenuation(total_dist: f32) -> f32 {
    REFL_COEFF * (-ATM_ATTEN * total_dist / 2.0).exp()
}

fn add_direct_contributions(scene: &Scene, ray: &Ray, ray_data: &mut [f32]) {
    let num_samples = ray_data.len();
    for source in scene.sources() {
        let Some(src_dist) = source.hit_sphere().intersect(ray) else {
            continue;
        };
        if src_dist <= 0.0 || src_dist + ray.distance >= MAX_PATH_LEN {
            continue;
        }

        let total_dist = src_dist + ray.distance;
        let delay_samples = ((total_dist / PROP_SPEED) as f64 * source.sample_rate() as f64)
            .round() as usize;
        if delay_samples >= num_samples {
            continue;
        }

        let gain = (-ATM_ATTEN * total_dist / 2.0).exp();
        let signal = source.signal();
        let span = signal.len().min(num_samples - delay_samples);
        let window = &mut ray_data[delay_samples..delay_samples + span];
        for (slot, sample) in window.iter_mut().zip(&signal[..span]) {
            *slot += gain * sample;
        }
    }
}

fn nearest_surface<'scene>(
    scene: &'scene Scene,
    ray: &Ray,
    mode: SurfaceMode,
) -> Option<(f32, Vec3, &'scene Triangle)> {
    let mut nearest: Option<(f32, Vec3, &Triangle)> = None;
    for triangle in scene.triangles() {
        if let Some(hit) = triangle.intersect_with(ray, mode) {
            if hit.t > 0.0 && nearest.is_none_or(|(t, _, _)| hit.t < t) {
                nearest = Some((hit.t, hit.point, triangle));
            }
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receiver::Receiver;
    use crate::source::{SOURCE_RADIUS, Source};
    use approx::assert_relative_eq;

    const RATE: u32 = 8000;

    fn impulse_at(location: Vec3) -> Source {
        Source::from_samples(vec![1.0], RATE, location, "impulse").unwrap()
    }

    fn big_wall_at_y(y: f32) -> Triangle {
        Triangle::new(
            Vec3::new(-50.0, y, -50.0),
            Vec3::new(50.0, y, -50.0),
            Vec3::new(0.0, y, 50.0),
        )
    }

    #[test]
    fn free_space_impulse_arrival_and_gain() {
        let mut scene = Scene::new();
        scene.add_source(impulse_at(Vec3::new(0.0, 3.43, 0.0)));
        scene.add_receiver(Receiver::new(Vec3::ZERO, "r"));

        let data = trace_ray(&scene, Vec3::ZERO, Vec3::Y, RATE as usize, SurfaceMode::Permissive);

        // The ray enters the hit sphere at 3.43 - radius meters.
        let dist = 3.43 - SOURCE_RADIUS;
        let expected_index = ((dist / PROP_SPEED) as f64 * RATE as f64).round() as usize;
        let expected_gain = (-ATM_ATTEN * dist / 2.0).exp();
        assert_relative_eq!(data[expected_index], expected_gain, epsilon = 1e-6);
        assert!(data[..expected_index].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn source_beyond_path_budget_is_silent() {
        let mut scene = Scene::new();
        scene.add_source(impulse_at(Vec3::new(0.0, 60.0, 0.0)));
        scene.add_receiver(Receiver::new(Vec3::ZERO, "r"));

        let data = trace_ray(&scene, Vec3::ZERO, Vec3::Y, RATE as usize * 2, SurfaceMode::Permissive);
        assert!(data.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn source_behind_ray_is_ignored() {
        let mut scene = Scene::new();
        scene.add_source(impulse_at(Vec3::new(0.0, -2.0, 0.0)));

        let data = trace_ray(&scene, Vec3::ZERO, Vec3::Y, RATE as usize, SurfaceMode::Permissive);
        assert!(data.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn bounce_attenuation_scales_every_contribution() {
        // Source one meter ahead, wall another meter behind it. The ray
        // picks up the source, reflects off the wall, and picks up the
        // source again on the way back. Both contributions, including the
        // direct one written before the bounce, carry the bounce's
        // attenuation factor.
        let mut scene = Scene::new();
        scene.add_source(impulse_at(Vec3::new(0.0, 1.0, 0.0)));
        scene.add_surface(big_wall_at_y(2.0));

        let data = trace_ray(&scene, Vec3::ZERO, Vec3::Y, RATE as usize, SurfaceMode::Permissive);

        let direct_dist = 1.0 - SOURCE_RADIUS;
        let direct_index = ((direct_dist / PROP_SPEED) as f64 * RATE as f64).round() as usize;
        let return_dist = 2.0 + 1.0 - SOURCE_RADIUS;
        let return_index = ((return_dist / PROP_SPEED) as f64 * RATE as f64).round() as usize;
        assert_ne!(direct_index, return_index);

        let bounce_atten = REFL_COEFF * (-ATM_ATTEN * 2.0 / 2.0).exp();
        let expected_direct = (-ATM_ATTEN * direct_dist / 2.0).exp() * bounce_atten;
        let expected_return = (-ATM_ATTEN * return_dist / 2.0).exp() * bounce_atten;
        assert_relative_eq!(data[direct_index], expected_direct, epsilon = 1e-5);
        assert_relative_eq!(data[return_index], expected_return, epsilon = 1e-5);
    }

    #[test]
    fn long_signal_truncated_at_buffer_end() {
        let mut scene = Scene::new();
        let signal = vec![1.0f32; 4000];
        scene.add_source(Source::from_samples(signal, RATE, Vec3::new(0.0, 1.0, 0.0), "s").unwrap());

        let data = trace_ray(&scene, Vec3::ZERO, Vec3::Y, 100, SurfaceMode::Permissive);
        // Contributions stop at the buffer end without panicking.
        assert!(data[99] != 0.0);
    }

    #[test]
    fn empty_scene_produces_silence() {
        let scene = Scene::new();
        let data = trace_ray(&scene, Vec3::ZERO, Vec3::Y, 64, SurfaceMode::Permissive);
        assert_eq!(data.len(), 64);
        assert!(data.iter().all(|&s| s == 0.0));
    }
}
