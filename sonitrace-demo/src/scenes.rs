//! Demo scene construction.

use sonitrace::{Receiver, Scene, Source, Triangle, Vec3};

/// The two-ear listening room: a 10 x 20 x 3 meter box centered on the
/// listener's x position, with three click sources ahead of the listener
/// staggered in time.
pub fn two_ear_room(click: &[f32], sample_rate: u32) -> anyhow::Result<Scene> {
    let mut scene = Scene::new();

    // Ears roughly 16 cm apart at standing height.
    scene.add_receiver(Receiver::new(Vec3::new(-0.08, 0.0, 1.75), "left_ear"));
    scene.add_receiver(Receiver::new(Vec3::new(0.08, 0.0, 1.75), "right_ear"));

    // A click 10 m ahead near the floor, one 12 m out to the left up
    // high, one 11 m out to the right at head height.
    scene.add_source(Source::from_samples(
        click.to_vec(),
        sample_rate,
        Vec3::new(0.0, 10.0, 0.3),
        "click_center",
    )?);
    scene.add_source(
        Source::from_samples(
            click.to_vec(),
            sample_rate,
            Vec3::new(-1.5, 12.0, 2.0),
            "click_left",
        )?
        .delay(2.0),
    );
    scene.add_source(
        Source::from_samples(
            click.to_vec(),
            sample_rate,
            Vec3::new(3.0, 11.0, 1.0),
            "click_right",
        )?
        .delay(4.0),
    );

    // Left wall
    scene.add_surfaces([
        Triangle::new(
            Vec3::new(-5.0, -5.0, 0.0),
            Vec3::new(-5.0, 15.0, 0.0),
            Vec3::new(-5.0, -5.0, 3.0),
        ),
        Triangle::new(
            Vec3::new(-5.0, 15.0, 0.0),
            Vec3::new(-5.0, 15.0, 3.0),
            Vec3::new(-5.0, -5.0, 3.0),
        ),
    ]);
    // Right wall
    scene.add_surfaces([
        Triangle::new(
            Vec3::new(5.0, -5.0, 0.0),
            Vec3::new(5.0, 15.0, 0.0),
            Vec3::new(5.0, -5.0, 3.0),
        ),
        Triangle::new(
            Vec3::new(5.0, 15.0, 0.0),
            Vec3::new(5.0, 15.0, 3.0),
            Vec3::new(5.0, -5.0, 3.0),
        ),
    ]);
    // Front wall
    scene.add_surfaces([
        Triangle::new(
            Vec3::new(-5.0, 15.0, 0.0),
            Vec3::new(-5.0, 15.0, 3.0),
            Vec3::new(5.0, 15.0, 0.0),
        ),
        Triangle::new(
            Vec3::new(-5.0, 15.0, 3.0),
            Vec3::new(5.0, 15.0, 3.0),
            Vec3::new(5.0, 15.0, 0.0),
        ),
    ]);
    // Back wall
    scene.add_surfaces([
        Triangle::new(
            Vec3::new(-5.0, -5.0, 0.0),
            Vec3::new(-5.0, -5.0, 3.0),
            Vec3::new(5.0, -5.0, 0.0),
        ),
        Triangle::new(
            Vec3::new(-5.0, -5.0, 3.0),
            Vec3::new(5.0, -5.0, 3.0),
            Vec3::new(5.0, -5.0, 0.0),
        ),
    ]);
    // Ceiling
    scene.add_surfaces([
        Triangle::new(
            Vec3::new(-5.0, -5.0, 3.0),
            Vec3::new(-5.0, 15.0, 3.0),
            Vec3::new(5.0, -5.0, 3.0),
        ),
        Triangle::new(
            Vec3::new(-5.0, 15.0, 3.0),
            Vec3::new(5.0, 15.0, 3.0),
            Vec3::new(5.0, -5.0, 3.0),
        ),
    ]);
    // Floor
    scene.add_surfaces([
        Triangle::new(
            Vec3::new(-5.0, -5.0, 0.0),
            Vec3::new(-5.0, 15.0, 0.0),
            Vec3::new(5.0, -5.0, 0.0),
        ),
        Triangle::new(
            Vec3::new(-5.0, 15.0, 0.0),
            Vec3::new(5.0, 15.0, 0.0),
            Vec3::new(5.0, -5.0, 0.0),
        ),
    ]);

    Ok(scene)
}

/// A linear microphone array perpendicular, in the xy-plane, to the
/// steering direction, centered on `origin`.
///
/// Default spacing follows the 18.6 mm array from Anderson et al.,
/// "Towards mobile gaze-directed beamforming" (EMBC 2018).
pub fn line_array(steering: Vec3, origin: Vec3, count: usize, spacing: f32) -> Vec<Receiver> {
    let direction = Vec3::new(steering.y, -steering.x, 0.0).normalize();
    let half_length = direction * (count as f32 * spacing * 0.5);
    (0..count)
        .map(|index| {
            Receiver::new(
                origin + direction * (index as f32 * spacing) - half_length,
                format!("channel {}", index),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_array_is_perpendicular_and_evenly_spaced() {
        let steering = Vec3::new(0.0, 1.0, 0.0);
        let mics = line_array(steering, Vec3::new(1.0, 2.0, 1.7), 8, 0.0186);
        assert_eq!(mics.len(), 8);
        for pair in mics.windows(2) {
            let step = pair[1].location() - pair[0].location();
            assert!((step.length() - 0.0186).abs() < 1e-6);
            // Steps run perpendicular to the steering direction.
            assert!(step.dot(steering).abs() < 1e-6);
        }
    }

    #[test]
    fn two_ear_room_is_fully_populated() {
        let scene = two_ear_room(&[1.0], 16000).unwrap();
        assert_eq!(scene.receivers().len(), 2);
        assert_eq!(scene.sources().len(), 3);
        assert_eq!(scene.triangles().len(), 12);
        assert_eq!(scene.sample_rate(), 16000);
    }
}
