//! Obstacle layout planning.
//!
//! Each obstacle is drawn independently: a uniform yaw in `[0, 360)`, a uniform
//! scale `s` from the configured range, and a horizontal position inset from
//! the boundary edge by `s`. Obstacles may overlap one another.

use assembly_scene::geometry::{EulerAngles, Transform};
use rand::Rng;

use crate::boundary::Boundary;
use crate::{EnvError, PlacementKind};

/// Draw the transform of a single obstacle.
///
/// Returns `None` when the drawn scale leaves no room inside the boundary.
pub fn sample_obstacle<R: Rng + ?Sized>(
    rng: &mut R,
    boundary: &Boundary,
    scale_min: f64,
    scale_max: f64,
) -> Option<Transform> {
    let yaw = rng.gen_range(0.0..360.0);
    let scale = rng.gen_range(scale_min..=scale_max);

    let rect = boundary.inset(scale);
    if rect.is_empty() {
        return None;
    }
    let position = rect.sample(rng, 0.0);

    Some(
        Transform::at(position)
            .with_rotation(EulerAngles::yaw(yaw))
            .with_scale(scale),
    )
}

/// Draw `count` obstacle transforms.
///
/// Nothing is instantiated here, so a failure leaves the scene untouched.
///
/// # Errors
///
/// Returns [`EnvError::PlacementInfeasible`] if an obstacle's scale does not
/// fit inside the boundary.
pub fn plan_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    boundary: &Boundary,
    scale_min: f64,
    scale_max: f64,
    count: usize,
) -> Result<Vec<Transform>, EnvError> {
    let mut layout = Vec::with_capacity(count);
    for _ in 0..count {
        match sample_obstacle(rng, boundary, scale_min, scale_max) {
            Some(transform) => layout.push(transform),
            None => {
                return Err(EnvError::PlacementInfeasible {
                    placement: PlacementKind::Obstacle,
                    attempts: 0,
                })
            }
        }
    }
    Ok(layout)
}
