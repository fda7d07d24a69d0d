//! Agent spawn-point search.

use assembly_scene::geometry::Vec3;
use rand::Rng;

use crate::sampling::{sample_until, Placement, Rect};

/// Draw a spawn point at `height` inside `rect` that is at least `clearance`
/// away (full 3D distance) from every point in `exclusions`.
///
/// With no exclusions the first draw is accepted.
pub fn find_spawn_point<R: Rng + ?Sized>(
    rng: &mut R,
    rect: &Rect,
    height: f64,
    clearance: f64,
    exclusions: &[Vec3],
    max_attempts: u32,
) -> Placement<Vec3> {
    sample_until(rng, rect, height, max_attempts, |candidate| {
        exclusions
            .iter()
            .all(|&occupied| candidate.distance(occupied) >= clearance)
    })
}
