//! Boundary-relative position normalization for agent observations.

use assembly_scene::geometry::Vec3;

use crate::boundary::Boundary;

/// Map a boundary-relative position into unit-interval coordinates.
///
/// The footprint maps onto `[0,1] x {0} x [0,1]`: the center goes to
/// `(0.5, 0, 0.5)` and the `(+half_width, +half_depth)` corner to `(1, 0, 1)`.
/// Positions outside the boundary land outside the unit interval; nothing is
/// clamped. The input height is discarded.
pub fn normalize(boundary: &Boundary, position: Vec3) -> Vec3 {
    let max_x = boundary.half_width();
    let min_x = -max_x;
    let max_z = boundary.half_depth();
    let min_z = -max_z;

    Vec3::new(
        (position.x - min_x) / (max_x - min_x),
        0.0,
        (position.z - min_z) / (max_z - min_z),
    )
}
