//! Target/component pair planning.
//!
//! The target pose gets one of 64 axis-aligned orientations (0, 90, 180 or 270
//! degrees about each axis). Target and component positions are drawn from the
//! same inset rectangle and the component is redrawn until it is at least the
//! minimum separation away from the target, measured in the horizontal plane.

use assembly_scene::geometry::{EulerAngles, Vec3};
use rand::Rng;

use crate::sampling::{sample_until, Placement, Rect};

/// Right-angle step used for target orientations.
pub const ORIENTATION_STEP_DEGREES: f64 = 90.0;

/// Horizontal positions for a target/component pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairPositions {
    /// Target position at height 0; the grounding height is applied once the
    /// oriented target exists in the scene.
    pub target: Vec3,
    /// Component position at its resting height.
    pub component: Vec3,
}

/// Draw a target orientation: an independent multiple of 90 degrees per axis.
pub fn sample_orientation<R: Rng + ?Sized>(rng: &mut R) -> EulerAngles {
    let x = rng.gen_range(0..4u8);
    let z = rng.gen_range(0..4u8);
    let y = rng.gen_range(0..4u8);
    EulerAngles::new(
        f64::from(x) * ORIENTATION_STEP_DEGREES,
        f64::from(y) * ORIENTATION_STEP_DEGREES,
        f64::from(z) * ORIENTATION_STEP_DEGREES,
    )
}

/// Draw target and component positions from `rect` with at least
/// `separation` horizontal distance between them.
///
/// A drawn target from which no point of `rect` is far enough is redrawn.
/// Every target and component draw counts against `max_attempts`. A
/// rectangle whose diagonal is shorter than `separation` is infeasible
/// without drawing anything.
pub fn plan_pair<R: Rng + ?Sized>(
    rng: &mut R,
    rect: &Rect,
    separation: f64,
    component_height: f64,
    max_attempts: u32,
) -> Placement<PairPositions> {
    if rect.is_empty() || rect.diagonal() < separation {
        return Placement::Infeasible { attempts: 0 };
    }

    let mut attempts = 0u32;
    while attempts < max_attempts {
        let target = rect.sample(rng, 0.0);
        attempts += 1;
        if rect.farthest_distance_from(target) < separation {
            continue;
        }

        let budget = max_attempts - attempts;
        match sample_until(rng, rect, component_height, budget, |candidate| {
            candidate.horizontal_distance(target) >= separation
        }) {
            Placement::Placed(component) => {
                return Placement::Placed(PairPositions { target, component })
            }
            Placement::Infeasible { attempts: used } => attempts += used,
        }
    }

    tracing::trace!(attempts, separation, "pair sampling exhausted its budget");
    Placement::Infeasible { attempts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn orientations_are_right_angles() {
        let mut rng = Pcg64::seed_from_u64(5);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            let o = sample_orientation(&mut rng);
            for angle in [o.x, o.y, o.z] {
                assert!([0.0, 90.0, 180.0, 270.0].contains(&angle), "{angle}");
            }
            seen.insert((o.x as i32, o.y as i32, o.z as i32));
        }
        assert_eq!(seen.len(), 64, "all 64 combinations should appear");
    }

    #[test]
    fn pair_is_separated_and_inside() {
        let mut rng = Pcg64::seed_from_u64(9);
        let rect = Rect::new(-9.0, 9.0, -9.0, 9.0);
        for _ in 0..500 {
            let pair = plan_pair(&mut rng, &rect, 10.0, 0.125, 10_000)
                .placed()
                .unwrap();
            assert!(pair.target.horizontal_distance(pair.component) >= 10.0);
            assert!(rect.contains(pair.target));
            assert!(rect.contains(pair.component));
            assert_eq!(pair.component.y, 0.125);
        }
    }

    #[test]
    fn small_rect_is_rejected_up_front() {
        let mut rng = Pcg64::seed_from_u64(9);
        let rect = Rect::new(-2.0, 2.0, -2.0, 2.0);
        assert_eq!(
            plan_pair(&mut rng, &rect, 10.0, 0.125, 10_000),
            Placement::Infeasible { attempts: 0 }
        );
    }

    #[test]
    fn tight_rect_exhausts_budget() {
        // Only the extreme corners are 10 apart; the chance of hitting them
        // within a handful of draws is negligible.
        let mut rng = Pcg64::seed_from_u64(2);
        let rect = Rect::new(-3.0, 3.0, -4.0, 4.0);
        assert_eq!(
            plan_pair(&mut rng, &rect, 10.0, 0.125, 8),
            Placement::Infeasible { attempts: 8 }
        );
    }
}
