//! Uniform sampling over rectangles and bounded rejection sampling.
//!
//! Every placement routine draws horizontal positions uniformly from a
//! [`Rect`] and, where a constraint applies, keeps redrawing until the
//! constraint holds. [`sample_until`] caps the number of draws and reports
//! [`Placement::Infeasible`] instead of spinning forever when the region
//! cannot satisfy the constraint.

use assembly_scene::geometry::Vec3;
use rand::Rng;

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// Closed axis-aligned rectangle in the `x`/`z` plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Rect {
    pub const fn new(min_x: f64, max_x: f64, min_z: f64, max_z: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    /// `true` when no point satisfies both ranges.
    pub fn is_empty(&self) -> bool {
        !(self.min_x <= self.max_x && self.min_z <= self.max_z)
    }

    /// Whether the horizontal projection of `p` lies inside (edges included).
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.z >= self.min_z && p.z <= self.max_z
    }

    /// Length of the diagonal: the largest distance between two points inside.
    pub fn diagonal(&self) -> f64 {
        let w = self.max_x - self.min_x;
        let d = self.max_z - self.min_z;
        (w * w + d * d).sqrt()
    }

    /// Largest horizontal distance from `p` to any point of the rectangle.
    pub fn farthest_distance_from(&self, p: Vec3) -> f64 {
        let dx = (p.x - self.min_x).abs().max((self.max_x - p.x).abs());
        let dz = (p.z - self.min_z).abs().max((self.max_z - p.z).abs());
        (dx * dx + dz * dz).sqrt()
    }

    /// Draw a point uniformly from the rectangle at height `y`.
    ///
    /// The caller must ensure the rectangle is not empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, y: f64) -> Vec3 {
        debug_assert!(!self.is_empty(), "sampling from empty rect {self:?}");
        let x = rng.gen_range(self.min_x..=self.max_x);
        let z = rng.gen_range(self.min_z..=self.max_z);
        Vec3::new(x, y, z)
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Outcome of a bounded rejection sampler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement<T> {
    /// A sample satisfying the constraint.
    Placed(T),
    /// No satisfying sample was drawn within the budget.
    Infeasible {
        /// Number of samples drawn before giving up.
        attempts: u32,
    },
}

impl<T> Placement<T> {
    /// The placed value, if any.
    pub fn placed(self) -> Option<T> {
        match self {
            Placement::Placed(value) => Some(value),
            Placement::Infeasible { .. } => None,
        }
    }
}

/// Draw points from `rect` at height `y` until `accept` returns `true`, for
/// at most `max_attempts` draws.
///
/// An empty rectangle is infeasible without drawing anything.
pub fn sample_until<R, F>(
    rng: &mut R,
    rect: &Rect,
    y: f64,
    max_attempts: u32,
    mut accept: F,
) -> Placement<Vec3>
where
    R: Rng + ?Sized,
    F: FnMut(Vec3) -> bool,
{
    if rect.is_empty() {
        return Placement::Infeasible { attempts: 0 };
    }
    for _ in 0..max_attempts {
        let candidate = rect.sample(rng, y);
        if accept(candidate) {
            return Placement::Placed(candidate);
        }
    }
    Placement::Infeasible {
        attempts: max_attempts,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn samples_stay_inside() {
        let mut rng = Pcg64::seed_from_u64(7);
        let rect = Rect::new(-3.0, 5.0, 1.0, 2.0);
        for _ in 0..1000 {
            let p = rect.sample(&mut rng, 0.25);
            assert!(rect.contains(p));
            assert_eq!(p.y, 0.25);
        }
    }

    #[test]
    fn degenerate_rect_is_a_point() {
        let mut rng = Pcg64::seed_from_u64(1);
        let rect = Rect::new(2.0, 2.0, -1.0, -1.0);
        assert!(!rect.is_empty());
        assert_eq!(rect.sample(&mut rng, 0.0), Vec3::new(2.0, 0.0, -1.0));
    }

    #[test]
    fn diagonal_and_farthest_distance() {
        let rect = Rect::new(-3.0, 3.0, -4.0, 4.0);
        assert_eq!(rect.diagonal(), 10.0);
        assert_eq!(rect.farthest_distance_from(Vec3::new(3.0, 0.0, 4.0)), 10.0);
        assert_eq!(rect.farthest_distance_from(Vec3::ZERO), 5.0);
    }

    #[test]
    fn sample_until_accepts_first_match() {
        let mut rng = Pcg64::seed_from_u64(3);
        let rect = Rect::new(-10.0, 10.0, -10.0, 10.0);
        let placed = sample_until(&mut rng, &rect, 0.0, 1000, |p| p.x > 0.0);
        assert!(placed.placed().unwrap().x > 0.0);
    }

    #[test]
    fn sample_until_gives_up() {
        let mut rng = Pcg64::seed_from_u64(3);
        let rect = Rect::new(-1.0, 1.0, -1.0, 1.0);
        let mut calls = 0;
        let outcome = sample_until(&mut rng, &rect, 0.0, 25, |_| {
            calls += 1;
            false
        });
        assert_eq!(outcome, Placement::Infeasible { attempts: 25 });
        assert_eq!(calls, 25);
    }

    #[test]
    fn empty_rect_draws_nothing() {
        let mut rng = Pcg64::seed_from_u64(3);
        let rect = Rect::new(1.0, -1.0, 0.0, 0.0);
        let outcome = sample_until(&mut rng, &rect, 0.0, 25, |_| true);
        assert_eq!(outcome, Placement::Infeasible { attempts: 0 });
    }
}
