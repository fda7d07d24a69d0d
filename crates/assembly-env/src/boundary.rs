//! The placement boundary.
//!
//! The boundary is an axis-aligned rectangle in the `x`/`z` plane, centered on
//! the environment's local origin. Its half-extents are derived once from the
//! host's boundary volume and never change afterwards.

use assembly_scene::geometry::{BoxVolume, Vec3};

use crate::sampling::Rect;
use crate::EnvError;

/// Rectangular footprint within which all placement happens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    size: Vec3,
    half_width: f64,
    half_depth: f64,
}

impl Boundary {
    /// Build a boundary from a host volume. Only the volume's size is used;
    /// the boundary is always centered on the local origin.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Configuration`] if the width or depth is not a
    /// positive finite number.
    pub fn from_volume(volume: &BoxVolume) -> Result<Self, EnvError> {
        Self::from_size(volume.size)
    }

    /// Build a boundary directly from a size vector.
    pub fn from_size(size: Vec3) -> Result<Self, EnvError> {
        if !(size.x.is_finite() && size.x > 0.0 && size.z.is_finite() && size.z > 0.0) {
            return Err(EnvError::configuration(format!(
                "boundary footprint must be positive and finite, got {} x {}",
                size.x, size.z
            )));
        }
        Ok(Self {
            size,
            half_width: size.x / 2.0,
            half_depth: size.z / 2.0,
        })
    }

    /// Full size of the boundary volume.
    pub fn size(&self) -> Vec3 {
        self.size
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn half_depth(&self) -> f64 {
        self.half_depth
    }

    /// The footprint shrunk by `margin` on every side.
    ///
    /// The result is empty (see [`Rect::is_empty`]) when `margin` exceeds a
    /// half-extent.
    pub fn inset(&self, margin: f64) -> Rect {
        Rect::new(
            -self.half_width + margin,
            self.half_width - margin,
            -self.half_depth + margin,
            self.half_depth - margin,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary(width: f64, depth: f64) -> Boundary {
        Boundary::from_size(Vec3::new(width, 1.0, depth)).unwrap()
    }

    #[test]
    fn half_extents_from_volume() {
        let volume = BoxVolume::new(Vec3::new(5.0, 0.0, 5.0), Vec3::new(20.0, 0.2, 12.0));
        let b = Boundary::from_volume(&volume).unwrap();
        assert_eq!(b.half_width(), 10.0);
        assert_eq!(b.half_depth(), 6.0);
        assert_eq!(b.size(), volume.size);
    }

    #[test]
    fn degenerate_volume_rejected() {
        assert!(Boundary::from_size(Vec3::new(0.0, 1.0, 4.0)).is_err());
        assert!(Boundary::from_size(Vec3::new(4.0, 1.0, f64::NAN)).is_err());
    }

    #[test]
    fn inset_shrinks_each_side() {
        let r = boundary(20.0, 10.0).inset(2.0);
        assert_eq!((r.min_x, r.max_x, r.min_z, r.max_z), (-8.0, 8.0, -3.0, 3.0));
        assert!(boundary(2.0, 2.0).inset(1.5).is_empty());
    }
}
