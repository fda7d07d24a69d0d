//! Geometry value types shared by the host scene and the placement code.
//!
//! The coordinate convention is y-up: placement happens in the horizontal
//! `x`/`z` plane and `y` is height above the ground.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Vec3
// ---------------------------------------------------------------------------

/// A 3D vector / point.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    /// Horizontal axis (width).
    pub x: f64,
    /// Vertical axis (height).
    pub y: f64,
    /// Horizontal axis (depth).
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// `(1, 1, 1)`.
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Full 3D distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec3) -> f64 {
        (self - other).length()
    }

    /// Distance to `other` projected onto the `x`/`z` plane.
    #[inline]
    pub fn horizontal_distance(self, other: Vec3) -> f64 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

// ---------------------------------------------------------------------------
// EulerAngles
// ---------------------------------------------------------------------------

/// Rotation as three per-axis angles in degrees.
///
/// Applied in the host's order: first about `z`, then about `x`, then about
/// `y` (`R = Ry * Rx * Rz`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EulerAngles {
    /// No rotation.
    pub const IDENTITY: EulerAngles = EulerAngles {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// A pure rotation about the vertical axis.
    #[inline]
    pub const fn yaw(degrees: f64) -> Self {
        Self::new(0.0, degrees, 0.0)
    }

    /// Rotate `v` by these angles.
    pub fn rotate(self, v: Vec3) -> Vec3 {
        let (sz, cz) = self.z.to_radians().sin_cos();
        let (sx, cx) = self.x.to_radians().sin_cos();
        let (sy, cy) = self.y.to_radians().sin_cos();

        // z
        let v = Vec3::new(v.x * cz - v.y * sz, v.x * sz + v.y * cz, v.z);
        // x
        let v = Vec3::new(v.x, v.y * cx - v.z * sx, v.y * sx + v.z * cx);
        // y
        Vec3::new(v.x * cy + v.z * sy, v.y, -v.x * sy + v.z * cy)
    }
}

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

/// Local position, rotation and uniform scale of a scene object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: EulerAngles,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Transform {
    /// Origin, no rotation, unit scale.
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: EulerAngles::IDENTITY,
        scale: 1.0,
    };

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: EulerAngles) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Map a point from object space into parent space.
    pub fn apply(&self, local: Vec3) -> Vec3 {
        self.rotation.rotate(local * self.scale) + self.position
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

// ---------------------------------------------------------------------------
// LocalBox
// ---------------------------------------------------------------------------

/// Geometric bounds of a prototype in its own (unrotated, unscaled) frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocalBox {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl LocalBox {
    pub const fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// A unit cube (`half_extents = 0.5`) centered on the origin.
    pub const fn unit() -> Self {
        Self::new(Vec3::ZERO, Vec3::new(0.5, 0.5, 0.5))
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        let c = self.center;
        let h = self.half_extents;
        let mut out = [Vec3::ZERO; 8];
        for (i, corner) in out.iter_mut().enumerate() {
            let sx = if i & 1 == 0 { -1.0 } else { 1.0 };
            let sy = if i & 2 == 0 { -1.0 } else { 1.0 };
            let sz = if i & 4 == 0 { -1.0 } else { 1.0 };
            *corner = Vec3::new(c.x + sx * h.x, c.y + sy * h.y, c.z + sz * h.z);
        }
        out
    }
}

// ---------------------------------------------------------------------------
// BoxVolume
// ---------------------------------------------------------------------------

/// An axis-aligned box volume, as carried by a box-shaped collider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxVolume {
    pub center: Vec3,
    /// Full extents along each axis.
    pub size: Vec3,
}

impl BoxVolume {
    pub const fn new(center: Vec3, size: Vec3) -> Self {
        Self { center, size }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
