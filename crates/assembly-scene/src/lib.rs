//! Assembly Scene -- the host-runtime seam for the assembly training environment.
//!
//! The placement logic in `assembly-env` treats the game engine as an external
//! collaborator. This crate defines that collaborator: generational object
//! handles, the geometry value types that cross the seam, the [`Scene`] trait
//! the host implements, and [`MemoryScene`], a headless in-memory host.
//!
//! # Quick Start
//!
//! ```
//! use assembly_scene::prelude::*;
//!
//! let mut scene = MemoryScene::training_default(20.0, 20.0);
//! let rock = scene.resolve_prototype("Prefabs/rock").unwrap();
//! let id = scene
//!     .instantiate(rock, Transform::at(Vec3::new(1.0, 0.0, -2.0)))
//!     .unwrap();
//!
//! assert!(scene.is_alive(id));
//! assert!(scene.destroy(id));
//! assert!(!scene.is_alive(id));
//! ```

#![deny(unsafe_code)]

pub mod geometry;
pub mod memory;
pub mod object;
pub mod scene;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by scene operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    /// The object does not exist (destroyed, stale generation, or never created).
    #[error("object {object:?} does not exist (destroyed or stale)")]
    StaleObject { object: object::ObjectId },

    /// No prototype is registered under the requested asset name.
    #[error("prototype '{name}' could not be resolved")]
    UnknownPrototype { name: String },

    /// The scene has no node with the requested name.
    #[error("scene node '{node}' not found")]
    MissingNode { node: String },

    /// The node exists but does not carry a box-shaped volume.
    #[error("scene node '{node}' does not carry a box-shaped volume")]
    NotABoxVolume { node: String },
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::geometry::{BoxVolume, EulerAngles, LocalBox, Transform, Vec3};
    pub use crate::memory::{
        MemoryScene, COMPONENT_PROTOTYPE, OBSTACLE_PROTOTYPE, PLATFORM_NODE, TARGET_PROTOTYPE,
    };
    pub use crate::object::{ObjectAllocator, ObjectId};
    pub use crate::scene::{PrototypeId, Scene};
    pub use crate::SceneError;
}
