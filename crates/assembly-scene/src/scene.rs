//! The host-scene seam.
//!
//! The placement code never touches a renderer, asset store or physics world
//! directly. Everything it needs from the host runtime goes through the
//! [`Scene`] trait: resolving prototypes and the boundary volume by name,
//! instantiating and destroying objects, reading and writing transforms, and
//! measuring an oriented object's lowest point.

use serde::{Deserialize, Serialize};

use crate::geometry::{BoxVolume, Transform};
use crate::object::ObjectId;
use crate::SceneError;

/// Handle to a resolved prototype (a template that can be instantiated).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PrototypeId(pub u32);

/// Capabilities the placement code requires from the host runtime.
pub trait Scene {
    /// Look up a prototype by its logical asset name.
    fn resolve_prototype(&self, name: &str) -> Result<PrototypeId, SceneError>;

    /// Look up the named node carrying the placement boundary and return its
    /// box-shaped volume.
    fn boundary_volume(&self, node: &str) -> Result<BoxVolume, SceneError>;

    /// Create a new object from `prototype` with the given local transform.
    fn instantiate(
        &mut self,
        prototype: PrototypeId,
        transform: Transform,
    ) -> Result<ObjectId, SceneError>;

    /// Destroy an object.
    ///
    /// Returns `false` (and does nothing) if the handle is dead or stale.
    fn destroy(&mut self, id: ObjectId) -> bool;

    /// Whether `id` refers to a live object.
    fn is_alive(&self, id: ObjectId) -> bool;

    /// Current local transform of a live object.
    fn transform(&self, id: ObjectId) -> Option<Transform>;

    /// Overwrite the local transform of a live object.
    fn set_transform(&mut self, id: ObjectId, transform: Transform) -> Result<(), SceneError>;

    /// Lowest `y` reached by the object's geometry once its rotation and
    /// scale are applied, relative to the object's own origin.
    ///
    /// Placing the object at height `-vertical_min_extent(id)` rests its
    /// lowest point on the ground plane.
    fn vertical_min_extent(&self, id: ObjectId) -> Result<f64, SceneError>;
}
