//! In-memory reference host.
//!
//! [`MemoryScene`] implements [`Scene`] without any renderer or asset store:
//! prototypes are named boxes, boundary nodes are named box volumes, and live
//! objects are plain transforms keyed by [`ObjectId`]. It backs headless
//! training runs and every test in the workspace.

use std::collections::{BTreeMap, HashMap};

use crate::geometry::{BoxVolume, LocalBox, Transform, Vec3};
use crate::object::{ObjectAllocator, ObjectId};
use crate::scene::{PrototypeId, Scene};
use crate::SceneError;

/// Asset name of the obstacle prototype registered by [`MemoryScene::training_default`].
pub const OBSTACLE_PROTOTYPE: &str = "Prefabs/rock";
/// Asset name of the target-pose prototype registered by [`MemoryScene::training_default`].
pub const TARGET_PROTOTYPE: &str = "Prefabs/Target";
/// Asset name of the component prototype registered by [`MemoryScene::training_default`].
pub const COMPONENT_PROTOTYPE: &str = "Prefabs/Component";
/// Node name of the boundary registered by [`MemoryScene::training_default`].
pub const PLATFORM_NODE: &str = "Platform";

#[derive(Debug, Clone)]
struct Prototype {
    name: String,
    bounds: LocalBox,
}

#[derive(Debug, Clone)]
struct Instance {
    prototype: PrototypeId,
    transform: Transform,
}

/// Volume attached to a named scene node.
#[derive(Debug, Clone, Copy)]
enum NodeVolume {
    Box(BoxVolume),
    /// A node whose collider is not box-shaped.
    Other,
}

/// A self-contained scene with no external runtime behind it.
#[derive(Debug, Default)]
pub struct MemoryScene {
    prototypes: Vec<Prototype>,
    prototype_index: HashMap<String, PrototypeId>,
    nodes: HashMap<String, NodeVolume>,
    allocator: ObjectAllocator,
    /// Keyed by raw id for a stable iteration order.
    instances: BTreeMap<u64, Instance>,
}

impl MemoryScene {
    /// Create an empty scene with no prototypes and no nodes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scene with the three standard training prototypes and a `Platform`
    /// boundary of `width` x `depth` centered on the origin.
    ///
    /// The obstacle is a unit cube resting on its base, the target pose is a
    /// 1 x 0.5 x 0.5 block whose origin sits at one end (so its grounding
    /// height depends on orientation), and the component is a 0.25 cube.
    pub fn training_default(width: f64, depth: f64) -> Self {
        Self::new()
            .with_prototype(
                OBSTACLE_PROTOTYPE,
                LocalBox::new(Vec3::new(0.0, 0.5, 0.0), Vec3::new(0.5, 0.5, 0.5)),
            )
            .with_prototype(
                TARGET_PROTOTYPE,
                LocalBox::new(Vec3::new(0.5, 0.25, 0.0), Vec3::new(0.5, 0.25, 0.25)),
            )
            .with_prototype(
                COMPONENT_PROTOTYPE,
                LocalBox::new(Vec3::ZERO, Vec3::new(0.125, 0.125, 0.125)),
            )
            .with_boundary(
                PLATFORM_NODE,
                BoxVolume::new(Vec3::ZERO, Vec3::new(width, 0.1, depth)),
            )
    }

    /// Register a prototype. Re-registering a name replaces its bounds.
    pub fn with_prototype(mut self, name: &str, bounds: LocalBox) -> Self {
        self.add_prototype(name, bounds);
        self
    }

    /// Register a boundary node carrying a box volume.
    pub fn with_boundary(mut self, node: &str, volume: BoxVolume) -> Self {
        self.nodes.insert(node.to_owned(), NodeVolume::Box(volume));
        self
    }

    /// Register a node whose collider is not box-shaped.
    pub fn with_non_box_node(mut self, node: &str) -> Self {
        self.nodes.insert(node.to_owned(), NodeVolume::Other);
        self
    }

    /// Register (or replace) a prototype and return its handle.
    pub fn add_prototype(&mut self, name: &str, bounds: LocalBox) -> PrototypeId {
        if let Some(&id) = self.prototype_index.get(name) {
            self.prototypes[id.0 as usize].bounds = bounds;
            return id;
        }
        let id = PrototypeId(self.prototypes.len() as u32);
        self.prototypes.push(Prototype {
            name: name.to_owned(),
            bounds,
        });
        self.prototype_index.insert(name.to_owned(), id);
        id
    }

    /// Number of live objects.
    pub fn object_count(&self) -> usize {
        self.allocator.alive_count()
    }

    /// Number of live objects instantiated from the named prototype.
    pub fn count_of(&self, prototype_name: &str) -> usize {
        match self.prototype_index.get(prototype_name) {
            Some(&id) => self
                .instances
                .values()
                .filter(|inst| inst.prototype == id)
                .count(),
            None => 0,
        }
    }

    /// Name of the prototype a live object was instantiated from.
    pub fn prototype_name(&self, id: ObjectId) -> Option<&str> {
        self.instance(id)
            .map(|inst| self.prototypes[inst.prototype.0 as usize].name.as_str())
    }

    fn instance(&self, id: ObjectId) -> Option<&Instance> {
        if !self.allocator.is_alive(id) {
            return None;
        }
        self.instances.get(&id.to_raw())
    }
}

impl Scene for MemoryScene {
    fn resolve_prototype(&self, name: &str) -> Result<PrototypeId, SceneError> {
        self.prototype_index
            .get(name)
            .copied()
            .ok_or_else(|| SceneError::UnknownPrototype {
                name: name.to_owned(),
            })
    }

    fn boundary_volume(&self, node: &str) -> Result<BoxVolume, SceneError> {
        match self.nodes.get(node) {
            Some(NodeVolume::Box(volume)) => Ok(*volume),
            Some(NodeVolume::Other) => Err(SceneError::NotABoxVolume {
                node: node.to_owned(),
            }),
            None => Err(SceneError::MissingNode {
                node: node.to_owned(),
            }),
        }
    }

    fn instantiate(
        &mut self,
        prototype: PrototypeId,
        transform: Transform,
    ) -> Result<ObjectId, SceneError> {
        if prototype.0 as usize >= self.prototypes.len() {
            return Err(SceneError::UnknownPrototype {
                name: format!("#{}", prototype.0),
            });
        }
        let id = self.allocator.allocate();
        self.instances.insert(
            id.to_raw(),
            Instance {
                prototype,
                transform,
            },
        );
        Ok(id)
    }

    fn destroy(&mut self, id: ObjectId) -> bool {
        if !self.allocator.deallocate(id) {
            tracing::trace!(object = %id, "destroy: object already gone");
            return false;
        }
        self.instances.remove(&id.to_raw());
        true
    }

    fn is_alive(&self, id: ObjectId) -> bool {
        self.allocator.is_alive(id)
    }

    fn transform(&self, id: ObjectId) -> Option<Transform> {
        self.instance(id).map(|inst| inst.transform)
    }

    fn set_transform(&mut self, id: ObjectId, transform: Transform) -> Result<(), SceneError> {
        if !self.allocator.is_alive(id) {
            return Err(SceneError::StaleObject { object: id });
        }
        match self.instances.get_mut(&id.to_raw()) {
            Some(inst) => {
                inst.transform = transform;
                Ok(())
            }
            None => Err(SceneError::StaleObject { object: id }),
        }
    }

    fn vertical_min_extent(&self, id: ObjectId) -> Result<f64, SceneError> {
        let inst = self
            .instance(id)
            .ok_or(SceneError::StaleObject { object: id })?;
        let bounds = self.prototypes[inst.prototype.0 as usize].bounds;
        let oriented = Transform::IDENTITY
            .with_rotation(inst.transform.rotation)
            .with_scale(inst.transform.scale);
        Ok(bounds
            .corners()
            .iter()
            .map(|&corner| oriented.apply(corner).y)
            .fold(f64::INFINITY, f64::min))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
