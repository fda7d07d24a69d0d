//! The environment manager.
//!
//! [`EnvironmentManager`] owns everything one training environment places in
//! the scene: the obstacle layout, the assembly collection (target poses) and
//! the stack collection (components). An external training loop typically
//! calls, once per episode:
//!
//! 1. [`reset_environment`](EnvironmentManager::reset_environment)
//! 2. [`generate_obstacles`](EnvironmentManager::generate_obstacles)
//! 3. [`generate_assembly_pair`](EnvironmentManager::generate_assembly_pair)
//!
//! and then, during the episode, [`find_valid_position`](EnvironmentManager::find_valid_position)
//! and [`normalized_position`](EnvironmentManager::normalized_position) as
//! often as it needs.
//!
//! # Ownership
//!
//! Every generator call destroys the instances it created last time before
//! creating new ones, so regenerating never orphans scene objects. A call
//! that fails before touching the scene leaves the previous layout intact.
//!
//! # Initialization
//!
//! Asset and boundary lookups happen once, in [`EnvironmentManager::new`].
//! A manager only exists in the initialized state, so no placement can run
//! against a half-configured scene.

use assembly_scene::geometry::{Transform, Vec3};
use assembly_scene::object::ObjectId;
use assembly_scene::scene::{PrototypeId, Scene};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::assembly::{plan_pair, sample_orientation};
use crate::boundary::Boundary;
use crate::config::EnvConfig;
use crate::normalize::normalize;
use crate::obstacles::plan_obstacles;
use crate::sampling::Placement;
use crate::spawn::find_spawn_point;
use crate::{EnvError, PlacementKind};

// ---------------------------------------------------------------------------
// PlacedObject / AssemblyPair
// ---------------------------------------------------------------------------

/// A live scene object together with its local transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub id: ObjectId,
    pub transform: Transform,
}

impl PlacedObject {
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }
}

/// The target pose and the component produced by one
/// [`generate_assembly_pair`](EnvironmentManager::generate_assembly_pair) call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyPair {
    pub target: PlacedObject,
    pub component: PlacedObject,
}

impl AssemblyPair {
    /// Horizontal distance between target and component.
    pub fn separation(&self) -> f64 {
        self.target
            .position()
            .horizontal_distance(self.component.position())
    }
}

#[derive(Debug, Clone, Copy)]
struct Prototypes {
    obstacle: PrototypeId,
    target: PrototypeId,
    component: PrototypeId,
}

// ---------------------------------------------------------------------------
// EnvironmentManager
// ---------------------------------------------------------------------------

/// Procedural layout and spatial queries for one training environment.
///
/// Generic over the host scene `S` and the random source `R`. The default
/// random source is a PCG generator; see [`EnvironmentManager::seeded`].
pub struct EnvironmentManager<S, R = Pcg64> {
    scene: S,
    rng: R,
    config: EnvConfig,
    boundary: Boundary,
    prototypes: Prototypes,
    obstacles: Vec<ObjectId>,
    /// Target poses owned by the current episode.
    assembly: Vec<ObjectId>,
    /// Components owned by the current episode.
    stack: Vec<ObjectId>,
    current_target: Option<ObjectId>,
    current_component: Option<ObjectId>,
    episode: u64,
}

impl<S: Scene> EnvironmentManager<S, Pcg64> {
    /// Create a manager with a PCG generator seeded from `seed`.
    pub fn seeded(scene: S, config: EnvConfig, seed: u64) -> Result<Self, EnvError> {
        Self::new(scene, config, Pcg64::seed_from_u64(seed))
    }
}

impl<S: Scene, R: Rng> EnvironmentManager<S, R> {
    /// Validate `config`, resolve the three prototypes and the boundary
    /// volume, and return an initialized manager.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Configuration`] if the config is invalid, an asset
    /// cannot be resolved, or the boundary node is missing or not a usable
    /// box volume.
    pub fn new(scene: S, config: EnvConfig, rng: R) -> Result<Self, EnvError> {
        config.validate()?;

        let resolve = |name: &str| {
            scene
                .resolve_prototype(name)
                .map_err(|e| EnvError::configuration(e.to_string()))
        };
        let prototypes = Prototypes {
            obstacle: resolve(&config.obstacle_asset)?,
            target: resolve(&config.target_asset)?,
            component: resolve(&config.component_asset)?,
        };

        let volume = scene
            .boundary_volume(&config.boundary_node)
            .map_err(|e| EnvError::configuration(e.to_string()))?;
        let boundary = Boundary::from_volume(&volume)?;

        tracing::info!(
            width = boundary.size().x,
            depth = boundary.size().z,
            node = %config.boundary_node,
            "environment initialized"
        );

        Ok(Self {
            scene,
            rng,
            config,
            boundary,
            prototypes,
            obstacles: Vec::new(),
            assembly: Vec::new(),
            stack: Vec::new(),
            current_target: None,
            current_component: None,
            episode: 0,
        })
    }

    // -- accessors ----------------------------------------------------------

    /// Full size of the boundary volume.
    pub fn boundary_size(&self) -> Vec3 {
        self.boundary.size()
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// The target pose created by the last successful
    /// [`generate_assembly_pair`](Self::generate_assembly_pair), until reset.
    pub fn current_target(&self) -> Option<ObjectId> {
        self.current_target
    }

    /// The component created by the last successful
    /// [`generate_assembly_pair`](Self::generate_assembly_pair), until reset.
    pub fn current_component(&self) -> Option<ObjectId> {
        self.current_component
    }

    /// Handles of the current obstacle layout.
    pub fn obstacles(&self) -> &[ObjectId] {
        &self.obstacles
    }

    /// Number of episodes started via [`start_episode`](Self::start_episode).
    pub fn episode(&self) -> u64 {
        self.episode
    }

    /// Handle plus current transform of a live object.
    pub fn placed(&self, id: ObjectId) -> Option<PlacedObject> {
        self.scene
            .transform(id)
            .map(|transform| PlacedObject { id, transform })
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub(crate) fn advance_episode(&mut self) -> u64 {
        self.episode += 1;
        self.episode
    }

    // -- obstacles ----------------------------------------------------------

    /// Replace the obstacle layout with `count` freshly drawn obstacles.
    ///
    /// The whole layout is drawn before anything is instantiated; if that
    /// fails the previous layout stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::PlacementInfeasible`] if the boundary is too small
    /// for an obstacle's scale, or [`EnvError::Scene`] if instantiation fails.
    pub fn generate_obstacles(&mut self, count: usize) -> Result<&[ObjectId], EnvError> {
        let layout = plan_obstacles(
            &mut self.rng,
            &self.boundary,
            self.config.obstacle_scale_min,
            self.config.obstacle_scale_max,
            count,
        )?;

        let released = release(&mut self.scene, &mut self.obstacles);
        for transform in layout {
            let id = self.scene.instantiate(self.prototypes.obstacle, transform)?;
            self.obstacles.push(id);
        }

        tracing::debug!(count, released, "generated obstacle layout");
        Ok(&self.obstacles)
    }

    /// Destroy the obstacle layout. Returns the number of objects destroyed.
    pub fn clear_obstacles(&mut self) -> usize {
        release(&mut self.scene, &mut self.obstacles)
    }

    // -- episode reset ------------------------------------------------------

    /// Destroy the assembly and stack collections (and the obstacle layout
    /// when `reset_clears_obstacles` is set). Already-destroyed entries are
    /// skipped. Returns the number of objects destroyed.
    pub fn reset_environment(&mut self) -> usize {
        let mut destroyed = release(&mut self.scene, &mut self.assembly);
        destroyed += release(&mut self.scene, &mut self.stack);
        if self.config.reset_clears_obstacles {
            destroyed += release(&mut self.scene, &mut self.obstacles);
        }
        self.current_target = None;
        self.current_component = None;

        tracing::debug!(destroyed, "environment reset");
        destroyed
    }

    // -- assembly pair ------------------------------------------------------

    /// Create a new target pose and component and make them current.
    ///
    /// The target gets a random right-angle orientation and is lifted so its
    /// lowest point rests at height 0. Both lie inside the boundary inset by
    /// `assembly_margin`, at least `min_separation` apart horizontally. The
    /// previous pair is destroyed first.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::PlacementInfeasible`] (leaving the previous pair in
    /// place) if no separated pair fits within the attempt budget.
    pub fn generate_assembly_pair(&mut self) -> Result<AssemblyPair, EnvError> {
        let orientation = sample_orientation(&mut self.rng);
        let rect = self.boundary.inset(self.config.assembly_margin);
        let positions = match plan_pair(
            &mut self.rng,
            &rect,
            self.config.min_separation,
            self.config.component_height,
            self.config.max_attempts,
        ) {
            Placement::Placed(positions) => positions,
            Placement::Infeasible { attempts } => {
                tracing::warn!(
                    attempts,
                    separation = self.config.min_separation,
                    "no separated target/component pair fits the boundary"
                );
                return Err(EnvError::PlacementInfeasible {
                    placement: PlacementKind::AssemblyPair,
                    attempts,
                });
            }
        };

        release(&mut self.scene, &mut self.assembly);
        release(&mut self.scene, &mut self.stack);
        self.current_target = None;
        self.current_component = None;

        let oriented = Transform::IDENTITY.with_rotation(orientation);
        let target = self.scene.instantiate(self.prototypes.target, oriented)?;
        self.assembly.push(target);
        let component = self
            .scene
            .instantiate(self.prototypes.component, Transform::at(positions.component))?;
        self.stack.push(component);

        // Ground the oriented target: its lowest point must sit at height 0.
        let min_y = self.scene.vertical_min_extent(target)?;
        let target_transform = Transform::at(Vec3::new(
            positions.target.x,
            -min_y,
            positions.target.z,
        ))
        .with_rotation(orientation);
        self.scene.set_transform(target, target_transform)?;

        self.current_target = Some(target);
        self.current_component = Some(component);

        let pair = AssemblyPair {
            target: PlacedObject {
                id: target,
                transform: target_transform,
            },
            component: PlacedObject {
                id: component,
                transform: Transform::at(positions.component),
            },
        };
        tracing::debug!(
            target = %target,
            component = %component,
            separation = pair.separation(),
            "generated assembly pair"
        );
        Ok(pair)
    }

    // -- spatial queries ----------------------------------------------------

    /// Draw an agent spawn point at `spawn_height` inside the boundary inset
    /// by `spawn_margin`, at least `spawn_clearance` away from every live
    /// target and component.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::PlacementInfeasible`] if no such point is found
    /// within the attempt budget.
    pub fn find_valid_position(&mut self) -> Result<Vec3, EnvError> {
        let exclusions: Vec<Vec3> = self
            .assembly
            .iter()
            .chain(self.stack.iter())
            .filter_map(|&id| self.scene.transform(id))
            .map(|transform| transform.position)
            .collect();

        let rect = self.boundary.inset(self.config.spawn_margin);
        match find_spawn_point(
            &mut self.rng,
            &rect,
            self.config.spawn_height,
            self.config.spawn_clearance,
            &exclusions,
            self.config.max_attempts,
        ) {
            Placement::Placed(position) => Ok(position),
            Placement::Infeasible { attempts } => {
                tracing::warn!(
                    attempts,
                    exclusions = exclusions.len(),
                    "no spawn point clears the tracked objects"
                );
                Err(EnvError::PlacementInfeasible {
                    placement: PlacementKind::SpawnPoint,
                    attempts,
                })
            }
        }
    }

    /// Map a boundary-relative position into `[0,1] x {0} x [0,1]`.
    pub fn normalized_position(&self, position: Vec3) -> Vec3 {
        normalize(&self.boundary, position)
    }
}

/// Destroy every live object in `ids` and empty the collection.
fn release<S: Scene>(scene: &mut S, ids: &mut Vec<ObjectId>) -> usize {
    let mut destroyed = 0;
    for id in ids.drain(..) {
        if scene.destroy(id) {
            destroyed += 1;
        } else {
            tracing::debug!(object = %id, "skipping already-destroyed object");
        }
    }
    destroyed
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
