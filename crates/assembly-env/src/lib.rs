//! Assembly Env -- procedural layout for an assembly-task training environment.
//!
//! This crate builds on [`assembly_scene`] to drive a reinforcement-learning
//! environment: it scatters obstacles, places a target pose and a component
//! to be picked up, resets the scene between episodes, and answers spatial
//! queries for the agent (a valid spawn point, normalized positions).
//!
//! Every constrained placement is a bounded rejection sampler. When a region
//! cannot satisfy its constraint the call returns
//! [`EnvError::PlacementInfeasible`] instead of looping forever. Randomness
//! is injected, so a seeded generator gives reproducible layouts.
//!
//! # Quick Start
//!
//! ```
//! use assembly_env::prelude::*;
//!
//! let scene = MemoryScene::training_default(20.0, 20.0);
//! let mut env = EnvironmentManager::seeded(scene, EnvConfig::default(), 42).unwrap();
//!
//! env.reset_environment();
//! env.generate_obstacles(5).unwrap();
//! let pair = env.generate_assembly_pair().unwrap();
//! assert!(pair.separation() >= 10.0);
//!
//! let spawn = env.find_valid_position().unwrap();
//! let observed = env.normalized_position(spawn);
//! assert!((0.0..=1.0).contains(&observed.x));
//! ```

#![deny(unsafe_code)]

use std::fmt;

use assembly_scene::SceneError;

pub mod assembly;
pub mod boundary;
pub mod config;
pub mod episode;
pub mod manager;
pub mod normalize;
pub mod obstacles;
pub mod sampling;
pub mod snapshot;
pub mod spawn;

/// Re-export the scene crate for convenience.
pub use assembly_scene;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Which placement a [`EnvError::PlacementInfeasible`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementKind {
    Obstacle,
    AssemblyPair,
    SpawnPoint,
}

impl fmt::Display for PlacementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlacementKind::Obstacle => "obstacle",
            PlacementKind::AssemblyPair => "assembly pair",
            PlacementKind::SpawnPoint => "spawn point",
        };
        f.write_str(name)
    }
}

/// Errors produced by environment operations.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// A required asset, the boundary node, or a config value is unusable.
    /// Raised while constructing the manager, never later.
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// The boundary cannot satisfy a placement constraint.
    #[error("{placement} placement infeasible after {attempts} attempts")]
    PlacementInfeasible {
        placement: PlacementKind,
        attempts: u32,
    },

    /// A host scene call failed.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Configuration text could not be parsed.
    #[error("failed to parse environment config: {0}")]
    Config(#[from] serde_json::Error),
}

impl EnvError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        EnvError::Configuration {
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use assembly_scene::prelude::*;

    pub use crate::boundary::Boundary;
    pub use crate::config::EnvConfig;
    pub use crate::episode::{EpisodeConfig, EpisodeReport};
    pub use crate::manager::{AssemblyPair, EnvironmentManager, PlacedObject};
    pub use crate::sampling::{Placement, Rect};
    pub use crate::snapshot::LayoutSnapshot;
    pub use crate::{EnvError, PlacementKind};
}
