//! Layout snapshots with BLAKE3 hashing.
//!
//! A [`LayoutSnapshot`] records everything the manager has placed (obstacles,
//! current target, current component) plus the episode counter, and carries
//! a BLAKE3 digest of that content. Two managers built with the same scene,
//! config and seed, driven by the same call sequence, produce identical
//! digests, which makes the snapshot the tool of choice for determinism
//! checks and for logging the layout a policy was trained on.
//!
//! ```
//! use assembly_env::prelude::*;
//!
//! let scene = MemoryScene::training_default(20.0, 20.0);
//! let mut env = EnvironmentManager::seeded(scene, EnvConfig::default(), 7).unwrap();
//! env.start_episode(&EpisodeConfig { obstacle_count: 4 }).unwrap();
//!
//! let snapshot = env.capture_snapshot();
//! assert_eq!(snapshot.obstacles.len(), 4);
//! assert_eq!(snapshot.hash.len(), 64);
//! snapshot.verify().unwrap();
//! ```

use assembly_scene::geometry::Vec3;
use assembly_scene::scene::Scene;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::manager::{EnvironmentManager, PlacedObject};

// ---------------------------------------------------------------------------
// LayoutSnapshot
// ---------------------------------------------------------------------------

/// A serializable record of the current layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Episode counter at the time of capture.
    pub episode: u64,
    /// Size of the boundary volume.
    pub boundary_size: Vec3,
    /// Live obstacles, in generation order.
    pub obstacles: Vec<PlacedObject>,
    pub target: Option<PlacedObject>,
    pub component: Option<PlacedObject>,
    /// BLAKE3 hex digest (64 lowercase hex chars) of the fields above.
    pub hash: String,
}

impl LayoutSnapshot {
    /// Recompute the digest and compare it with the recorded one.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot was modified after capture.
    pub fn verify(&self) -> Result<(), anyhow::Error> {
        let expected = compute_hash(
            self.episode,
            self.boundary_size,
            &self.obstacles,
            self.target.as_ref(),
            self.component.as_ref(),
        );
        if expected != self.hash {
            return Err(anyhow::anyhow!(
                "layout snapshot hash mismatch: recorded {} but recomputed {}",
                self.hash,
                expected
            ));
        }
        Ok(())
    }

    /// Parse a snapshot from JSON and verify its digest.
    pub fn from_json(text: &str) -> Result<Self, anyhow::Error> {
        let snapshot: LayoutSnapshot = serde_json::from_str(text)
            .map_err(|e| anyhow::anyhow!("failed to parse layout snapshot: {e}"))?;
        snapshot.verify()?;
        Ok(snapshot)
    }
}

// ---------------------------------------------------------------------------
// Hashing helpers
// ---------------------------------------------------------------------------

fn compute_hash(
    episode: u64,
    boundary_size: Vec3,
    obstacles: &[PlacedObject],
    target: Option<&PlacedObject>,
    component: Option<&PlacedObject>,
) -> String {
    #[derive(Serialize)]
    struct HashableLayout<'a> {
        episode: u64,
        boundary_size: Vec3,
        obstacles: &'a [PlacedObject],
        target: Option<&'a PlacedObject>,
        component: Option<&'a PlacedObject>,
    }

    let hashable = HashableLayout {
        episode,
        boundary_size,
        obstacles,
        target,
        component,
    };
    let json_bytes = serde_json::to_vec(&hashable)
        .expect("layout state should always be JSON-serializable");

    blake3::hash(&json_bytes).to_hex().to_string()
}

// ---------------------------------------------------------------------------
// EnvironmentManager snapshot methods
// ---------------------------------------------------------------------------

impl<S: Scene, R: Rng> EnvironmentManager<S, R> {
    /// Capture the current layout. Objects destroyed outside the manager are
    /// left out.
    pub fn capture_snapshot(&self) -> LayoutSnapshot {
        let obstacles: Vec<PlacedObject> = self
            .obstacles()
            .iter()
            .filter_map(|&id| self.placed(id))
            .collect();
        let target = self.current_target().and_then(|id| self.placed(id));
        let component = self.current_component().and_then(|id| self.placed(id));
        let episode = self.episode();
        let boundary_size = self.boundary_size();

        let hash = compute_hash(
            episode,
            boundary_size,
            &obstacles,
            target.as_ref(),
            component.as_ref(),
        );

        LayoutSnapshot {
            episode,
            boundary_size,
            obstacles,
            target,
            component,
            hash,
        }
    }

    /// The digest [`capture_snapshot`](Self::capture_snapshot) would record.
    pub fn layout_hash(&self) -> String {
        self.capture_snapshot().hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvConfig;
    use crate::episode::EpisodeConfig;
    use assembly_scene::memory::MemoryScene;

    fn env(seed: u64) -> EnvironmentManager<MemoryScene> {
        EnvironmentManager::seeded(
            MemoryScene::training_default(20.0, 20.0),
            EnvConfig::default(),
            seed,
        )
        .unwrap()
    }

    #[test]
    fn empty_layout_snapshot() {
        let snapshot = env(0).capture_snapshot();
        assert!(snapshot.obstacles.is_empty());
        assert!(snapshot.target.is_none());
        assert_eq!(snapshot.episode, 0);
        snapshot.verify().unwrap();
    }

    #[test]
    fn tampering_is_detected() {
        let mut env = env(1);
        env.start_episode(&EpisodeConfig::default()).unwrap();
        let mut snapshot = env.capture_snapshot();
        snapshot.obstacles[0].transform.scale = 9.0;
        assert!(snapshot.verify().is_err());
    }

    #[test]
    fn json_round_trip_verifies() {
        let mut env = env(2);
        env.start_episode(&EpisodeConfig::default()).unwrap();
        let snapshot = env.capture_snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored = LayoutSnapshot::from_json(&json).unwrap();
        assert_eq!(restored.hash, snapshot.hash);
    }

    #[test]
    fn hash_changes_with_layout() {
        let mut env = env(3);
        env.start_episode(&EpisodeConfig::default()).unwrap();
        let before = env.layout_hash();
        env.generate_assembly_pair().unwrap();
        assert_ne!(before, env.layout_hash());
    }
}
