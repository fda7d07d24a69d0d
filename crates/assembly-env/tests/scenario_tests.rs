//! Scenario tests for the environment manager.
//!
//! These drive full episodes through the public API: fixed boundary scenarios,
//! reset/regenerate handle turnover, seeded determinism, and a host scene that
//! records every call the manager makes.

use assembly_env::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn env(width: f64, depth: f64, seed: u64) -> EnvironmentManager<MemoryScene> {
    EnvironmentManager::seeded(
        MemoryScene::training_default(width, depth),
        EnvConfig::default(),
        seed,
    )
    .unwrap()
}

/// Host scene that forwards to a [`MemoryScene`] and counts lifecycle calls.
#[derive(Default)]
struct RecordingScene {
    inner: MemoryScene,
    instantiated: usize,
    destroy_calls: usize,
    destroyed: usize,
}

impl Scene for RecordingScene {
    fn resolve_prototype(&self, name: &str) -> Result<PrototypeId, SceneError> {
        self.inner.resolve_prototype(name)
    }

    fn boundary_volume(&self, node: &str) -> Result<BoxVolume, SceneError> {
        self.inner.boundary_volume(node)
    }

    fn instantiate(
        &mut self,
        prototype: PrototypeId,
        transform: Transform,
    ) -> Result<ObjectId, SceneError> {
        self.instantiated += 1;
        self.inner.instantiate(prototype, transform)
    }

    fn destroy(&mut self, id: ObjectId) -> bool {
        self.destroy_calls += 1;
        let destroyed = self.inner.destroy(id);
        if destroyed {
            self.destroyed += 1;
        }
        destroyed
    }

    fn is_alive(&self, id: ObjectId) -> bool {
        self.inner.is_alive(id)
    }

    fn transform(&self, id: ObjectId) -> Option<Transform> {
        self.inner.transform(id)
    }

    fn set_transform(&mut self, id: ObjectId, transform: Transform) -> Result<(), SceneError> {
        self.inner.set_transform(id, transform)
    }

    fn vertical_min_extent(&self, id: ObjectId) -> Result<f64, SceneError> {
        self.inner.vertical_min_extent(id)
    }
}

// ---------------------------------------------------------------------------
// Boundary scenarios
// ---------------------------------------------------------------------------

#[test]
fn twenty_by_twenty_boundary_with_five_obstacles() {
    let mut env = env(20.0, 20.0, 2024);
    let ids = env.generate_obstacles(5).unwrap().to_vec();
    assert_eq!(ids.len(), 5);
    for id in ids {
        let p = env.placed(id).unwrap().position();
        assert!(p.x.abs() <= 9.0 && p.z.abs() <= 9.0, "{p:?}");
    }
}

#[test]
fn three_by_three_half_extents_report_infeasible_pair() {
    let mut env = env(6.0, 6.0, 1);
    match env.generate_assembly_pair() {
        Err(EnvError::PlacementInfeasible {
            placement: PlacementKind::AssemblyPair,
            attempts,
        }) => assert_eq!(attempts, 0, "rejected without sampling"),
        other => panic!("expected infeasible pair, got {other:?}"),
    }
}

#[test]
fn error_messages_name_the_placement() {
    let mut env = env(6.0, 6.0, 1);
    let message = env.generate_assembly_pair().unwrap_err().to_string();
    assert_eq!(message, "assembly pair placement infeasible after 0 attempts");
}

#[test]
fn non_box_boundary_fails_at_construction() {
    let scene = MemoryScene::training_default(20.0, 20.0).with_non_box_node("Platform");
    let err = EnvironmentManager::seeded(scene, EnvConfig::default(), 0)
        .err()
        .unwrap();
    assert!(matches!(err, EnvError::Configuration { .. }));
    assert!(err.to_string().contains("box-shaped"));
}

// ---------------------------------------------------------------------------
// Episode lifecycle
// ---------------------------------------------------------------------------

#[test]
fn reset_then_generate_creates_fresh_handles() {
    let mut env = env(20.0, 20.0, 77);
    let before = env.generate_assembly_pair().unwrap();

    env.reset_environment();
    let after = env.generate_assembly_pair().unwrap();

    assert_ne!(before.target.id, after.target.id);
    assert_ne!(before.component.id, after.component.id);
    assert_eq!(env.current_target(), Some(after.target.id));
    assert_eq!(env.current_component(), Some(after.component.id));
    assert_eq!(env.scene().count_of(TARGET_PROTOTYPE), 1);
    assert_eq!(env.scene().count_of(COMPONENT_PROTOTYPE), 1);
}

#[test]
fn long_training_run_does_not_leak_objects() {
    let scene = RecordingScene {
        inner: MemoryScene::training_default(24.0, 24.0),
        ..Default::default()
    };
    let mut env = EnvironmentManager::seeded(scene, EnvConfig::default(), 5).unwrap();
    let config = EpisodeConfig { obstacle_count: 6 };

    for _ in 0..100 {
        env.start_episode(&config).unwrap();
        for _ in 0..10 {
            env.find_valid_position().unwrap();
        }
    }

    let scene = env.scene();
    assert_eq!(scene.inner.object_count(), 6 + 2);
    assert_eq!(scene.instantiated - scene.destroyed, 8);
    assert_eq!(env.episode(), 100);
}

#[test]
fn stale_entries_are_skipped_on_reset() {
    let scene = RecordingScene {
        inner: MemoryScene::training_default(20.0, 20.0),
        ..Default::default()
    };
    let mut env = EnvironmentManager::seeded(scene, EnvConfig::default(), 6).unwrap();
    let pair = env.generate_assembly_pair().unwrap();
    env.scene_mut().inner.destroy(pair.target.id);

    assert_eq!(env.reset_environment(), 1);
    assert_eq!(env.scene().destroy_calls, 2);
    assert_eq!(env.scene().destroyed, 1);
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

fn run_episodes(seed: u64) -> Vec<String> {
    let mut env = env(20.0, 20.0, seed);
    let config = EpisodeConfig { obstacle_count: 5 };
    (0..10)
        .map(|_| {
            env.start_episode(&config).unwrap();
            env.find_valid_position().unwrap();
            env.layout_hash()
        })
        .collect()
}

#[test]
fn same_seed_same_layouts() {
    assert_eq!(run_episodes(99), run_episodes(99));
}

#[test]
fn different_seeds_different_layouts() {
    assert_ne!(run_episodes(1), run_episodes(2));
}

#[test]
fn any_rng_can_be_injected() {
    let mut a = EnvironmentManager::new(
        MemoryScene::training_default(20.0, 20.0),
        EnvConfig::default(),
        Pcg32::seed_from_u64(8),
    )
    .unwrap();
    let mut b = EnvironmentManager::new(
        MemoryScene::training_default(20.0, 20.0),
        EnvConfig::default(),
        Pcg32::seed_from_u64(8),
    )
    .unwrap();

    let pa = a.generate_assembly_pair().unwrap();
    let pb = b.generate_assembly_pair().unwrap();
    assert_eq!(pa, pb);
    assert_eq!(a.find_valid_position().unwrap(), b.find_valid_position().unwrap());
}
