//! Episode driver.
//!
//! [`EnvironmentManager::start_episode`] runs the per-episode sequence a
//! training loop would otherwise issue by hand: reset, regenerate the
//! obstacle layout, then generate a fresh target/component pair.

use std::time::{Duration, Instant};

use assembly_scene::object::ObjectId;
use assembly_scene::scene::Scene;
use rand::Rng;

use crate::manager::{AssemblyPair, EnvironmentManager};
use crate::EnvError;

/// Per-episode layout parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EpisodeConfig {
    /// Number of obstacles to scatter.
    pub obstacle_count: usize,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self { obstacle_count: 5 }
    }
}

/// What [`start_episode`](EnvironmentManager::start_episode) produced.
#[derive(Debug, Clone, serde::Serialize)]
pub struct EpisodeReport {
    /// 1-based episode number.
    pub episode: u64,
    /// Objects destroyed by the reset at the start of the episode.
    pub destroyed: usize,
    pub obstacles: Vec<ObjectId>,
    pub pair: AssemblyPair,
    /// Wall-clock time spent generating the layout.
    pub elapsed: Duration,
}

impl<S: Scene, R: Rng> EnvironmentManager<S, R> {
    /// Reset the environment and generate a complete layout for a new
    /// episode.
    ///
    /// The episode counter only advances when the whole layout succeeds.
    ///
    /// # Errors
    ///
    /// Propagates any error from obstacle or pair generation.
    pub fn start_episode(&mut self, config: &EpisodeConfig) -> Result<EpisodeReport, EnvError> {
        let start = Instant::now();

        let destroyed = self.reset_environment();
        let obstacles = self.generate_obstacles(config.obstacle_count)?.to_vec();
        let pair = self.generate_assembly_pair()?;
        let episode = self.advance_episode();

        let elapsed = start.elapsed();
        tracing::info!(
            episode,
            obstacles = obstacles.len(),
            elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX),
            "episode started"
        );

        Ok(EpisodeReport {
            episode,
            destroyed,
            obstacles,
            pair,
            elapsed,
        })
    }
}
