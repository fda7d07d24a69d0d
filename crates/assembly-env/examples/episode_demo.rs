//! Headless episode demo.
//!
//! Runs a handful of training episodes against the in-memory scene and logs
//! each layout: the obstacles, the target/component pair, a few agent spawn
//! points with their normalized observations, and the layout hash.
//!
//! Run with: `RUST_LOG=info cargo run --example episode_demo -- [seed] [config.json]`

use assembly_env::prelude::*;

const EPISODES: usize = 5;
const SPAWNS_PER_EPISODE: usize = 3;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = match args.next() {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid seed '{raw}': {e}"))?,
        None => 42,
    };
    let config = match args.next() {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| anyhow::anyhow!("failed to read config '{path}': {e}"))?;
            EnvConfig::from_json(&text)?
        }
        None => EnvConfig::default(),
    };

    let scene = MemoryScene::training_default(24.0, 24.0);
    let mut env = EnvironmentManager::seeded(scene, config, seed)?;
    let episode_config = EpisodeConfig { obstacle_count: 6 };

    for _ in 0..EPISODES {
        let report = env.start_episode(&episode_config)?;
        let target = report.pair.target.position();
        let component = report.pair.component.position();
        println!(
            "episode {}: {} obstacles, target ({:.2}, {:.2}, {:.2}) rot {:?}, component ({:.2}, {:.2}), separation {:.2}",
            report.episode,
            report.obstacles.len(),
            target.x,
            target.y,
            target.z,
            report.pair.target.transform.rotation,
            component.x,
            component.z,
            report.pair.separation(),
        );

        for _ in 0..SPAWNS_PER_EPISODE {
            let spawn = env.find_valid_position()?;
            let observed = env.normalized_position(spawn);
            println!(
                "  spawn ({:.2}, {:.2}) -> observation ({:.3}, {:.3})",
                spawn.x, spawn.z, observed.x, observed.z
            );
        }

        println!("  layout hash {}", env.layout_hash());
    }

    Ok(())
}
