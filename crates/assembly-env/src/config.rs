//! Environment configuration.
//!
//! [`EnvConfig`] carries every name and constant the placement routines use.
//! All fields have defaults, so a JSON document only needs the keys it wants
//! to override:
//!
//! ```
//! use assembly_env::config::EnvConfig;
//!
//! let config = EnvConfig::from_json(r#"{ "min_separation": 6.0 }"#).unwrap();
//! assert_eq!(config.min_separation, 6.0);
//! assert_eq!(config.spawn_clearance, 2.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::EnvError;

/// Tunable names and constants for an [`EnvironmentManager`](crate::manager::EnvironmentManager).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Asset name of the obstacle prototype.
    pub obstacle_asset: String,
    /// Asset name of the target-pose prototype.
    pub target_asset: String,
    /// Asset name of the component prototype.
    pub component_asset: String,
    /// Name of the scene node whose box volume bounds all placement.
    pub boundary_node: String,

    /// Smallest uniform obstacle scale (inclusive).
    pub obstacle_scale_min: f64,
    /// Largest uniform obstacle scale (inclusive).
    pub obstacle_scale_max: f64,

    /// Inset from the boundary edge for target and component positions.
    pub assembly_margin: f64,
    /// Minimum horizontal distance between target and component.
    pub min_separation: f64,
    /// Height at which the component rests.
    pub component_height: f64,

    /// Inset from the boundary edge for agent spawn points.
    pub spawn_margin: f64,
    /// Height of every agent spawn point.
    pub spawn_height: f64,
    /// Minimum distance between a spawn point and every target/component.
    pub spawn_clearance: f64,

    /// Rejection-sampling budget per placement before it is declared infeasible.
    pub max_attempts: u32,
    /// Whether `reset_environment` also destroys the obstacle layout.
    pub reset_clears_obstacles: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            obstacle_asset: "Prefabs/rock".to_owned(),
            target_asset: "Prefabs/Target".to_owned(),
            component_asset: "Prefabs/Component".to_owned(),
            boundary_node: "Platform".to_owned(),
            obstacle_scale_min: 1.0,
            obstacle_scale_max: 2.0,
            assembly_margin: 1.0,
            min_separation: 10.0,
            component_height: 0.125,
            spawn_margin: 1.0,
            spawn_height: 0.5,
            spawn_clearance: 2.0,
            max_attempts: 10_000,
            reset_clears_obstacles: false,
        }
    }
}

impl EnvConfig {
    /// Parse a (possibly partial) JSON configuration and validate it.
    pub fn from_json(text: &str) -> Result<Self, EnvError> {
        let config: EnvConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every constant is usable.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::Configuration`] naming the first offending field.
    pub fn validate(&self) -> Result<(), EnvError> {
        for (field, name) in [
            ("obstacle_asset", &self.obstacle_asset),
            ("target_asset", &self.target_asset),
            ("component_asset", &self.component_asset),
            ("boundary_node", &self.boundary_node),
        ] {
            if name.is_empty() {
                return Err(EnvError::configuration(format!("{field} must not be empty")));
            }
        }

        for (field, value) in [
            ("obstacle_scale_min", self.obstacle_scale_min),
            ("obstacle_scale_max", self.obstacle_scale_max),
            ("assembly_margin", self.assembly_margin),
            ("min_separation", self.min_separation),
            ("component_height", self.component_height),
            ("spawn_margin", self.spawn_margin),
            ("spawn_height", self.spawn_height),
            ("spawn_clearance", self.spawn_clearance),
        ] {
            if !value.is_finite() {
                return Err(EnvError::configuration(format!(
                    "{field} must be finite, got {value}"
                )));
            }
        }

        if self.obstacle_scale_min <= 0.0 {
            return Err(EnvError::configuration(format!(
                "obstacle_scale_min must be positive, got {}",
                self.obstacle_scale_min
            )));
        }
        if self.obstacle_scale_min > self.obstacle_scale_max {
            return Err(EnvError::configuration(format!(
                "obstacle scale range is inverted: [{}, {}]",
                self.obstacle_scale_min, self.obstacle_scale_max
            )));
        }
        if self.assembly_margin < 0.0 || self.spawn_margin < 0.0 {
            return Err(EnvError::configuration("margins must not be negative"));
        }
        if self.min_separation < 0.0 || self.spawn_clearance < 0.0 {
            return Err(EnvError::configuration(
                "min_separation and spawn_clearance must not be negative",
            ));
        }
        if self.max_attempts == 0 {
            return Err(EnvError::configuration("max_attempts must be at least 1"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
