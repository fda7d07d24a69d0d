//! Python-facing environment wrapper.
//!
//! [`PyAssemblyEnv`] is a `#[pyclass]` around an [`EnvironmentManager`]
//! driving a [`MemoryScene`]. Placed objects, episode reports, and layout
//! snapshots are returned as Python dicts: Rust value -> `serde_json` ->
//! Python `json.loads` -> `dict`.

use assembly_env::prelude::*;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use rand_pcg::Pcg64;
use serde::Serialize;

/// Converts any serializable value to a Python object via JSON round-trip.
fn to_pyobject<T: Serialize>(py: Python<'_>, value: &T, what: &str) -> PyResult<PyObject> {
    let json_str = serde_json::to_string(value).map_err(|e| {
        PyRuntimeError::new_err(format!("failed to serialize {what} to JSON: {e}"))
    })?;
    let json_mod = py.import("json")?;
    let dict = json_mod.call_method1("loads", (json_str,))?;
    Ok(dict.unbind())
}

/// Maps environment errors onto Python exception types.
///
/// Bad configuration is the caller's fault (`ValueError`); everything else
/// is a runtime condition of the current layout (`RuntimeError`).
fn to_py_err(err: EnvError) -> PyErr {
    match err {
        EnvError::Configuration { .. } | EnvError::Config(_) => {
            PyValueError::new_err(err.to_string())
        }
        EnvError::PlacementInfeasible { .. } | EnvError::Scene(_) => {
            PyRuntimeError::new_err(err.to_string())
        }
    }
}

fn xyz(v: Vec3) -> (f64, f64, f64) {
    (v.x, v.y, v.z)
}

/// The assembly training environment exposed to Python.
///
/// Usage from Python:
/// ```python
/// from assembly_env._env import AssemblyEnv
/// env = AssemblyEnv(20.0, 20.0, seed=7)
/// report = env.start_episode(5)
/// x, y, z = env.find_valid_position()
/// obs = env.normalized_position(x, y, z)
/// ```
#[pyclass(name = "AssemblyEnv", unsendable)]
pub struct PyAssemblyEnv {
    env: EnvironmentManager<MemoryScene, Pcg64>,
}

#[pymethods]
impl PyAssemblyEnv {
    /// Create an environment over a `width` x `depth` platform.
    ///
    /// Args:
    ///     width: Platform extent along x.
    ///     depth: Platform extent along z.
    ///     seed: Seed for the layout RNG (default 0).
    ///     config_json: Optional JSON object overriding `EnvConfig` fields.
    #[new]
    #[pyo3(signature = (width, depth, seed=0, config_json=None))]
    fn new(width: f64, depth: f64, seed: u64, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(text) => EnvConfig::from_json(text).map_err(to_py_err)?,
            None => EnvConfig::default(),
        };
        let scene = MemoryScene::training_default(width, depth);
        let env = EnvironmentManager::seeded(scene, config, seed).map_err(to_py_err)?;
        tracing::info!(width, depth, seed, "python environment created");
        Ok(Self { env })
    }

    /// Scatter `count` obstacles, replacing the previous layout.
    ///
    /// Negative counts are treated as zero. Returns the raw object handles.
    fn generate_obstacles(&mut self, count: i64) -> PyResult<Vec<u64>> {
        let count = usize::try_from(count.max(0))
            .map_err(|_| PyValueError::new_err("obstacle count does not fit in usize"))?;
        let ids = self.env.generate_obstacles(count).map_err(to_py_err)?;
        Ok(ids.iter().map(|id| id.to_raw()).collect())
    }

    /// Destroy the assembly pair and stack objects. Returns how many were
    /// destroyed.
    fn reset_environment(&mut self) -> usize {
        self.env.reset_environment()
    }

    /// Destroy all obstacles. Returns how many were destroyed.
    fn clear_obstacles(&mut self) -> usize {
        self.env.clear_obstacles()
    }

    /// Place a new target/component pair and return it as a dict.
    fn generate_assembly_pair(&mut self, py: Python<'_>) -> PyResult<PyObject> {
        let pair = self.env.generate_assembly_pair().map_err(to_py_err)?;
        to_pyobject(py, &pair, "assembly pair")
    }

    /// Sample an agent spawn point clear of the assembly and stack objects.
    fn find_valid_position(&mut self) -> PyResult<(f64, f64, f64)> {
        self.env.find_valid_position().map(xyz).map_err(to_py_err)
    }

    /// Map a world position into the unit square of the platform.
    fn normalized_position(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        xyz(self.env.normalized_position(Vec3::new(x, y, z)))
    }

    /// Reset, scatter `obstacle_count` obstacles, and place a fresh pair.
    ///
    /// Returns the episode report as a dict.
    #[pyo3(signature = (obstacle_count=5))]
    fn start_episode(&mut self, py: Python<'_>, obstacle_count: i64) -> PyResult<PyObject> {
        let obstacle_count = usize::try_from(obstacle_count.max(0))
            .map_err(|_| PyValueError::new_err("obstacle count does not fit in usize"))?;
        let report = self
            .env
            .start_episode(&EpisodeConfig { obstacle_count })
            .map_err(to_py_err)?;
        to_pyobject(py, &report, "episode report")
    }

    /// Full platform size as `(x, y, z)`.
    fn boundary_size(&self) -> (f64, f64, f64) {
        xyz(self.env.boundary_size())
    }

    /// The current target as a dict, or None before the first pair.
    fn current_target(&self, py: Python<'_>) -> PyResult<Option<PyObject>> {
        match self.env.current_target().and_then(|id| self.env.placed(id)) {
            Some(placed) => Ok(Some(to_pyobject(py, &placed, "target")?)),
            None => Ok(None),
        }
    }

    /// The current component as a dict, or None before the first pair.
    fn current_component(&self, py: Python<'_>) -> PyResult<Option<PyObject>> {
        match self.env.current_component().and_then(|id| self.env.placed(id)) {
            Some(placed) => Ok(Some(to_pyobject(py, &placed, "component")?)),
            None => Ok(None),
        }
    }

    /// Number of completed episodes.
    fn episode(&self) -> u64 {
        self.env.episode()
    }

    /// Capture the current layout as a dict (including its BLAKE3 hash).
    fn snapshot(&self, py: Python<'_>) -> PyResult<PyObject> {
        to_pyobject(py, &self.env.capture_snapshot(), "layout snapshot")
    }

    /// BLAKE3 hash of the current layout as a hex string.
    fn layout_hash(&self) -> String {
        self.env.layout_hash()
    }
}
