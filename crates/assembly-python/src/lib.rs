//! PyO3 Python bindings for the assembly training environment.
//!
//! Exposes the environment manager over the in-memory scene so Python
//! training loops can lay out episodes and sample agent spawn points.
//! Structured results cross the FFI boundary as Python dicts (JSON
//! round-trip).

#![deny(unsafe_code)]

use pyo3::prelude::*;

mod engine;

/// The `assembly_env._env` native module.
#[pymodule]
fn _env(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<engine::PyAssemblyEnv>()?;
    Ok(())
}
