//! Conversion of Python objects returned by Griddly.
use anyhow::{anyhow, Result};
use ndarray::ArrayD;
use numpy::PyArrayDyn;
use pyo3::{
    types::{PyDict, PyTuple},
    PyAny, Python,
};

/// Convert a numpy array of `uint8` to [`ArrayD<u8>`].
pub fn pyobj_to_arrayd(obs: &PyAny) -> Result<ArrayD<u8>> {
    let obs: &PyArrayDyn<u8> = obs.extract()?;
    Ok(obs.readonly().as_array().to_owned())
}

/// Convert a reward, a number or a list of numbers with one per player, to [`Vec<f32>`].
pub fn pyobj_to_reward(reward: &PyAny) -> Result<Vec<f32>> {
    match reward.extract::<f32>() {
        Ok(r) => Ok(vec![r]),
        Err(_) => Ok(reward.extract::<Vec<f32>>()?),
    }
}

/// Serialize a Python object with `json.dumps(obj, sort_keys=True, default=str)`
/// and parse the result.
pub fn pyobj_to_json(py: Python, obj: &PyAny) -> Result<serde_json::Value> {
    let json = py.import("json")?;
    let kwargs = PyDict::new(py);
    kwargs.set_item("sort_keys", true)?;
    kwargs.set_item("default", py.import("builtins")?.getattr("str")?)?;
    let s: String = json.getattr("dumps")?.call((obj,), Some(kwargs))?.extract()?;
    Ok(serde_json::from_str(&s)?)
}

/// Returns the observation of the value returned by `env.reset()`, which is
/// either the observation itself or a tuple `(obs, info)`.
pub fn reset_obs(ret: &PyAny) -> &PyAny {
    match ret.extract::<&PyTuple>() {
        Ok(t) => t.get_item(0),
        Err(_) => ret,
    }
}

/// Items of the value returned by `env.step()`.
pub struct StepItems<'py> {
    /// Observation.
    pub obs: &'py PyAny,

    /// Reward, a number or a list of numbers.
    pub reward: &'py PyAny,

    /// `done` of the 4-tuple or `terminated` of the 5-tuple.
    pub is_terminated: bool,

    /// Always `false` for the 4-tuple.
    pub is_truncated: bool,

    /// Info dictionary.
    pub info: &'py PyAny,
}

/// Split the value returned by `env.step()`.
///
/// Both `(obs, reward, done, info)` and `(obs, reward, terminated, truncated, info)`
/// are accepted.
pub fn split_step(ret: &PyAny) -> Result<StepItems> {
    let t: &PyTuple = ret.extract()?;
    match t.len() {
        4 => Ok(StepItems {
            obs: t.get_item(0),
            reward: t.get_item(1),
            is_terminated: t.get_item(2).is_true()?,
            is_truncated: false,
            info: t.get_item(3),
        }),
        5 => Ok(StepItems {
            obs: t.get_item(0),
            reward: t.get_item(1),
            is_terminated: t.get_item(2).is_true()?,
            is_truncated: t.get_item(3).is_true()?,
            info: t.get_item(4),
        }),
        n => Err(anyhow!("env.step() returned a tuple of length {}", n)),
    }
}
