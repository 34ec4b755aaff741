//! Action for [`GriddlyEnv`](crate::GriddlyEnv).
use gridcheck_core::Act;
use pyo3::{IntoPy, PyObject, Python};

/// Represents an action sampled from the action space of a Griddly game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GriddlyAct {
    /// An action of a `Discrete` space.
    Discrete(i64),

    /// An action of a `MultiDiscrete` space, e.g. `[x, y, action_type, action_id]`.
    MultiDiscrete(Vec<i64>),
}

impl Act for GriddlyAct {}

impl GriddlyAct {
    /// Converts the action into a Python object given to `env.step()`.
    pub fn to_py(&self, py: Python) -> PyObject {
        match self {
            Self::Discrete(a) => (*a).into_py(py),
            Self::MultiDiscrete(a) => a.clone().into_py(py),
        }
    }
}

impl From<i64> for GriddlyAct {
    fn from(a: i64) -> Self {
        Self::Discrete(a)
    }
}

impl From<Vec<i64>> for GriddlyAct {
    fn from(a: Vec<i64>) -> Self {
        Self::MultiDiscrete(a)
    }
}
