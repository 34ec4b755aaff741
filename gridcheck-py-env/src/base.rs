//! Wrapper of Griddly environments implemented in Python.
use crate::{
    util::{pyobj_to_arrayd, pyobj_to_json, pyobj_to_reward, reset_obs, split_step},
    GriddlyAct, GriddlyEnvConfig, GriddlyObs,
};
use anyhow::{anyhow, Result};
use gridcheck_core::{
    ActionIds, ActionSpace, AvailableActions, CloneEnv, Env, EnvState, Info, Location, StateHash,
    Step,
};
use log::{info, trace};
use pyo3::{
    types::{IntoPyDict, PyDict},
    PyAny, PyObject, Python,
};
use std::collections::BTreeSet;

/// Information given at every step of the interaction with the environment.
///
/// It is the info dictionary returned by `env.step()`, converted to JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct GriddlyInfo(pub serde_json::Value);

impl Info for GriddlyInfo {}

/// An environment of [Griddly](https://griddly.readthedocs.io).
#[derive(Debug)]
pub struct GriddlyEnv {
    env: PyObject,

    name: String,

    count_steps: usize,

    max_steps: Option<usize>,
}

impl GriddlyEnv {
    /// Name of the environment.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn game<'py>(&'py self, py: Python<'py>) -> Result<&'py PyAny> {
        Ok(self.env.as_ref(py).getattr("game")?)
    }
}

impl Env for GriddlyEnv {
    type Obs = GriddlyObs;
    type Act = GriddlyAct;
    type Info = GriddlyInfo;
    type Config = GriddlyEnvConfig;

    /// Constructs [`GriddlyEnv`] with `gym.make()`.
    ///
    /// * `seed` - Seed of the action space, used by [`ActionSpace::sample_action`].
    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Python::with_gil(|py| {
            // sys.argv can be empty depending on the python interpreter.
            // See https://github.com/PyO3/pyo3/issues/1241#issuecomment-715952517
            let locals = [("sys", py.import("sys")?)].into_py_dict(py);
            let _ = py.eval("sys.argv.insert(0, 'GriddlyEnv')", None, Some(locals))?;
            let ver = py.eval("sys.version", None, Some(locals))?;
            info!("Initialize GriddlyEnv");
            info!("Python version = {}", ver);

            // Registers GDY-* environments to gym.
            py.import("griddly")?;
            let gym = py.import("gym")?;

            let name = config.name.as_str();
            let kwargs = config.level.map(|level| vec![("level", level)].into_py_dict(py));
            let env = gym.getattr("make")?.call((name,), kwargs)?;
            env.getattr("action_space")?.call_method1("seed", (seed,))?;
            info!("Created {}", name);

            Ok(GriddlyEnv {
                env: env.into(),
                name: config.name.clone(),
                count_steps: 0,
                max_steps: config.max_steps,
            })
        })
    }

    fn reset(&mut self) -> Result<GriddlyObs> {
        trace!("GriddlyEnv::reset()");
        self.count_steps = 0;

        Python::with_gil(|py| {
            let ret = self.env.call_method0(py, "reset")?;
            let obs = pyobj_to_arrayd(reset_obs(ret.as_ref(py)))?;
            Ok(obs.into())
        })
    }

    /// Runs a step of the environment's dynamics.
    ///
    /// If `max_steps` is set in the configuration, the episode is truncated
    /// when the number of steps reaches it.
    fn step(&mut self, a: &GriddlyAct) -> Result<Step<Self>> {
        trace!("GriddlyEnv::step()");

        Python::with_gil(|py| {
            let ret = self.env.call_method1(py, "step", (a.to_py(py),))?;
            let items = split_step(ret.as_ref(py))?;
            let obs = pyobj_to_arrayd(items.obs)?.into();
            let reward = pyobj_to_reward(items.reward)?;
            let info = GriddlyInfo(pyobj_to_json(py, items.info)?);

            self.count_steps += 1;
            let mut is_truncated = items.is_truncated;
            if let Some(max_steps) = self.max_steps {
                if self.count_steps >= max_steps {
                    is_truncated = true;
                    self.count_steps = 0;
                }
            }

            Ok(Step::new(
                obs,
                a.clone(),
                reward,
                items.is_terminated,
                is_truncated,
                info,
            ))
        })
    }
}

impl CloneEnv for GriddlyEnv {
    /// Calls `env.clone()`.
    fn clone_env(&self) -> Result<Self> {
        Python::with_gil(|py| {
            let env = self.env.call_method0(py, "clone")?;
            Ok(GriddlyEnv {
                env,
                name: self.name.clone(),
                count_steps: self.count_steps,
                max_steps: self.max_steps,
            })
        })
    }

    /// Reads `GameTicks` and `Hash` of `env.get_state()`.
    fn state(&self) -> Result<EnvState> {
        Python::with_gil(|py| {
            let state = self.env.call_method0(py, "get_state")?;
            let state: &PyDict = state.extract(py)?;
            let item = |key: &str| {
                state
                    .get_item(key)
                    .ok_or_else(|| anyhow!("get_state() has no key {:?}", key))
            };

            Ok(EnvState {
                game_ticks: item("GameTicks")?.extract()?,
                hash: StateHash(item("Hash")?.extract()?),
            })
        })
    }
}

impl ActionSpace for GriddlyEnv {
    /// Calls `env.game.get_available_actions(player_id)`.
    fn available_actions(&self, player_id: u32) -> Result<AvailableActions> {
        Python::with_gil(|py| {
            let ret = self
                .game(py)?
                .call_method1("get_available_actions", (player_id,))?;
            let ret: &PyDict = ret.extract()?;

            let mut actions = AvailableActions::new();
            for (loc, names) in ret.iter() {
                let loc: (i32, i32) = loc.extract()?;
                let names = names
                    .iter()?
                    .map(|name| Ok(name?.extract::<String>()?))
                    .collect::<Result<BTreeSet<_>>>()?;
                actions.insert(loc.into(), names);
            }
            Ok(actions)
        })
    }

    /// Calls `env.game.get_available_action_ids(location, action_names)`.
    fn available_action_ids(
        &self,
        location: &Location,
        action_names: &[String],
    ) -> Result<ActionIds> {
        Python::with_gil(|py| {
            let ret = self.game(py)?.call_method1(
                "get_available_action_ids",
                ((location.x, location.y), action_names.to_vec()),
            )?;
            Ok(ret.extract::<ActionIds>()?)
        })
    }

    /// Calls `env.action_space.sample()`.
    fn sample_action(&mut self) -> Result<GriddlyAct> {
        Python::with_gil(|py| {
            let act = self
                .env
                .as_ref(py)
                .getattr("action_space")?
                .call_method0("sample")?;
            match act.extract::<i64>() {
                Ok(a) => Ok(GriddlyAct::Discrete(a)),
                Err(_) => Ok(GriddlyAct::MultiDiscrete(act.extract::<Vec<i64>>()?)),
            }
        })
    }
}
