#![allow(clippy::float_cmp)]
//! Checks that an environment and its clone stay in lockstep.
mod config;
use crate::{
    error::CloneCheckError,
    record::{Record, RecordValue, Recorder},
    ActionIds, ActionSpace, AvailableActions, CloneEnv, Env, Location, StateHash,
};
pub use config::CloneCheckConfig;
use log::{debug, info, trace};
use std::fmt::{self, Debug};

/// The output of the environments that differed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DivergedField {
    /// Available actions reported right after cloning.
    AvailableActions,

    /// Observation after a step or a reset.
    Observation,

    /// Reward of a step.
    Reward,

    /// Terminated and truncated flags of a step.
    Done,

    /// Info payload of a step.
    Info,

    /// Hash of the internal state.
    StateHash,
}

impl fmt::Display for DivergedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AvailableActions => "available actions",
            Self::Observation => "observation",
            Self::Reward => "reward",
            Self::Done => "done",
            Self::Info => "info",
            Self::StateHash => "state hash",
        };
        f.write_str(name)
    }
}

/// Actions available to a player, as printed before and after cloning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInspection {
    /// Action names per location.
    pub available_actions: AvailableActions,

    /// The first location in [`ActionInspection::available_actions`], if any.
    pub location: Option<Location>,

    /// Action ids at [`ActionInspection::location`].
    pub action_ids: ActionIds,
}

/// Summary of a successful check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneCheckReport {
    /// The number of actions applied to each environment.
    pub steps: usize,

    /// The number of episodes started, including the first one.
    pub episodes: usize,

    /// State hash of both environments after the last step.
    pub final_hash: StateHash,

    /// Available actions of the original right after the reset.
    pub original_actions: ActionInspection,

    /// Available actions of the clone right after cloning.
    pub clone_actions: ActionInspection,
}

fn ensure_same<T: PartialEq + Debug>(
    step: usize,
    field: DivergedField,
    original: &T,
    clone: &T,
) -> Result<(), CloneCheckError> {
    if original == clone {
        Ok(())
    } else {
        Err(CloneCheckError::Divergence {
            step,
            field,
            original: format!("{:?}", original),
            clone: format!("{:?}", clone),
        })
    }
}

/// Queries the actions available to `player_id` and the action ids at the
/// first reported location.
pub fn inspect_actions<E: ActionSpace>(
    env: &E,
    player_id: u32,
) -> anyhow::Result<ActionInspection> {
    let available_actions = env.available_actions(player_id)?;
    let location = available_actions.keys().next().copied();
    let action_ids = match location {
        Some(loc) => {
            let names = available_actions[&loc].iter().cloned().collect::<Vec<_>>();
            env.available_action_ids(&loc, &names)?
        }
        None => ActionIds::new(),
    };

    Ok(ActionInspection {
        available_actions,
        location,
        action_ids,
    })
}

/// Applies `actions` to `env` and `clone` and compares their outputs.
///
/// After every action, the observation, reward, terminated/truncated flags,
/// info (unless disabled in `config`) and state hash of both environments must
/// be equal. When both environments finish an episode they are reset and the
/// reset observations are compared too. The first mismatch stops the check with
/// [`CloneCheckError::Divergence`].
///
/// The state hashes are also compared before the first action.
pub fn check_clone<E, R>(
    env: &mut E,
    clone: &mut E,
    actions: &[E::Act],
    config: &CloneCheckConfig,
    recorder: &mut R,
) -> Result<CloneCheckReport, CloneCheckError>
where
    E: CloneEnv + ActionSpace,
    R: Recorder,
{
    let mut hash = env.state_hash()?;
    ensure_same(0, DivergedField::StateHash, &hash, &clone.state_hash()?)?;

    let original_actions = inspect_actions(env, config.player_id)?;
    let clone_actions = inspect_actions(clone, config.player_id)?;
    info!("Original: {:?}", original_actions);
    info!("Clone: {:?}", clone_actions);
    ensure_same(
        0,
        DivergedField::AvailableActions,
        &original_actions,
        &clone_actions,
    )?;

    let mut episode = 0;

    for (i, act) in actions.iter().enumerate() {
        let n = i + 1;
        let step = env.step(act)?;
        let c_step = clone.step(act)?;

        ensure_same(n, DivergedField::Observation, &step.obs, &c_step.obs)?;
        ensure_same(n, DivergedField::Reward, &step.reward, &c_step.reward)?;
        ensure_same(
            n,
            DivergedField::Done,
            &(step.is_terminated, step.is_truncated),
            &(c_step.is_terminated, c_step.is_truncated),
        )?;
        if config.compare_info {
            ensure_same(n, DivergedField::Info, &step.info, &c_step.info)?;
        }

        hash = env.state_hash()?;
        ensure_same(n, DivergedField::StateHash, &hash, &clone.state_hash()?)?;
        trace!("step {}: act = {:?}, hash = {}", n, act, hash);

        let mut record = Record::from_slice(&[
            ("step", RecordValue::Integer(n as u64)),
            ("episode", RecordValue::Integer(episode as u64)),
        ]);
        record.insert("reward", RecordValue::Array1(step.reward.clone()));
        record.insert("done", RecordValue::Scalar(step.is_done() as i32 as f32));
        record.insert("hash", RecordValue::String(hash.to_string()));
        recorder.write(record);

        if step.is_done() && c_step.is_done() {
            debug!("Episode {} ended at step {}, resetting both", episode, n);
            let obs = env.reset()?;
            let c_obs = clone.reset()?;
            ensure_same(n, DivergedField::Observation, &obs, &c_obs)?;
            episode += 1;
        }
    }

    Ok(CloneCheckReport {
        steps: actions.len(),
        episodes: episode + 1,
        final_hash: hash,
        original_actions,
        clone_actions,
    })
}

/// An environment, its clone and the actions to apply to both.
pub struct ClonePair<E: Env> {
    /// The environment built from the configuration.
    pub env: E,

    /// The clone taken right after the reset of [`ClonePair::env`].
    pub clone: E,

    /// Actions sampled from the action space of [`ClonePair::env`].
    pub actions: Vec<E::Act>,
}

impl<E: CloneEnv + ActionSpace> ClonePair<E> {
    /// Builds an environment with `config.seed` and resets it. Then it is
    /// cloned and `config.n_steps` actions are sampled from the original's
    /// action space before any of them is applied.
    pub fn build(env_config: &E::Config, config: &CloneCheckConfig) -> anyhow::Result<Self> {
        let mut env = E::build(env_config, config.seed)?;
        env.reset()?;
        let clone = env.clone_env()?;
        info!("Cloned environment, sampling {} actions", config.n_steps);

        let actions = (0..config.n_steps)
            .map(|_| env.sample_action())
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self {
            env,
            clone,
            actions,
        })
    }
}

/// Builds an environment, clones it and checks that both stay in lockstep.
///
/// See [`ClonePair::build`] for the setup and [`check_clone`] for the comparison.
pub fn run_clone_check<E, R>(
    env_config: &E::Config,
    config: &CloneCheckConfig,
    recorder: &mut R,
) -> Result<CloneCheckReport, CloneCheckError>
where
    E: CloneEnv + ActionSpace,
    R: Recorder,
{
    let ClonePair {
        mut env,
        mut clone,
        actions,
    } = ClonePair::<E>::build(env_config, config)?;

    let report = check_clone(&mut env, &mut clone, &actions, config, recorder)?;
    info!(
        "{} steps over {} episodes matched, final hash = {}",
        report.steps, report.episodes, report.final_hash
    );
    Ok(report)
}
