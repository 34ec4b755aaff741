//! This module is used for tests.
use crate::{
    ActionIds, ActionSpace, Act, AvailableActions, CloneEnv, Env, EnvState, Info, Location, Obs,
    StateHash, Step,
};
use anyhow::Result;
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Dummy observation, the position of a counter.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyObs(pub u64);

impl Obs for DummyObs {}

/// Dummy action, added to the counter.
#[derive(Clone, Debug)]
pub struct DummyAct(pub u64);

impl Act for DummyAct {}

/// Dummy info.
#[derive(Clone, Debug, PartialEq)]
pub struct DummyInfo {
    pub tag: u32,
}

impl Info for DummyInfo {}

#[derive(Clone, Debug)]
pub struct DummyEnvConfig {
    pub episode_len: u64,
}

impl Default for DummyEnvConfig {
    fn default() -> Self {
        Self { episode_len: 1000 }
    }
}

/// Dummy env, a counter moved by actions.
#[derive(Clone)]
pub struct DummyEnv {
    position: u64,
    steps: u64,
    episode_len: u64,
    reward_offset_after: Option<u64>,
    info_tag: u32,
    hidden: u64,
    hidden_after: Option<u64>,
    reset_position: u64,
    extra_location: bool,
    rng: SmallRng,
}

impl DummyEnv {
    pub fn perturb_position(&mut self, d: u64) {
        self.position += d;
    }

    /// Rewards of steps after the `n`-th are shifted by one.
    pub fn perturb_reward_after(&mut self, n: u64) {
        self.reward_offset_after = Some(self.steps + n);
    }

    pub fn perturb_info(&mut self) {
        self.info_tag += 1;
    }

    /// A counter that is only seen through the hash starts ticking after
    /// the `n`-th step.
    pub fn perturb_hidden_after(&mut self, n: u64) {
        self.hidden_after = Some(self.steps + n);
    }

    pub fn set_episode_len(&mut self, len: u64) {
        self.episode_len = len;
    }

    /// Resets start from `position` instead of 0.
    pub fn perturb_reset_position(&mut self, position: u64) {
        self.reset_position = position;
    }

    pub fn perturb_available_actions(&mut self) {
        self.extra_location = true;
    }
}

impl Env for DummyEnv {
    type Config = DummyEnvConfig;
    type Act = DummyAct;
    type Obs = DummyObs;
    type Info = DummyInfo;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        Ok(Self {
            position: 0,
            steps: 0,
            episode_len: config.episode_len,
            reward_offset_after: None,
            info_tag: 0,
            hidden: 0,
            hidden_after: None,
            reset_position: 0,
            extra_location: false,
            rng: SmallRng::seed_from_u64(seed as u64),
        })
    }

    fn reset(&mut self) -> Result<Self::Obs> {
        self.position = self.reset_position;
        self.steps = 0;
        Ok(DummyObs(self.position))
    }

    fn step(&mut self, a: &Self::Act) -> Result<Step<Self>> {
        self.position += a.0;
        self.steps += 1;
        if matches!(self.hidden_after, Some(n) if self.steps > n) {
            self.hidden += 1;
        }

        let mut reward = (self.position % 5) as f32;
        if matches!(self.reward_offset_after, Some(n) if self.steps > n) {
            reward += 1.0;
        }
        let is_terminated = self.steps >= self.episode_len;

        Ok(Step::new(
            DummyObs(self.position),
            a.clone(),
            vec![reward],
            is_terminated,
            false,
            DummyInfo { tag: self.info_tag },
        ))
    }
}

impl CloneEnv for DummyEnv {
    fn clone_env(&self) -> Result<Self> {
        Ok(self.clone())
    }

    fn state(&self) -> Result<EnvState> {
        Ok(EnvState {
            game_ticks: self.steps,
            hash: StateHash(
                self.position.wrapping_mul(0x9e37_79b9_7f4a_7c15)
                    ^ self.steps
                    ^ self.hidden.rotate_left(32),
            ),
        })
    }
}

impl ActionSpace for DummyEnv {
    fn available_actions(&self, _player_id: u32) -> Result<AvailableActions> {
        let mut actions = AvailableActions::new();
        actions.insert(Location::new(0, 0), vec!["add".to_string()].into_iter().collect());
        if self.extra_location {
            actions.insert(Location::new(1, 0), vec!["add".to_string()].into_iter().collect());
        }
        Ok(actions)
    }

    fn available_action_ids(
        &self,
        _location: &Location,
        action_names: &[String],
    ) -> Result<ActionIds> {
        Ok(action_names
            .iter()
            .map(|name| (name.clone(), vec![0, 1, 2]))
            .collect())
    }

    fn sample_action(&mut self) -> Result<Self::Act> {
        Ok(DummyAct(self.rng.gen_range(0..3)))
    }
}
