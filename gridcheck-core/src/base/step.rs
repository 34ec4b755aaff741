//! Environment step.
use super::Env;
use std::fmt::Debug;

/// Additional information to `Obs` and `Act`.
///
/// Info payloads of an environment and its clone are compared for equality.
pub trait Info: Debug + PartialEq {}

impl Info for () {}

/// Represents an action, observation and reward tuple `(a_t, o_t+1, r_t)`
/// with some additional information.
///
/// An environment emits [`Step`] object at every interaction steps.
pub struct Step<E: Env> {
    /// Action.
    pub act: E::Act,

    /// Observation.
    pub obs: E::Obs,

    /// Reward. Multi-agent environments give one reward per player.
    pub reward: Vec<f32>,

    /// Flag denoting if episode is terminated.
    pub is_terminated: bool,

    /// Flag denoting if episode is truncated.
    pub is_truncated: bool,

    /// Information defined by user.
    pub info: E::Info,
}

impl<E: Env> Step<E> {
    /// Constructs a [`Step`] object.
    pub fn new(
        obs: E::Obs,
        act: E::Act,
        reward: Vec<f32>,
        is_terminated: bool,
        is_truncated: bool,
        info: E::Info,
    ) -> Self {
        Step {
            act,
            obs,
            reward,
            is_terminated,
            is_truncated,
            info,
        }
    }

    #[inline]
    /// Terminated or truncated.
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}

// Equivalent to `#[derive(Debug)]`, without requiring `E: Debug`.
impl<E: Env> Debug for Step<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("act", &self.act)
            .field("obs", &self.obs)
            .field("reward", &self.reward)
            .field("is_terminated", &self.is_terminated)
            .field("is_truncated", &self.is_truncated)
            .field("info", &self.info)
            .finish()
    }
}
