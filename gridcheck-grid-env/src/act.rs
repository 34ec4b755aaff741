//! Action for [`GridEnv`](crate::GridEnv).
use crate::Direction;
use gridcheck_core::Act;

/// Action for [`GridEnv`](crate::GridEnv).
///
/// 0 is a no-op, 1 to 4 move the avatar left, up, right and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridAct(pub u32);

impl GridAct {
    /// The number of discrete actions.
    pub const N: u32 = 5;

    /// Returns the direction of the move, `None` for the no-op.
    pub fn direction(&self) -> Option<Direction> {
        Direction::from_action_id(self.0)
    }
}

impl Act for GridAct {}

impl From<u32> for GridAct {
    fn from(act: u32) -> Self {
        Self(act)
    }
}
