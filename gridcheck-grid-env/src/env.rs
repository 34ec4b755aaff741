mod config;
use crate::{Direction, Grid, GridAct, GridError, GridObs, Level, Move, ObjectKind};
use anyhow::Result;
pub use config::GridEnvConfig;
use gridcheck_core::{
    ActionIds, ActionSpace, AvailableActions, CloneEnv, Env, EnvState, Info, Location, Step,
};
use log::{debug, trace};
use ndarray::Array3;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::{
    collections::{BTreeMap, BTreeSet},
    str::FromStr,
};

/// The only action name of the grid.
const MOVE: &str = "move";

/// Outcome of an episode for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerResult {
    /// All boxes are gone.
    Win,

    /// The episode hit the step limit.
    End,
}

/// Information given at every step of the interaction with the environment.
///
/// Player results are only set at the last step of an episode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridInfo {
    /// Results keyed by player id.
    pub player_results: BTreeMap<u32, PlayerResult>,
}

impl Info for GridInfo {}

/// A Sokoban-style grid world.
///
/// Besides the grid, the environment owns two random number generators: one
/// for slipping moves, which is part of the dynamics, and one for sampling
/// actions. Both are copied by [`CloneEnv::clone_env`], neither takes part in
/// the state hash.
#[derive(Clone)]
pub struct GridEnv {
    level: Level,
    player_id: u32,
    slip_probability: f64,
    max_steps: Option<u64>,
    grid: Grid,
    rng: SmallRng,
    action_rng: SmallRng,
}

impl GridEnv {
    /// Returns the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    fn obs(&self) -> GridObs {
        let (w, h) = (self.grid.width() as usize, self.grid.height() as usize);
        let mut obs = Array3::<u8>::zeros((ObjectKind::ALL.len(), w, h));
        for (loc, obj) in self.grid.objects() {
            obs[[obj.kind.channel(), loc.x as usize, loc.y as usize]] = 1;
        }
        GridObs(obs.into_dyn())
    }

    fn avatars(&self) -> Vec<Location> {
        self.grid
            .objects()
            .filter(|(_, o)| o.kind == ObjectKind::Avatar && o.player_id == self.player_id)
            .map(|(loc, _)| *loc)
            .collect()
    }

    fn slip(&mut self) -> bool {
        self.slip_probability > 0.0 && self.rng.gen_bool(self.slip_probability)
    }
}

impl Env for GridEnv {
    type Config = GridEnvConfig;
    type Obs = GridObs;
    type Act = GridAct;
    type Info = GridInfo;

    fn build(config: &Self::Config, seed: i64) -> Result<Self> {
        let level = Level::from_str(&config.level)?;
        debug!(
            "Build GridEnv: {}x{} level, seed = {}",
            level.width(),
            level.height(),
            seed
        );
        let grid = Grid::from_level(&level);

        Ok(Self {
            level,
            player_id: config.player_id,
            slip_probability: config.slip_probability,
            max_steps: config.max_steps,
            grid,
            rng: SmallRng::seed_from_u64(seed as u64),
            action_rng: SmallRng::seed_from_u64((seed as u64).wrapping_add(1)),
        })
    }

    fn reset(&mut self) -> Result<GridObs> {
        trace!("GridEnv::reset()");
        self.grid = Grid::from_level(&self.level);
        Ok(self.obs())
    }

    fn step(&mut self, a: &GridAct) -> Result<Step<Self>> {
        if a.0 >= GridAct::N {
            return Err(GridError::InvalidAction(a.0).into());
        }

        let moves = match a.direction() {
            Some(direction) if !self.slip() => self
                .avatars()
                .into_iter()
                .map(|loc| Move::new(loc, direction))
                .collect(),
            _ => vec![],
        };
        let rewards = self.grid.perform_actions(self.player_id, &moves);
        self.grid.update();

        let reward = rewards.iter().sum::<i32>() as f32;
        let is_terminated = self.grid.count(ObjectKind::Box) == 0;
        let is_truncated = !is_terminated
            && self
                .max_steps
                .map_or(false, |m| self.grid.tick_count() >= m);

        let mut info = GridInfo::default();
        if is_terminated {
            info.player_results.insert(self.player_id, PlayerResult::Win);
        } else if is_truncated {
            info.player_results.insert(self.player_id, PlayerResult::End);
        }

        Ok(Step::new(
            self.obs(),
            *a,
            vec![reward],
            is_terminated,
            is_truncated,
            info,
        ))
    }
}

impl CloneEnv for GridEnv {
    fn clone_env(&self) -> Result<Self> {
        Ok(self.clone())
    }

    fn state(&self) -> Result<EnvState> {
        Ok(EnvState {
            game_ticks: self.grid.tick_count(),
            hash: self.grid.state_hash()?,
        })
    }
}

impl ActionSpace for GridEnv {
    fn available_actions(&self, player_id: u32) -> Result<AvailableActions> {
        Ok(self
            .grid
            .objects()
            .filter(|(_, o)| o.kind == ObjectKind::Avatar && o.player_id == player_id)
            .map(|(loc, _)| (*loc, vec![MOVE.to_string()].into_iter().collect::<BTreeSet<_>>()))
            .collect())
    }

    /// Move ids whose destination is inside the grid and not a wall.
    fn available_action_ids(
        &self,
        location: &Location,
        action_names: &[String],
    ) -> Result<ActionIds> {
        let mut ids = ActionIds::new();
        for name in action_names {
            if name != MOVE {
                return Err(GridError::UnknownActionName(name.clone()).into());
            }
            let movable = matches!(
                self.grid.object(*location),
                Some(o) if o.kind == ObjectKind::Avatar
            );
            let dirs = if movable {
                Direction::ALL
                    .iter()
                    .filter(|d| {
                        let dest = d.apply(*location);
                        self.grid.in_bounds(dest)
                            && self
                                .grid
                                .object(dest)
                                .map_or(true, |o| o.kind != ObjectKind::Wall)
                    })
                    .map(|d| d.action_id())
                    .collect()
            } else {
                vec![]
            };
            ids.insert(name.clone(), dirs);
        }
        Ok(ids)
    }

    fn sample_action(&mut self) -> Result<GridAct> {
        Ok(GridAct(self.action_rng.gen_range(0..GridAct::N)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcheck_core::{
        check_clone, error::CloneCheckError, record::NullRecorder, run_clone_check,
        CloneCheckConfig, DivergedField,
    };
    use test_log::test;

    const CORRIDOR: &str = "wwwww\nwAbhw\nwwwww";

    fn acts(ids: &[u32]) -> Vec<GridAct> {
        ids.iter().copied().map(GridAct).collect()
    }

    #[test]
    fn test_clone_matches_over_ten_steps() {
        let config = GridEnvConfig::default().slip_probability(0.3);
        let mut env = GridEnv::build(&config, 1).unwrap();
        env.reset().unwrap();
        let mut clone = env.clone_env().unwrap();

        let actions = acts(&[3, 4, 1, 2, 3, 0, 1, 1, 4, 3]);
        let report = check_clone(
            &mut env,
            &mut clone,
            &actions,
            &CloneCheckConfig::default(),
            &mut NullRecorder::new(),
        )
        .unwrap();

        assert_eq!(report.steps, 10);
        assert_eq!(env.state().unwrap(), clone.state().unwrap());
        assert_eq!(env.state().unwrap().game_ticks, 10);
    }

    #[test]
    fn test_clone_taken_mid_episode() {
        let config = GridEnvConfig::default()
            .slip_probability(0.2)
            .max_steps(Some(25));
        let mut env = GridEnv::build(&config, 5).unwrap();
        env.reset().unwrap();
        for _ in 0..7 {
            let a = env.sample_action().unwrap();
            env.step(&a).unwrap();
        }
        let mut clone = env.clone_env().unwrap();

        let actions = (0..300)
            .map(|_| env.sample_action())
            .collect::<Result<Vec<_>>>()
            .unwrap();
        let report = check_clone(
            &mut env,
            &mut clone,
            &actions,
            &CloneCheckConfig::default(),
            &mut NullRecorder::new(),
        )
        .unwrap();

        // Episodes last at most 25 ticks.
        assert!(report.episodes >= 12);
    }

    #[test]
    fn test_independent_rng_is_detected() {
        let mut env = GridEnv::build(&GridEnvConfig::default(), 0).unwrap();
        let mut other =
            GridEnv::build(&GridEnvConfig::default().slip_probability(1.0), 0).unwrap();
        env.reset().unwrap();
        other.reset().unwrap();

        // The avatar starts at (4, 1) and can step right.
        let err = check_clone(
            &mut env,
            &mut other,
            &acts(&[3]),
            &CloneCheckConfig::default(),
            &mut NullRecorder::new(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CloneCheckError::Divergence {
                step: 1,
                field: DivergedField::Observation,
                ..
            }
        ));
    }

    #[test]
    fn test_run_clone_check_on_sokoban() {
        let config = GridEnvConfig::default()
            .slip_probability(0.1)
            .max_steps(Some(100));
        let check_config = CloneCheckConfig::default().n_steps(2_000).seed(42);

        let report =
            run_clone_check::<GridEnv, _>(&config, &check_config, &mut NullRecorder::new())
                .unwrap();

        assert_eq!(report.steps, 2_000);
        assert!(report.episodes >= 20);
        assert_eq!(report.original_actions.location, Some(Location::new(4, 1)));
    }

    #[test]
    fn test_push_box_into_hole_wins() {
        let config = GridEnvConfig::default().level(CORRIDOR);
        let mut env = GridEnv::build(&config, 0).unwrap();
        env.reset().unwrap();

        let step = env.step(&GridAct(3)).unwrap();
        assert_eq!(step.reward, vec![1.0]);
        assert!(step.is_terminated);
        assert!(!step.is_truncated);
        assert_eq!(step.info.player_results[&1], PlayerResult::Win);

        let obs = env.reset().unwrap();
        assert_eq!(obs.0[[ObjectKind::Box.channel(), 2, 1]], 1);
    }

    #[test]
    fn test_truncation() {
        let config = GridEnvConfig::default().max_steps(Some(2));
        let mut env = GridEnv::build(&config, 0).unwrap();
        env.reset().unwrap();

        let step = env.step(&GridAct(0)).unwrap();
        assert!(!step.is_done());
        assert!(step.info.player_results.is_empty());

        let step = env.step(&GridAct(0)).unwrap();
        assert!(step.is_truncated);
        assert!(!step.is_terminated);
        assert_eq!(step.info.player_results[&1], PlayerResult::End);
    }

    #[test]
    fn test_available_actions() {
        let env = GridEnv::build(&GridEnvConfig::default(), 0).unwrap();

        let available = env.available_actions(1).unwrap();
        assert_eq!(available.len(), 1);
        let (loc, names) = available.iter().next().unwrap();
        assert_eq!(*loc, Location::new(4, 1));
        assert!(names.contains(MOVE));

        // Up and down are walls, left is a hole.
        let ids = env
            .available_action_ids(loc, &[MOVE.to_string()])
            .unwrap();
        assert_eq!(ids[MOVE], vec![1, 3]);

        assert!(env.available_actions(2).unwrap().is_empty());
        assert!(env
            .available_action_ids(loc, &["jump".to_string()])
            .is_err());
    }

    #[test]
    fn test_observation_layout() {
        let mut env = GridEnv::build(&GridEnvConfig::default(), 0).unwrap();
        let obs = env.reset().unwrap();

        assert_eq!(obs.0.shape(), &[4, 7, 7]);
        assert_eq!(obs.0[[ObjectKind::Avatar.channel(), 4, 1]], 1);
        assert_eq!(obs.0[[ObjectKind::Wall.channel(), 0, 0]], 1);
        assert_eq!(obs.0.sum(), 37);
    }

    #[test]
    fn test_invalid_action() {
        let mut env = GridEnv::build(&GridEnvConfig::default(), 0).unwrap();
        env.reset().unwrap();
        let err = env.step(&GridAct(7)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GridError>(),
            Some(&GridError::InvalidAction(7))
        );
    }

    #[test]
    fn test_same_seed_samples_same_actions() {
        let config = GridEnvConfig::default();
        let mut a = GridEnv::build(&config, 9).unwrap();
        let mut b = GridEnv::build(&config, 9).unwrap();
        let xs = (0..50).map(|_| a.sample_action().unwrap()).collect::<Vec<_>>();
        let ys = (0..50).map(|_| b.sample_action().unwrap()).collect::<Vec<_>>();
        assert_eq!(xs, ys);
        assert!(xs.iter().all(|x| x.0 < GridAct::N));
    }
}
