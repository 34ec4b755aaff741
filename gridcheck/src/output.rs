//! Console output of a check.
use anyhow::Result;
use gridcheck_core::{
    check_clone, inspect_actions, record::Recorder, ActionInspection, ActionSpace, CloneEnv,
    CloneCheckConfig, CloneCheckReport, ClonePair,
};
use std::io::Write;

/// Writes the available actions and the action ids at the first location.
pub fn write_inspection<W: Write>(out: &mut W, inspection: &ActionInspection) -> Result<()> {
    writeln!(out, "{:?}", inspection.available_actions)?;
    writeln!(out, "{:?}", inspection.action_ids)?;
    Ok(())
}

/// Writes the actions available in both environments, then checks them.
///
/// The inspections are written before the first step, so they are in `out`
/// even if the check fails.
pub fn check_and_print<E, R, W>(
    pair: ClonePair<E>,
    config: &CloneCheckConfig,
    recorder: &mut R,
    out: &mut W,
) -> Result<CloneCheckReport>
where
    E: CloneEnv + ActionSpace,
    R: Recorder,
    W: Write,
{
    let ClonePair {
        mut env,
        mut clone,
        actions,
    } = pair;

    write_inspection(out, &inspect_actions(&env, config.player_id)?)?;
    write_inspection(out, &inspect_actions(&clone, config.player_id)?)?;
    out.flush()?;

    Ok(check_clone(&mut env, &mut clone, &actions, config, recorder)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridcheck_core::{
        error::CloneCheckError, record::NullRecorder, DivergedField, Env,
    };
    use gridcheck_grid_env::{GridAct, GridEnv, GridEnvConfig};

    #[test]
    fn test_inspections_are_written_when_check_fails() -> Result<()> {
        let mut env = GridEnv::build(&GridEnvConfig::default(), 0)?;
        env.reset()?;
        // Every move of the second environment slips.
        let mut clone = GridEnv::build(&GridEnvConfig::default().slip_probability(1.0), 0)?;
        clone.reset()?;
        let pair = ClonePair {
            env,
            clone,
            actions: vec![GridAct(3)],
        };

        let mut out = Vec::new();
        let err = check_and_print(
            pair,
            &CloneCheckConfig::default(),
            &mut NullRecorder::new(),
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<CloneCheckError>(),
            Some(CloneCheckError::Divergence {
                step: 1,
                field: DivergedField::Observation,
                ..
            })
        ));
        let out = String::from_utf8(out)?;
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("\"move\""));
        assert_eq!(lines[1], "{\"move\": [1, 3]}");
        assert_eq!(lines[0..2], lines[2..4]);
        Ok(())
    }
}
