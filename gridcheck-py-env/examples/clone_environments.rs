use anyhow::Result;
use gridcheck_core::{
    check_clone, inspect_actions, record::BufferedRecorder, CloneCheckConfig, ClonePair,
};
use gridcheck_py_env::{GriddlyEnv, GriddlyEnvConfig};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let env_config = GriddlyEnvConfig::default().name("GDY-Sokoban-v0");
    let config = CloneCheckConfig::default().n_steps(10_000).player_id(1);
    let mut recorder = BufferedRecorder::new();

    let ClonePair {
        mut env,
        mut clone,
        actions,
    } = ClonePair::<GriddlyEnv>::build(&env_config, &config)?;

    for e in [&env, &clone].iter() {
        let inspection = inspect_actions(*e, config.player_id)?;
        println!("{:?}", inspection.available_actions);
        println!("{:?}", inspection.action_ids);
    }

    let report = check_clone(&mut env, &mut clone, &actions, &config, &mut recorder)?;
    println!(
        "{} steps, {} episodes, final hash = {}",
        report.steps, report.episodes, report.final_hash
    );

    Ok(())
}
