use anyhow::Result;
use clap::{Parser, ValueEnum};
use gridcheck::check_and_print;
use gridcheck_core::{
    record::{BufferedRecorder, NullRecorder, Recorder},
    CloneCheckConfig, CloneCheckReport, ClonePair,
};
use gridcheck_grid_env::{GridEnv, GridEnvConfig};
use log::{info, warn};
use std::{io, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// Grid world implemented in Rust
    Grid,

    /// Griddly environment in Python
    Griddly,
}

/// Clone an environment and check that both copies behave identically
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Environment to check
    #[arg(long, value_enum, default_value_t = Backend::Grid)]
    backend: Backend,

    /// Name of the Griddly environment
    #[arg(long, default_value = "GDY-Sokoban-v0")]
    name: String,

    /// Level map of the grid backend
    #[arg(long)]
    level: Option<PathBuf>,

    /// Level index of the Griddly backend
    #[arg(long)]
    level_id: Option<u32>,

    /// Configuration of the check in YAML, overridden by the options below
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of actions applied to both environments
    #[arg(long)]
    steps: Option<usize>,

    /// Seed of the environment
    #[arg(long)]
    seed: Option<i64>,

    /// Player whose available actions are inspected
    #[arg(long)]
    player: Option<u32>,

    /// Probability that a move of the grid backend slips
    #[arg(long, default_value_t = 0.0, value_parser = parse_probability)]
    slip: f64,

    /// Maximum number of steps in an episode
    #[arg(long)]
    max_steps: Option<u64>,

    /// Write the steps to a CSV file
    #[arg(long)]
    trace: Option<PathBuf>,
}

fn check_config(args: &Args) -> Result<CloneCheckConfig> {
    let mut config = match &args.config {
        Some(path) => CloneCheckConfig::load(path)?,
        None => CloneCheckConfig::default(),
    };
    if let Some(v) = args.steps {
        config = config.n_steps(v);
    }
    if let Some(v) = args.seed {
        config = config.seed(v);
    }
    if let Some(v) = args.player {
        config = config.player_id(v);
    }
    Ok(config)
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let p = s.parse::<f64>().map_err(|e| e.to_string())?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{} is not a probability in [0, 1]", p))
    }
}

/// Options given on the command line that the selected backend does not use.
fn ignored_options(args: &Args) -> Vec<&'static str> {
    let mut ignored = vec![];
    match args.backend {
        Backend::Grid => {
            if args.level_id.is_some() {
                ignored.push("--level-id");
            }
        }
        Backend::Griddly => {
            if args.level.is_some() {
                ignored.push("--level");
            }
            if args.slip != 0.0 {
                ignored.push("--slip");
            }
        }
    }
    ignored
}

fn run_grid<R: Recorder>(
    args: &Args,
    config: &CloneCheckConfig,
    recorder: &mut R,
) -> Result<CloneCheckReport> {
    let mut env_config = GridEnvConfig::default()
        .player_id(config.player_id)
        .slip_probability(args.slip)
        .max_steps(args.max_steps);
    if let Some(path) = &args.level {
        env_config = env_config.level_from_path(path)?;
    }
    let pair = ClonePair::<GridEnv>::build(&env_config, config)?;
    check_and_print(pair, config, recorder, &mut io::stdout())
}

#[cfg(feature = "griddly")]
fn run_griddly<R: Recorder>(
    args: &Args,
    config: &CloneCheckConfig,
    recorder: &mut R,
) -> Result<CloneCheckReport> {
    use gridcheck_py_env::{GriddlyEnv, GriddlyEnvConfig};

    let env_config = GriddlyEnvConfig::default()
        .name(args.name.as_str())
        .level(args.level_id)
        .max_steps(args.max_steps.map(|v| v as usize));
    let pair = ClonePair::<GriddlyEnv>::build(&env_config, config)?;
    check_and_print(pair, config, recorder, &mut io::stdout())
}

#[cfg(not(feature = "griddly"))]
fn run_griddly<R: Recorder>(
    _: &Args,
    _: &CloneCheckConfig,
    _: &mut R,
) -> Result<CloneCheckReport> {
    anyhow::bail!("the griddly backend needs the `griddly` feature")
}

fn run_backend<R: Recorder>(
    args: &Args,
    config: &CloneCheckConfig,
    recorder: &mut R,
) -> Result<CloneCheckReport> {
    match args.backend {
        Backend::Grid => run_grid(args, config, recorder),
        Backend::Griddly => run_griddly(args, config, recorder),
    }
}

fn run(args: &Args) -> Result<CloneCheckReport> {
    let config = check_config(args)?;
    info!("Checking {:?} backend with {:?}", args.backend, config);
    for option in ignored_options(args) {
        warn!("{} is ignored by the {:?} backend", option, args.backend);
    }

    match &args.trace {
        Some(path) => {
            let mut recorder = BufferedRecorder::new();
            let report = run_backend(args, &config, &mut recorder)?;
            gridcheck::write_trace(path, &recorder)?;
            info!("Wrote {} steps to {}", recorder.len(), path.display());
            Ok(report)
        }
        None => run_backend(args, &config, &mut NullRecorder::new()),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let report = run(&args)?;
    println!(
        "OK: {} steps, {} episodes, final hash = {}",
        report.steps, report.episodes, report.final_hash
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["clone_check"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn test_defaults() {
        let args = args(&[]);
        assert_eq!(args.backend, Backend::Grid);
        assert_eq!(args.name, "GDY-Sokoban-v0");
        assert_eq!(check_config(&args).unwrap(), CloneCheckConfig::default());
    }

    #[test]
    fn test_options_override_config_file() -> Result<()> {
        let dir = TempDir::new("clone_check")?;
        let path = dir.path().join("check.yaml");
        CloneCheckConfig::default().n_steps(5).seed(3).save(&path)?;

        let args = args(&["--config", path.to_str().unwrap(), "--seed", "9"]);
        let config = check_config(&args)?;
        assert_eq!(config.n_steps, 5);
        assert_eq!(config.seed, 9);
        Ok(())
    }

    #[test]
    fn test_run_grid_with_trace() -> Result<()> {
        let dir = TempDir::new("clone_check")?;
        let trace = dir.path().join("trace.csv");
        let args = args(&[
            "--steps",
            "200",
            "--slip",
            "0.2",
            "--max-steps",
            "30",
            "--trace",
            trace.to_str().unwrap(),
        ]);

        let report = run(&args)?;
        assert_eq!(report.steps, 200);
        assert!(report.episodes >= 7);
        assert_eq!(report.original_actions, report.clone_actions);

        let n_lines = std::fs::read_to_string(&trace)?.lines().count();
        assert_eq!(n_lines, 201);
        Ok(())
    }

    #[test]
    fn test_slip_must_be_a_probability() {
        for slip in &["NaN", "1.5", "-0.1", "high"] {
            let argv = vec!["clone_check", "--slip", *slip];
            assert!(Args::try_parse_from(argv).is_err(), "{}", slip);
        }
        assert_eq!(args(&["--slip", "1"]).slip, 1.0);
    }

    #[test]
    fn test_ignored_options() {
        assert!(ignored_options(&args(&["--slip", "0.5"])).is_empty());
        assert_eq!(ignored_options(&args(&["--level-id", "2"])), vec!["--level-id"]);
        let griddly = args(&[
            "--backend",
            "griddly",
            "--slip",
            "0.5",
            "--level",
            "a.txt",
        ]);
        assert_eq!(ignored_options(&griddly), vec!["--level", "--slip"]);
    }

    #[cfg(not(feature = "griddly"))]
    #[test]
    fn test_griddly_needs_feature() {
        let args = args(&["--backend", "griddly"]);
        assert!(run(&args).is_err());
    }
}
