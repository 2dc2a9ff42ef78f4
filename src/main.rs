// src/main.rs
//
// Thin harness around the chvi library.
// All of the real logic lives in the lib crate (solver, environments,
// geometry); this binary only parses parameters, wires up a progress sink,
// and prints the result.

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

use chvi::{
    ConsoleSink, Environment, GoalEnv, JsonlSink, NoopSink, ProgressSink, ScrambleEnv,
    SolveReport, Solver, SolverConfig,
};

/// Command-line arguments for the chvi binary.
#[derive(Parser, Debug)]
#[command(name = "chvi")]
struct Cli {
    /// Number of state-space dimensions.
    #[arg(long)]
    dimensions: usize,

    /// Cardinality of every dimension.
    #[arg(long)]
    size: usize,

    /// Seed forwarded to the environment (goal placement / scrambling);
    /// the solver itself is deterministic and never consumes randomness.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Fraction of states turned into absorbing goal cells (goal env only).
    #[arg(long, default_value_t = 0.01)]
    goals: f64,

    /// Which simulated environment to solve.
    #[arg(long, value_enum, default_value = "goal")]
    env: EnvKind,

    /// Action count for the scramble environment
    /// (defaults to 2 * dimensions, matching the goal environment).
    #[arg(long)]
    actions: Option<usize>,

    /// Discount factor applied to successor hulls.
    #[arg(long, default_value_t = 1.0)]
    discount_factor: f64,

    /// Hard cap on the number of sweeps.
    #[arg(long, default_value_t = 100)]
    max_iterations: usize,

    /// Relative vertex-count delta at or below which the run converges.
    #[arg(long, default_value_t = 0.0)]
    epsilon: f64,

    /// Disable the recompute-avoidance cache.
    #[arg(long)]
    no_cache: bool,

    /// Print the final per-state hulls as JSON instead of a progress table.
    #[arg(long)]
    output: bool,

    /// Optional JSONL path for per-generation telemetry.
    #[arg(long)]
    log_jsonl: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum EnvKind {
    /// Grid world with randomly placed absorbing goals.
    Goal,
    /// Seed-scrambled stress environment.
    Scramble,
}

/// Build the telemetry sink as a trait object so the choice between table,
/// JSONL file, and silence is made once, at startup.
fn build_sink(machine_output: bool, log_jsonl: Option<&str>) -> Box<dyn ProgressSink> {
    if let Some(path) = log_jsonl {
        match JsonlSink::create(path) {
            Ok(sink) => return Box::new(sink),
            Err(err) => {
                eprintln!(
                    "Failed to create log file ({path}), \
                     falling back to silent progress: {err}"
                );
                return Box::new(NoopSink);
            }
        }
    }
    if machine_output {
        Box::new(NoopSink)
    } else {
        Box::new(ConsoleSink::default())
    }
}

fn validate(cli: &Cli) -> Result<()> {
    if cli.dimensions == 0 {
        bail!("--dimensions must be at least 1");
    }
    if cli.size < 2 {
        bail!("--size must be at least 2");
    }
    if !cli.goals.is_finite() || !(0.0..=1.0).contains(&cli.goals) {
        bail!("--goals must lie in [0, 1], got {}", cli.goals);
    }
    if cli.actions == Some(0) {
        bail!("--actions must be at least 1");
    }
    Ok(())
}

fn solve<E: Environment>(
    env: &E,
    cfg: SolverConfig,
    sink: &mut dyn ProgressSink,
) -> Result<SolveReport> {
    let solver = Solver::new(env, cfg)?;
    Ok(solver.run(sink))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    validate(&cli)?;

    let cfg = SolverConfig {
        discount_factor: cli.discount_factor,
        max_iterations: cli.max_iterations,
        epsilon: cli.epsilon,
        use_cache: !cli.no_cache,
    };
    // reject bad solver parameters before building any environment
    cfg.validate()?;

    let sizes = vec![cli.size; cli.dimensions];
    let mut sink = build_sink(cli.output, cli.log_jsonl.as_deref());

    let report = match cli.env {
        EnvKind::Goal => {
            let env = GoalEnv::new(&sizes, cli.seed, cli.goals);
            solve(&env, cfg, sink.as_mut())?
        }
        EnvKind::Scramble => {
            let actions = cli.actions.unwrap_or(2 * cli.dimensions);
            let env = ScrambleEnv::new(&sizes, actions, cli.seed);
            solve(&env, cfg, sink.as_mut())?
        }
    };

    if cli.output {
        println!("{}", serde_json::to_string(&report.hulls)?);
    } else {
        println!();
        println!("{:<16} {:?}", "termination", report.termination);
        println!("{:<16} {}", "iterations", report.iterations);
        println!("{:<16} {}", "total vertices", report.total_vertices);
        println!(
            "{:<16} {} hits / {} misses",
            "cache", report.cache.hits, report.cache.misses
        );
    }

    Ok(())
}
