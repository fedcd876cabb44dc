use anyhow::Context;
use clap::Parser;
use quadgrid::config::AppConfig;
use quadgrid::grid::GridTweenController;
use quadgrid::input::InputMap;
use quadgrid::panels::PanelSet;
use quadgrid::scenario::{ScenarioDefinition, ScenarioExecutor, ScenarioExecutorConfig};
use quadgrid::text::{TextLabel, TextLookup};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Run a RON scenario file
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Write the scenario report as JSON
    #[arg(long)]
    report: Option<PathBuf>,

    /// Drive the grid with a key sequence, e.g. "1 2 r" (1-4 expand, 0/r reset)
    #[arg(long)]
    keys: Option<String>,

    /// Frames simulated after each key press
    #[arg(long, default_value = "30")]
    frames_per_key: usize,

    /// Seconds per simulated frame
    #[arg(long, default_value = "0.016666668")]
    dt: f32,

    /// Simulate the bouncing circle for this many frames
    #[arg(long)]
    bounce: Option<usize>,

    /// CSV lookup table to read
    #[arg(long, requires = "key")]
    lookup: Option<PathBuf>,

    /// Key to look up in the table
    #[arg(long, requires = "lookup")]
    key: Option<String>,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = AppConfig::load()?;

    let default_filter = if config.debug.verbose_logging {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if args.print_config {
        let ron = ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")?;
        println!("{}", ron);
        return Ok(());
    }

    if args.dt <= 0.0 || !args.dt.is_finite() {
        eprintln!("Error: --dt must be a positive number of seconds");
        std::process::exit(1);
    }

    if let Some(path) = &args.scenario {
        return run_scenario(&config, path, args.report.as_deref());
    }

    if let Some(keys) = &args.keys {
        return run_keys(&config, keys, args.frames_per_key, args.dt);
    }

    if let Some(frames) = args.bounce {
        run_bounce(&config, frames, args.dt);
        return Ok(());
    }

    if let (Some(path), Some(key)) = (&args.lookup, &args.key) {
        return run_lookup(&config, path, key);
    }

    log::info!("No mode selected, running built-in expand/reset demo");
    let report = ScenarioExecutor::with_config(executor_config(&config)?)
        .execute_scenario(&ScenarioDefinition::expand_and_reset())?;
    println!("{}", report.performance.summary());
    if !report.passed {
        std::process::exit(1);
    }
    Ok(())
}

fn executor_config(config: &AppConfig) -> anyhow::Result<ScenarioExecutorConfig> {
    Ok(ScenarioExecutorConfig {
        default_grid: config.grid.to_grid_config()?,
        default_container_size: config.grid.container_size,
        input: InputMap::default(),
        verbose: config.debug.verbose_logging,
    })
}

fn run_scenario(
    config: &AppConfig,
    path: &std::path::Path,
    report_path: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let scenario = ScenarioDefinition::from_file(path)?;
    log::info!("Loaded scenario '{}' from {}", scenario.name, path.display());

    let mut executor = ScenarioExecutor::with_config(executor_config(config)?);
    let report = executor.execute_scenario(&scenario)?;

    if let Some(report_path) = report_path {
        report.save_json(report_path)?;
        log::info!("Report written to {}", report_path.display());
    }

    for failure in &report.verification_failures {
        eprintln!("FAILED: {}", failure.message);
    }
    println!(
        "{}: {} ({})",
        report.scenario_name,
        if report.passed { "PASSED" } else { "FAILED" },
        report.performance.summary()
    );

    if !report.passed {
        std::process::exit(1);
    }
    Ok(())
}

fn run_keys(config: &AppConfig, keys: &str, frames_per_key: usize, dt: f32) -> anyhow::Result<()> {
    let input = InputMap::default();
    let commands = input.parse_sequence(keys);
    if commands.is_empty() {
        log::warn!("No bound keys in '{}'", keys);
    }

    let mut grid = GridTweenController::new(config.grid.container_size, config.grid.to_grid_config()?)
        .context("Invalid grid configuration")?;
    let mut panels = PanelSet::default();
    grid.push_to(&mut panels);
    println!("start: {}", panels.summary());

    for command in commands {
        grid.apply(command);
        for _ in 0..frames_per_key {
            grid.tick(dt);
            grid.push_to(&mut panels);
        }
        println!(
            "{:?}{}: {}",
            command,
            if grid.is_animating() { " (animating)" } else { "" },
            panels.summary()
        );
    }

    Ok(())
}

fn run_bounce(config: &AppConfig, frames: usize, dt: f32) {
    let mut mover = config.bounce.build_mover();
    let mut bounces = 0;

    for frame in 0..frames {
        let hits = mover.tick(dt);
        if hits.any() {
            bounces += 1;
            log::debug!("Frame {}: bounced {:?}", frame, hits);
        }
    }

    let pos = mover.position();
    println!(
        "after {} frames: position=({:.1}, {:.1}) radius={:.1} bounces={}",
        frames,
        pos.x,
        pos.y,
        mover.radius(),
        bounces
    );
}

fn run_lookup(config: &AppConfig, path: &std::path::Path, key: &str) -> anyhow::Result<()> {
    let lookup = TextLookup::from_path(path)?.with_placeholder(config.text.placeholder.clone());
    let mut label = TextLabel::new(key);
    label.refresh(&lookup);
    println!("{}", label.text());
    Ok(())
}
