//! Scenario execution engine

use anyhow::{Context, Result, bail};
use quadgrid_core::grid::{GridConfig, GridTweenController};
use std::time::Instant;

use super::actions::ScenarioAction;
use super::definition::ScenarioDefinition;
use super::results::ExecutionReport;
use crate::input::InputMap;
use crate::panels::PanelSet;

/// Configuration for scenario executor
#[derive(Debug, Clone)]
pub struct ScenarioExecutorConfig {
    /// Grid settings used when the scenario doesn't specify its own
    pub default_grid: GridConfig,

    /// Container size used when the scenario doesn't specify its own
    pub default_container_size: f32,

    /// Key bindings for `PressKey`
    pub input: InputMap,

    /// Verbose logging
    pub verbose: bool,
}

impl Default for ScenarioExecutorConfig {
    fn default() -> Self {
        Self {
            default_grid: GridConfig::default(),
            default_container_size: 100.0,
            input: InputMap::default(),
            verbose: false,
        }
    }
}

/// Executes scenario actions against a grid controller
pub struct ScenarioExecutor {
    /// Configuration
    config: ScenarioExecutorConfig,

    /// Render target fed after every tick
    panels: PanelSet,

    /// Current frame counter
    frame_count: usize,

    /// Simulated seconds fed to the grid
    simulated_seconds: f64,

    /// Action execution log
    log: Vec<String>,

    /// Tick timings (milliseconds)
    tick_times: Vec<f64>,
}

impl Default for ScenarioExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioExecutor {
    /// Create new executor with default config
    pub fn new() -> Self {
        Self::with_config(ScenarioExecutorConfig::default())
    }

    /// Create new executor with custom config
    pub fn with_config(config: ScenarioExecutorConfig) -> Self {
        Self {
            config,
            panels: PanelSet::default(),
            frame_count: 0,
            simulated_seconds: 0.0,
            log: Vec::new(),
            tick_times: Vec::new(),
        }
    }

    /// Panels as of the last tick
    pub fn panels(&self) -> &PanelSet {
        &self.panels
    }

    /// Build a controller for `scenario` and run it to completion
    pub fn execute_scenario(&mut self, scenario: &ScenarioDefinition) -> Result<ExecutionReport> {
        let container = scenario
            .container_size
            .unwrap_or(self.config.default_container_size);
        let grid_config = scenario.grid.unwrap_or(self.config.default_grid);
        let mut grid = GridTweenController::new(container, grid_config)
            .with_context(|| format!("Invalid grid setup for scenario '{}'", scenario.name))?;

        self.execute_with(scenario, &mut grid)
    }

    /// Run `scenario` against an existing controller
    pub fn execute_with(
        &mut self,
        scenario: &ScenarioDefinition,
        grid: &mut GridTweenController,
    ) -> Result<ExecutionReport> {
        let start_time = Instant::now();
        let mut report = ExecutionReport::new(scenario.name.clone());

        self.log.clear();
        self.frame_count = 0;
        self.simulated_seconds = 0.0;
        self.tick_times.clear();
        self.panels = PanelSet::default();
        grid.push_to(&mut self.panels);

        self.log(&format!("Starting scenario: {}", scenario.name));
        if !scenario.description.is_empty() {
            self.log(&format!("Description: {}", scenario.description));
        }

        // Execute setup actions
        let setup_start = Instant::now();
        if !scenario.setup.is_empty() {
            self.log(&format!("Running {} setup actions", scenario.setup.len()));
            for (idx, action) in scenario.setup.iter().enumerate() {
                if let Err(e) = self.execute_action(action, grid) {
                    let msg = format!("Setup action {} failed: {}", idx, e);
                    self.log(&msg);
                    report.log = self.log.clone();
                    return Err(anyhow::anyhow!(msg));
                }
            }
        }
        report.performance.setup_duration_ms = setup_start.elapsed().as_secs_f64() * 1000.0;

        // Execute main actions
        let action_start = Instant::now();
        self.log(&format!("Running {} main actions", scenario.actions.len()));
        for (idx, action) in scenario.actions.iter().enumerate() {
            if let Err(e) = self.execute_action(action, grid) {
                let msg = format!("Action {} failed: {}", idx, e);
                self.log(&msg);
                report.log = self.log.clone();
                return Err(anyhow::anyhow!(msg));
            }
        }
        report.performance.action_duration_ms = action_start.elapsed().as_secs_f64() * 1000.0;

        report.actions_executed = scenario.setup.len() + scenario.actions.len();

        // Run verifications
        let verify_start = Instant::now();
        if !scenario.verify.is_empty() {
            self.log(&format!("Running {} verifications", scenario.verify.len()));
            for condition in &scenario.verify {
                let result = condition.evaluate(grid, &self.panels);
                self.log(&format!(
                    "  {} {}",
                    if result.passed { "✓" } else { "✗" },
                    result.message
                ));

                if !result.passed {
                    report.verification_failures.push(result);
                }
            }
        }
        report.performance.verification_duration_ms = verify_start.elapsed().as_secs_f64() * 1000.0;

        // Finalize report
        report.frames_executed = self.frame_count;
        report.final_extents = grid.extents().iter().map(|e| [e.x, e.y]).collect();
        report.passed = report.success();

        report.performance.total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
        report.performance.simulated_seconds = self.simulated_seconds;

        if !self.tick_times.is_empty() {
            let total_tick_time: f64 = self.tick_times.iter().sum();
            report.performance.avg_tick_time_ms = total_tick_time / self.tick_times.len() as f64;
            report.performance.peak_tick_time_ms =
                self.tick_times.iter().copied().fold(0.0, f64::max);
        }

        self.log(&format!(
            "Scenario complete: {} ({} frames, {:.1}ms)",
            if report.passed { "PASSED" } else { "FAILED" },
            self.frame_count,
            report.performance.total_duration_ms
        ));
        self.log(&format!("  Performance: {}", report.performance.summary()));
        report.log = self.log.clone();

        Ok(report)
    }

    /// Execute a single action
    fn execute_action(
        &mut self,
        action: &ScenarioAction,
        grid: &mut GridTweenController,
    ) -> Result<()> {
        if self.config.verbose {
            self.log(&format!("[Frame {}] {:?}", self.frame_count, action));
        }

        match action {
            ScenarioAction::Expand { slot } => {
                grid.expand(*slot);
                self.log(&format!("  Expand {}", slot));
            }

            ScenarioAction::Reset => {
                grid.reset();
                self.log("  Reset to equal division");
            }

            ScenarioAction::PressKey { key } => match self.config.input.command_for(*key) {
                Some(command) => {
                    grid.apply(command);
                    self.log(&format!("  Key {:?} -> {:?}", key, command));
                }
                None => bail!("Key {:?} is not bound to a command", key),
            },

            ScenarioAction::ApplyImmediate { layout } => {
                grid.apply_immediate(*layout);
                grid.push_to(&mut self.panels);
                self.log(&format!("  Applied {} immediately", layout));
            }

            ScenarioAction::SetContainerSize { size } => {
                grid.set_container_size(*size)?;
                self.log(&format!("  Container size set to {}", size));
            }

            ScenarioAction::Tick { dt } => {
                self.tick(grid, *dt);
            }

            ScenarioAction::TickFrames { frames, dt } => {
                for _ in 0..*frames {
                    self.tick(grid, *dt);
                }
                self.log(&format!("  Ticked {} frames of {}s", frames, dt));
            }

            ScenarioAction::RunUntilIdle { dt, max_frames } => {
                if *dt <= 0.0 && grid.is_animating() {
                    bail!("RunUntilIdle needs a positive dt, got {}", dt);
                }

                let mut frames = 0;
                while grid.is_animating() {
                    if frames >= *max_frames {
                        bail!("Still animating after {} frames", max_frames);
                    }
                    self.tick(grid, *dt);
                    frames += 1;
                }
                self.log(&format!("  Settled after {} frames", frames));
            }

            ScenarioAction::Log { message } => {
                self.log(&format!("  {}", message));
            }
        }

        Ok(())
    }

    fn tick(&mut self, grid: &mut GridTweenController, dt: f32) {
        let start = Instant::now();
        grid.tick(dt);
        grid.push_to(&mut self.panels);
        self.tick_times.push(start.elapsed().as_secs_f64() * 1000.0);

        self.frame_count += 1;
        self.simulated_seconds += dt.max(0.0) as f64;
    }

    fn log(&mut self, message: &str) {
        log::info!("{}", message);
        self.log.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::verification::VerificationCondition;
    use quadgrid_core::grid::Slot;

    #[test]
    fn test_builtin_scenario_passes() {
        let mut executor = ScenarioExecutor::new();
        let report = executor
            .execute_scenario(&ScenarioDefinition::expand_and_reset())
            .unwrap();

        assert!(report.passed, "failures: {:?}", report.verification_failures);
        assert!(report.frames_executed > 0);
        assert_eq!(report.final_extents, vec![[50.0, 50.0]; 4]);
        assert!(report.log.iter().any(|l| l.contains("Top-left expanded")));
    }

    #[test]
    fn test_key_presses_drive_grid() {
        let scenario = ScenarioDefinition {
            name: "Keys".to_string(),
            description: String::new(),
            container_size: Some(200.0),
            grid: Some(GridConfig::duration_based(0.25)),
            setup: vec![],
            actions: vec![
                ScenarioAction::PressKey { key: '4' },
                ScenarioAction::TickFrames { frames: 4, dt: 0.125 },
            ],
            verify: vec![
                VerificationCondition::ExtentExact {
                    slot: Slot::BottomRight,
                    width: 180.0,
                    height: 180.0,
                },
                VerificationCondition::PanelSize {
                    slot: Slot::TopLeft,
                    width: 20.0,
                    height: 20.0,
                    tolerance: 0.0,
                },
            ],
        };

        let mut executor = ScenarioExecutor::new();
        let report = executor.execute_scenario(&scenario).unwrap();
        assert!(report.passed, "failures: {:?}", report.verification_failures);
        assert_eq!(report.frames_executed, 4);
        assert_eq!(executor.panels().panel(Slot::TopLeft).updates, 5);
    }

    #[test]
    fn test_unbound_key_fails() {
        let scenario = ScenarioDefinition {
            name: "Bad key".to_string(),
            description: String::new(),
            container_size: None,
            grid: None,
            setup: vec![],
            actions: vec![ScenarioAction::PressKey { key: 'z' }],
            verify: vec![],
        };

        let mut executor = ScenarioExecutor::new();
        assert!(executor.execute_scenario(&scenario).is_err());
    }

    #[test]
    fn test_run_until_idle_times_out() {
        let scenario = ScenarioDefinition {
            name: "Slow".to_string(),
            description: String::new(),
            container_size: None,
            grid: Some(GridConfig::duration_based(10.0)),
            setup: vec![ScenarioAction::Expand {
                slot: Slot::TopLeft,
            }],
            actions: vec![ScenarioAction::RunUntilIdle {
                dt: 0.1,
                max_frames: 5,
            }],
            verify: vec![],
        };

        let mut executor = ScenarioExecutor::new();
        let err = executor.execute_scenario(&scenario).unwrap_err();
        assert!(err.to_string().contains("Still animating"));
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let scenario = ScenarioDefinition {
            name: "Degenerate".to_string(),
            description: String::new(),
            container_size: Some(100.0),
            grid: Some(GridConfig::default().with_ratios(0.5, 1.5)),
            setup: vec![],
            actions: vec![],
            verify: vec![],
        };

        let mut executor = ScenarioExecutor::new();
        assert!(executor.execute_scenario(&scenario).is_err());
    }
}
