//! Scenario definition and RON file loading

use anyhow::{Context, Result};
use quadgrid_core::grid::GridConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::actions::ScenarioAction;
use super::verification::VerificationCondition;

/// Top-level scenario definition loaded from RON files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioDefinition {
    /// Scenario name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Container side length (falls back to the app config)
    #[serde(default)]
    pub container_size: Option<f32>,

    /// Grid settings (fall back to the app config)
    #[serde(default)]
    pub grid: Option<GridConfig>,

    /// Initial setup actions (run before main scenario)
    #[serde(default)]
    pub setup: Vec<ScenarioAction>,

    /// Main scenario actions
    pub actions: Vec<ScenarioAction>,

    /// Verification checks to run after scenario
    #[serde(default)]
    pub verify: Vec<VerificationCondition>,
}

impl ScenarioDefinition {
    /// Load scenario from RON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;

        Self::from_ron(&content)
            .with_context(|| format!("Failed to parse RON scenario: {}", path.display()))
    }

    /// Parse scenario from a RON string
    pub fn from_ron(content: &str) -> Result<Self> {
        let scenario = ron::from_str(content)?;
        Ok(scenario)
    }

    /// Save scenario to RON file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let ron = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize scenario to RON")?;

        std::fs::write(path.as_ref(), ron).with_context(|| {
            format!("Failed to write scenario file: {}", path.as_ref().display())
        })?;

        Ok(())
    }

    /// Built-in walk-through: expand the top-left panel, then reset.
    pub fn expand_and_reset() -> Self {
        use quadgrid_core::grid::Slot;

        Self {
            name: "Expand and reset".to_string(),
            description: "Expand top-left, let it settle, then return to equal division"
                .to_string(),
            container_size: Some(100.0),
            grid: Some(GridConfig::duration_based(0.5)),
            setup: vec![],
            actions: vec![
                ScenarioAction::Expand {
                    slot: Slot::TopLeft,
                },
                ScenarioAction::RunUntilIdle {
                    dt: 1.0 / 60.0,
                    max_frames: 600,
                },
                ScenarioAction::Log {
                    message: "Top-left expanded".to_string(),
                },
                ScenarioAction::Reset,
                ScenarioAction::RunUntilIdle {
                    dt: 1.0 / 60.0,
                    max_frames: 600,
                },
            ],
            verify: vec![
                VerificationCondition::AllExtents {
                    width: 50.0,
                    height: 50.0,
                    tolerance: 0.0,
                },
                VerificationCondition::Animating { expected: false },
                VerificationCondition::Tiling { tolerance: 1e-3 },
            ],
        }
    }
}
