//! Verification conditions and state checks for scenarios

use glam::Vec2;
use quadgrid_core::grid::{GridTweenController, Layout, Slot};
use serde::{Deserialize, Serialize};

use crate::panels::PanelSet;

/// Conditions that can be verified against grid state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum VerificationCondition {
    // === EXTENT CHECKS ===
    /// Assert one slot's extent (with tolerance)
    Extent {
        slot: Slot,
        width: f32,
        height: f32,
        tolerance: f32,
    },

    /// Assert one slot's extent bit-for-bit
    ExtentExact { slot: Slot, width: f32, height: f32 },

    /// Assert every slot has the same extent (with tolerance)
    AllExtents {
        width: f32,
        height: f32,
        tolerance: f32,
    },

    /// Assert no extent is negative
    NonNegative,

    /// Assert both rows and both columns add up to the container size the
    /// current layout was computed for (a pending resize is not applied yet)
    Tiling { tolerance: f32 },

    // === CONTROLLER STATE ===
    /// Assert whether a transition is running
    Animating { expected: bool },

    /// Assert the layout the grid is at or heading toward
    Layout { expected: Layout },

    // === RENDER TARGET ===
    /// Assert the size last pushed to a panel
    PanelSize {
        slot: Slot,
        width: f32,
        height: f32,
        tolerance: f32,
    },

    // === LOGICAL OPERATORS ===
    /// All conditions must pass
    All {
        conditions: Vec<VerificationCondition>,
    },

    /// Any condition must pass
    Any {
        conditions: Vec<VerificationCondition>,
    },

    /// Condition must NOT pass
    Not {
        condition: Box<VerificationCondition>,
    },
}

/// Result of a verification check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationResult {
    pub passed: bool,
    pub message: String,
    pub actual_value: Option<String>, // For debugging
}

impl VerificationCondition {
    /// Evaluate condition against the controller and the panels it feeds
    pub fn evaluate(&self, grid: &GridTweenController, panels: &PanelSet) -> VerificationResult {
        match self {
            VerificationCondition::Extent {
                slot,
                width,
                height,
                tolerance,
            } => {
                let actual = grid.extent(*slot);
                let dist = actual.distance(Vec2::new(*width, *height));
                let passed = dist <= *tolerance;

                VerificationResult {
                    passed,
                    message: format!(
                        "Extent of {}: expected {}x{} ±{}, got {:.3}x{:.3}, distance {:.3}",
                        slot, width, height, tolerance, actual.x, actual.y, dist
                    ),
                    actual_value: Some(format!("{:?}", actual)),
                }
            }

            VerificationCondition::ExtentExact {
                slot,
                width,
                height,
            } => {
                let actual = grid.extent(*slot);
                let passed = actual == Vec2::new(*width, *height);

                VerificationResult {
                    passed,
                    message: format!(
                        "Exact extent of {}: expected {}x{}, got {}x{}",
                        slot, width, height, actual.x, actual.y
                    ),
                    actual_value: Some(format!("{:?}", actual)),
                }
            }

            VerificationCondition::AllExtents {
                width,
                height,
                tolerance,
            } => {
                let expected = Vec2::new(*width, *height);
                let worst = grid
                    .extents()
                    .iter()
                    .map(|e| e.distance(expected))
                    .fold(0.0f32, f32::max);
                let passed = worst <= *tolerance;

                VerificationResult {
                    passed,
                    message: format!(
                        "All extents: expected {}x{} ±{}, worst distance {:.3}",
                        width, height, tolerance, worst
                    ),
                    actual_value: Some(format!("{:?}", grid.extents())),
                }
            }

            VerificationCondition::NonNegative => {
                let extents = grid.extents();
                let passed = extents.iter().all(|e| e.x >= 0.0 && e.y >= 0.0);

                VerificationResult {
                    passed,
                    message: format!("Extents non-negative: {}", passed),
                    actual_value: Some(format!("{:?}", extents)),
                }
            }

            VerificationCondition::Tiling { tolerance } => {
                let e = grid.extents();
                let c = grid.layout_container_size();
                let sums = [
                    e[0].x + e[1].x,
                    e[2].x + e[3].x,
                    e[0].y + e[2].y,
                    e[1].y + e[3].y,
                ];
                let worst = sums.iter().map(|s| (s - c).abs()).fold(0.0f32, f32::max);
                let passed = worst <= *tolerance;

                VerificationResult {
                    passed,
                    message: format!(
                        "Tiling of container {}: row/column sums {:?}, worst error {:.4}",
                        c, sums, worst
                    ),
                    actual_value: Some(format!("{:?}", sums)),
                }
            }

            VerificationCondition::Animating { expected } => {
                let actual = grid.is_animating();

                VerificationResult {
                    passed: actual == *expected,
                    message: format!("Animating: expected {}, got {}", expected, actual),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::Layout { expected } => {
                let actual = grid.layout();

                VerificationResult {
                    passed: actual == *expected,
                    message: format!("Layout: expected {}, got {}", expected, actual),
                    actual_value: Some(actual.to_string()),
                }
            }

            VerificationCondition::PanelSize {
                slot,
                width,
                height,
                tolerance,
            } => {
                let panel = panels.panel(*slot);
                let dist = panel.size.distance(Vec2::new(*width, *height));
                let passed = panel.updates > 0 && dist <= *tolerance;

                VerificationResult {
                    passed,
                    message: format!(
                        "Panel {}: expected {}x{} ±{}, got {:.3}x{:.3} after {} updates",
                        slot, width, height, tolerance, panel.size.x, panel.size.y, panel.updates
                    ),
                    actual_value: Some(format!("{:?}", panel.size)),
                }
            }

            VerificationCondition::All { conditions } => {
                let results: Vec<_> = conditions
                    .iter()
                    .map(|c| c.evaluate(grid, panels))
                    .collect();
                let passed = results.iter().all(|r| r.passed);
                let failed: Vec<_> = results
                    .iter()
                    .filter(|r| !r.passed)
                    .map(|r| r.message.as_str())
                    .collect();

                VerificationResult {
                    passed,
                    message: if passed {
                        format!("All {} conditions passed", results.len())
                    } else {
                        format!("All: {} failed [{}]", failed.len(), failed.join("; "))
                    },
                    actual_value: None,
                }
            }

            VerificationCondition::Any { conditions } => {
                let results: Vec<_> = conditions
                    .iter()
                    .map(|c| c.evaluate(grid, panels))
                    .collect();
                let passed = results.iter().any(|r| r.passed);

                VerificationResult {
                    passed,
                    message: format!(
                        "Any: {} of {} conditions passed",
                        results.iter().filter(|r| r.passed).count(),
                        results.len()
                    ),
                    actual_value: None,
                }
            }

            VerificationCondition::Not { condition } => {
                let inner = condition.evaluate(grid, panels);

                VerificationResult {
                    passed: !inner.passed,
                    message: format!("Not ({})", inner.message),
                    actual_value: inner.actual_value,
                }
            }
        }
    }
}
