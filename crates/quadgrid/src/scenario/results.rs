//! Execution results and reporting

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::verification::VerificationResult;

/// Timing metrics for a scenario execution
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PerformanceMetrics {
    /// Total wall-clock time (milliseconds)
    pub total_duration_ms: f64,

    /// Setup phase duration (milliseconds)
    pub setup_duration_ms: f64,

    /// Main action phase duration (milliseconds)
    pub action_duration_ms: f64,

    /// Verification phase duration (milliseconds)
    pub verification_duration_ms: f64,

    /// Simulated time fed to the grid (seconds)
    pub simulated_seconds: f64,

    /// Average wall-clock time per tick (milliseconds)
    pub avg_tick_time_ms: f64,

    /// Peak wall-clock time for a single tick (milliseconds)
    pub peak_tick_time_ms: f64,
}

impl PerformanceMetrics {
    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Total: {:.1}ms | Simulated: {:.2}s | Avg tick: {:.4}ms | Peak: {:.4}ms",
            self.total_duration_ms,
            self.simulated_seconds,
            self.avg_tick_time_ms,
            self.peak_tick_time_ms
        )
    }
}

/// Report from scenario execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Scenario name
    pub scenario_name: String,

    /// Timestamp (ISO 8601)
    pub timestamp: String,

    /// Overall pass/fail status
    pub passed: bool,

    /// Total ticks executed
    pub frames_executed: usize,

    /// Number of actions executed
    pub actions_executed: usize,

    /// Final extents as `[width, height]` in slot order
    pub final_extents: Vec<[f32; 2]>,

    /// Verification failures (empty if all passed)
    pub verification_failures: Vec<VerificationResult>,

    /// Execution log messages
    pub log: Vec<String>,

    /// Timing metrics
    pub performance: PerformanceMetrics,
}

impl ExecutionReport {
    /// Create new execution report
    pub fn new(scenario_name: String) -> Self {
        Self {
            scenario_name,
            timestamp: chrono::Utc::now().to_rfc3339(),
            passed: false,
            frames_executed: 0,
            actions_executed: 0,
            final_extents: Vec::new(),
            verification_failures: Vec::new(),
            log: Vec::new(),
            performance: PerformanceMetrics::default(),
        }
    }

    /// Check if all verifications passed
    pub fn success(&self) -> bool {
        self.verification_failures.is_empty()
    }

    /// Save report to JSON file
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize execution report to JSON")?;

        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path.as_ref(), json).with_context(|| {
            format!(
                "Failed to write execution report: {}",
                path.as_ref().display()
            )
        })?;

        Ok(())
    }

    /// Load report from JSON file
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read report file: {}", path.as_ref().display()))?;

        let report = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON report: {}", path.as_ref().display()))?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_report_json() {
        let mut report = ExecutionReport::new("Test Scenario".to_string());
        report.passed = true;
        report.frames_executed = 120;
        report.actions_executed = 5;
        report.final_extents = vec![[90.0, 90.0], [10.0, 90.0]];
        report.log.push("Test log message".to_string());

        let json = serde_json::to_string_pretty(&report).unwrap();
        assert!(json.contains("Test Scenario"));
        assert!(json.contains("\"frames_executed\": 120"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("report.json");
        report.save_json(&path).unwrap();

        let loaded = ExecutionReport::from_json(&path).unwrap();
        assert_eq!(loaded.scenario_name, report.scenario_name);
        assert_eq!(loaded.final_extents, report.final_extents);
    }

    #[test]
    fn test_success_check() {
        let mut report = ExecutionReport::new("Test".to_string());
        assert!(report.success(), "Should succeed with no failures");

        report.verification_failures.push(VerificationResult {
            passed: false,
            message: "Test failure".to_string(),
            actual_value: None,
        });
        assert!(!report.success(), "Should fail with verification failures");
    }
}
