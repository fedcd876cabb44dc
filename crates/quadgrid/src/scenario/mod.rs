//! Headless scenario scripting for the grid animator
//!
//! Scenarios are RON files listing actions (commands, key presses, ticks) and the
//! checks to run once they finish.

mod actions;
mod definition;
mod executor;
mod results;
mod verification;

pub use actions::ScenarioAction;
pub use definition::ScenarioDefinition;
pub use executor::{ScenarioExecutor, ScenarioExecutorConfig};
pub use results::{ExecutionReport, PerformanceMetrics};
pub use verification::{VerificationCondition, VerificationResult};
