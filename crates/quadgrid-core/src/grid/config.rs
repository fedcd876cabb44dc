//! Grid animator settings.

use serde::{Deserialize, Serialize};

use crate::animation::EaseType;
use crate::error::{GridError, Result};

/// How a transition advances on each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TweenPolicy {
    /// Each tick every extent moves `dt * speed` of the remaining way to its target.
    /// Frame-rate dependent in feel, never lands exactly on the target.
    RateBased { speed: f32 },
    /// Extents interpolate from their start over a fixed duration, then snap to target.
    DurationBased {
        duration: f32,
        #[serde(default)]
        easing: EaseType,
    },
}

impl Default for TweenPolicy {
    fn default() -> Self {
        TweenPolicy::RateBased { speed: 5.0 }
    }
}

/// Ratios and policy driving a `GridTweenController`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Fraction of the container each slot gets in the equal layout
    pub initial_division_ratio: f32,
    /// Fraction of the container the expanded slot gets
    pub expanded_ratio: f32,
    /// Interpolation policy
    #[serde(default)]
    pub policy: TweenPolicy,
    /// Rate-based transitions finish once every extent is closer than this to its target
    #[serde(default = "default_completion_tolerance")]
    pub completion_tolerance: f32,
}

fn default_completion_tolerance() -> f32 {
    0.5
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            initial_division_ratio: 0.5,
            expanded_ratio: 0.9,
            policy: TweenPolicy::default(),
            completion_tolerance: default_completion_tolerance(),
        }
    }
}

impl GridConfig {
    /// Rate-based config with the given speed.
    pub fn rate_based(speed: f32) -> Self {
        Self {
            policy: TweenPolicy::RateBased { speed },
            ..Self::default()
        }
    }

    /// Linear duration-based config with the given duration in seconds.
    pub fn duration_based(duration: f32) -> Self {
        Self {
            policy: TweenPolicy::DurationBased {
                duration,
                easing: EaseType::Linear,
            },
            ..Self::default()
        }
    }

    pub fn with_ratios(mut self, initial_division_ratio: f32, expanded_ratio: f32) -> Self {
        self.initial_division_ratio = initial_division_ratio;
        self.expanded_ratio = expanded_ratio;
        self
    }

    /// Reject ratios outside (0, 1) and non-positive speeds or tolerances.
    ///
    /// An expanded ratio of 1 or more would give the shrunk slots a negative size.
    pub fn validate(&self) -> Result<()> {
        check_ratio("initial_division_ratio", self.initial_division_ratio)?;
        check_ratio("expanded_ratio", self.expanded_ratio)?;

        match self.policy {
            TweenPolicy::RateBased { speed } => {
                if !speed.is_finite() || speed <= 0.0 {
                    return Err(GridError::InvalidSpeed(speed));
                }
            }
            TweenPolicy::DurationBased { duration, .. } => {
                if !duration.is_finite() || duration < 0.0 {
                    return Err(GridError::InvalidDuration(duration));
                }
            }
        }

        if !self.completion_tolerance.is_finite() || self.completion_tolerance <= 0.0 {
            return Err(GridError::InvalidTolerance(self.completion_tolerance));
        }

        Ok(())
    }
}

fn check_ratio(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(GridError::InvalidRatio { name, value })
    }
}

/// Validate a container side length.
pub fn check_container_size(size: f32) -> Result<()> {
    if size.is_finite() && size >= 0.0 {
        Ok(())
    } else {
        Err(GridError::InvalidContainerSize(size))
    }
}
