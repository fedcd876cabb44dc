//! Application configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `quadgrid.ron` file (if exists)
//! 3. Environment variables prefixed with `QUADGRID_`
//!
//! Example environment variable: `QUADGRID_GRID__EXPANDED_RATIO=0.8`

use anyhow::{Context, Result, anyhow};
use config::{Config, Environment, File};
use glam::Vec2;
use quadgrid_core::animation::EaseType;
use quadgrid_core::grid::{GridConfig, TweenPolicy};
use quadgrid_core::motion::{Bounds, BouncingMover, Pulse};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub grid: GridSettings,

    #[serde(default)]
    pub bounce: BounceSettings,

    #[serde(default)]
    pub text: TextSettings,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// Which tweening policy the grid uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Move a fraction of the remaining distance every tick
    #[default]
    Rate,
    /// Fixed-duration interpolation that lands exactly on target
    Duration,
}

/// Grid animator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Side length of the square container
    pub container_size: f32,
    /// Fraction of the container each slot gets in the equal layout
    pub initial_division_ratio: f32,
    /// Fraction of the container the expanded slot gets
    pub expanded_ratio: f32,
    pub policy: PolicyKind,
    /// Rate-based speed (fraction per second)
    pub animation_speed: f32,
    /// Duration-based transition length in seconds
    pub duration: f32,
    /// Duration-based easing curve name
    pub easing: String,
    /// Rate-based completion distance
    pub completion_tolerance: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            container_size: 400.0,
            initial_division_ratio: 0.5,
            expanded_ratio: 0.9,
            policy: PolicyKind::Rate,
            animation_speed: 5.0,
            duration: 0.5,
            easing: "linear".to_string(),
            completion_tolerance: 0.5,
        }
    }
}

impl GridSettings {
    /// Build the core grid config. Range checks happen when the controller is created.
    pub fn to_grid_config(&self) -> Result<GridConfig> {
        let policy = match self.policy {
            PolicyKind::Rate => TweenPolicy::RateBased {
                speed: self.animation_speed,
            },
            PolicyKind::Duration => TweenPolicy::DurationBased {
                duration: self.duration,
                easing: self
                    .easing
                    .parse::<EaseType>()
                    .map_err(|e| anyhow!(e))
                    .context("Invalid grid.easing")?,
            },
        };

        Ok(GridConfig {
            initial_division_ratio: self.initial_division_ratio,
            expanded_ratio: self.expanded_ratio,
            policy,
            completion_tolerance: self.completion_tolerance,
        })
    }
}

/// Bouncing circle demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BounceSettings {
    /// Canvas width
    pub width: f32,
    /// Canvas height
    pub height: f32,
    /// Circle radius before pulsing
    pub radius: f32,
    /// Horizontal speed in units/sec
    pub speed_x: f32,
    /// Vertical speed in units/sec
    pub speed_y: f32,
    /// Relative pulse size (0 disables pulsing)
    pub pulse_amplitude: f32,
    /// Pulses per second
    pub pulse_frequency: f32,
}

impl Default for BounceSettings {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            radius: 25.0,
            speed_x: 240.0,
            speed_y: 180.0,
            pulse_amplitude: 0.2,
            pulse_frequency: 1.0,
        }
    }
}

impl BounceSettings {
    pub fn build_mover(&self) -> BouncingMover {
        let mover = BouncingMover::new(
            Bounds::from_size(self.width, self.height),
            Vec2::new(self.speed_x, self.speed_y),
            self.radius,
        );

        if self.pulse_amplitude > 0.0 {
            mover.with_pulse(Pulse {
                amplitude: self.pulse_amplitude,
                frequency: self.pulse_frequency,
            })
        } else {
            mover
        }
    }
}

/// Text lookup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSettings {
    /// Shown for keys missing from the table
    pub placeholder: String,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            placeholder: quadgrid_core::text::DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

/// Debug/development settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DebugConfig {
    /// Enable verbose logging
    pub verbose_logging: bool,
}

impl AppConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `quadgrid.ron` file (if exists)
    /// 3. Environment variables prefixed with `QUADGRID_` (highest priority)
    pub fn load() -> Result<Self> {
        Self::load_from("quadgrid")
    }

    /// Same as [`load`](Self::load) with a custom config file stem.
    pub fn load_from(file_stem: &str) -> Result<Self> {
        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("grid.container_size", 400.0)?
            .set_default("grid.initial_division_ratio", 0.5)?
            .set_default("grid.expanded_ratio", 0.9)?
            .set_default("grid.policy", "rate")?
            .set_default("grid.animation_speed", 5.0)?
            .set_default("grid.duration", 0.5)?
            .set_default("grid.easing", "linear")?
            .set_default("grid.completion_tolerance", 0.5)?
            .set_default("bounce.width", 800.0)?
            .set_default("bounce.height", 600.0)?
            .set_default("bounce.radius", 25.0)?
            .set_default("bounce.speed_x", 240.0)?
            .set_default("bounce.speed_y", 180.0)?
            .set_default("bounce.pulse_amplitude", 0.2)?
            .set_default("bounce.pulse_frequency", 1.0)?
            .set_default("text.placeholder", quadgrid_core::text::DEFAULT_PLACEHOLDER)?
            .set_default("debug.verbose_logging", false)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name(file_stem)
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (QUADGRID_GRID__EXPANDED_RATIO, etc.)
            .add_source(
                Environment::with_prefix("QUADGRID")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.grid.container_size, 400.0);
        assert_eq!(config.grid.policy, PolicyKind::Rate);
        assert_eq!(config.bounce.radius, 25.0);
        assert_eq!(config.text.placeholder, "MISSING");
        assert!(!config.debug.verbose_logging);
    }

    #[test]
    fn test_load_config_with_defaults() {
        // Should load defaults when no config file exists
        let config = AppConfig::load_from("does-not-exist").expect("Failed to load config");
        assert_eq!(config.grid.expanded_ratio, 0.9);
        assert_eq!(config.grid.easing, "linear");
        assert_eq!(config.bounce.width, 800.0);
    }

    #[test]
    fn test_env_override_single_underscore_prefix() {
        // Only this test sets the variable; no other test reads completion_tolerance
        std::env::set_var("QUADGRID_GRID__COMPLETION_TOLERANCE", "0.25");
        let loaded = AppConfig::load_from("does-not-exist");
        std::env::remove_var("QUADGRID_GRID__COMPLETION_TOLERANCE");

        let config = loaded.expect("Failed to load config");
        assert_eq!(config.grid.completion_tolerance, 0.25);
    }

    #[test]
    fn test_grid_settings_conversion() {
        let settings = GridSettings {
            policy: PolicyKind::Duration,
            duration: 0.25,
            easing: "ease_out".to_string(),
            ..GridSettings::default()
        };
        let grid = settings.to_grid_config().unwrap();
        assert_eq!(
            grid.policy,
            TweenPolicy::DurationBased {
                duration: 0.25,
                easing: EaseType::EaseOut
            }
        );

        let bad = GridSettings {
            policy: PolicyKind::Duration,
            easing: "wobble".to_string(),
            ..GridSettings::default()
        };
        assert!(bad.to_grid_config().is_err());
    }

    #[test]
    fn test_bounce_without_pulse() {
        let settings = BounceSettings {
            pulse_amplitude: 0.0,
            ..BounceSettings::default()
        };
        let mut mover = settings.build_mover();
        mover.tick(0.5);
        assert_eq!(mover.radius(), 25.0);
    }
}
