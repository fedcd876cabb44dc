//! The 2x2 grid animator.

use glam::Vec2;

use super::config::{GridConfig, TweenPolicy, check_container_size};
use super::slot::{GridCommand, Layout, Slot};
use crate::animation::AnimatedValue;
use crate::error::Result;

/// Receiver of the current extents after each tick (panels, widgets, test doubles).
pub trait ExtentSink {
    fn apply_extent(&mut self, slot: Slot, extent: Vec2);
}

/// Animates four slot extents so they tile a square container in a 2x2 pattern.
///
/// The controller never drives itself: the owner calls [`tick`](Self::tick) once per
/// frame with the elapsed time. Starting a transition while another one is running
/// replaces it, continuing from the extents as they are at that moment.
#[derive(Debug, Clone)]
pub struct GridTweenController {
    config: GridConfig,
    /// Side length sampled when the next transition is computed
    container_size: f32,
    /// Side length the current targets were computed from
    layout_container_size: f32,
    slots: [AnimatedValue<Vec2>; 4],
    layout: Layout,
    animating: bool,
}

impl GridTweenController {
    /// Create a controller with every slot at the equal-division size, no animation.
    pub fn new(container_size: f32, config: GridConfig) -> Result<Self> {
        config.validate()?;
        check_container_size(container_size)?;

        let initial = Layout::Equal.targets(
            container_size,
            config.initial_division_ratio,
            config.expanded_ratio,
        );

        log::debug!(
            "Grid controller initialized: container={} policy={:?}",
            container_size,
            config.policy
        );

        Ok(Self {
            config,
            container_size,
            layout_container_size: container_size,
            slots: initial.map(AnimatedValue::new),
            layout: Layout::Equal,
            animating: false,
        })
    }

    /// Transition back to the equal-division layout.
    pub fn reset(&mut self) {
        self.begin_transition(Layout::Equal);
    }

    /// Transition to the layout where `slot` is expanded.
    pub fn expand(&mut self, slot: Slot) {
        self.begin_transition(Layout::Expanded(slot));
    }

    /// Dispatch a command from the input layer.
    pub fn apply(&mut self, command: GridCommand) {
        self.begin_transition(command.layout());
    }

    /// Jump straight to `layout` without animating, cancelling any transition.
    pub fn apply_immediate(&mut self, layout: Layout) {
        let targets = self.compute_targets(layout);
        for (value, target) in self.slots.iter_mut().zip(targets) {
            value.set_immediate(target);
        }
        self.layout = layout;
        self.layout_container_size = self.container_size;
        self.animating = false;
    }

    /// Change the container side length used by the next `reset`/`expand`.
    ///
    /// An in-flight transition keeps the targets it was started with.
    pub fn set_container_size(&mut self, size: f32) -> Result<()> {
        check_container_size(size)?;
        self.container_size = size;
        Ok(())
    }

    /// Advance the in-flight transition by `dt` seconds.
    ///
    /// Returns `true` while a transition is still running afterwards. Does nothing
    /// when idle.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.animating {
            return false;
        }

        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.animating = match self.config.policy {
            TweenPolicy::RateBased { speed } => {
                let factor = dt * speed;
                for value in &mut self.slots {
                    value.approach(factor);
                }
                let tolerance = self.config.completion_tolerance;
                !self
                    .slots
                    .iter()
                    .all(|value| value.distance_to_target() < tolerance)
            }
            TweenPolicy::DurationBased { .. } => {
                let mut running = false;
                for value in &mut self.slots {
                    running |= value.update(dt);
                }
                running
            }
        };

        log::trace!("Grid tick dt={:.4} extents={:?}", dt, self.extents());

        if !self.animating {
            log::debug!("Grid transition to {} finished", self.layout);
        }

        self.animating
    }

    /// Push every current extent into `sink`.
    pub fn push_to(&self, sink: &mut impl ExtentSink) {
        for slot in Slot::ALL {
            sink.apply_extent(slot, self.extent(slot));
        }
    }

    /// Current extent of `slot`, never negative.
    pub fn extent(&self, slot: Slot) -> Vec2 {
        self.slots[slot.index()].value().max(Vec2::ZERO)
    }

    /// Current extents in `Slot::ALL` order.
    pub fn extents(&self) -> [Vec2; 4] {
        Slot::ALL.map(|slot| self.extent(slot))
    }

    /// Target extent of `slot` for the current (or last) transition.
    pub fn target(&self, slot: Slot) -> Vec2 {
        self.slots[slot.index()].target()
    }

    pub fn targets(&self) -> [Vec2; 4] {
        Slot::ALL.map(|slot| self.target(slot))
    }

    /// Layout the controller is at or heading toward.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn container_size(&self) -> f32 {
        self.container_size
    }

    /// Container size the current (or last) transition was computed for.
    ///
    /// Differs from [`container_size`](Self::container_size) after a resize until
    /// the next `reset`/`expand`.
    pub fn layout_container_size(&self) -> f32 {
        self.layout_container_size
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    fn compute_targets(&self, layout: Layout) -> [Vec2; 4] {
        layout.targets(
            self.container_size,
            self.config.initial_division_ratio,
            self.config.expanded_ratio,
        )
    }

    fn begin_transition(&mut self, layout: Layout) {
        let targets = self.compute_targets(layout);

        if self.animating {
            log::debug!("Redirecting transition {} -> {}", self.layout, layout);
        } else {
            log::debug!("Starting transition {} -> {}", self.layout, layout);
        }

        for (value, target) in self.slots.iter_mut().zip(targets) {
            match self.config.policy {
                TweenPolicy::RateBased { .. } => value.retarget(target),
                TweenPolicy::DurationBased { duration, easing } => {
                    value.animate_to(target, duration, easing)
                }
            }
        }

        self.layout = layout;
        self.layout_container_size = self.container_size;
        self.animating = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_idle(grid: &mut GridTweenController, dt: f32) -> usize {
        let mut frames = 0;
        while grid.tick(dt) {
            frames += 1;
            assert!(frames < 10_000, "transition never finished");
        }
        frames + 1
    }

    #[test]
    fn test_initial_state_is_equal_division() {
        let grid = GridTweenController::new(100.0, GridConfig::default()).unwrap();
        assert!(!grid.is_animating());
        assert_eq!(grid.layout(), Layout::Equal);
        for slot in Slot::ALL {
            assert_eq!(grid.extent(slot), Vec2::new(50.0, 50.0));
        }
    }

    #[test]
    fn test_tick_when_idle_is_noop() {
        let mut grid = GridTweenController::new(100.0, GridConfig::default()).unwrap();
        assert!(!grid.tick(0.016));
        assert_eq!(grid.extents(), [Vec2::splat(50.0); 4]);
    }

    #[test]
    fn test_new_rejects_invalid_input() {
        assert!(GridTweenController::new(-5.0, GridConfig::default()).is_err());
        let config = GridConfig::default().with_ratios(0.5, 1.2);
        assert!(GridTweenController::new(100.0, config).is_err());
    }

    #[test]
    fn test_rate_based_converges_within_tolerance() {
        let mut grid = GridTweenController::new(100.0, GridConfig::rate_based(5.0)).unwrap();
        grid.expand(Slot::TopLeft);
        assert!(grid.is_animating());

        run_until_idle(&mut grid, 1.0 / 60.0);

        for slot in Slot::ALL {
            assert!(grid.extent(slot).distance(grid.target(slot)) < 0.5);
        }
    }

    #[test]
    fn test_rate_based_large_dt_does_not_overshoot() {
        let mut grid = GridTweenController::new(100.0, GridConfig::rate_based(5.0)).unwrap();
        grid.expand(Slot::BottomRight);
        assert!(!grid.tick(10.0));
        assert_eq!(grid.extents(), grid.targets());
    }

    #[test]
    fn test_duration_based_snaps_to_target() {
        let mut grid = GridTweenController::new(100.0, GridConfig::duration_based(0.5)).unwrap();
        grid.expand(Slot::TopRight);

        assert!(grid.tick(0.25));
        let halfway = grid.extent(Slot::TopRight);
        assert_eq!(halfway, Vec2::new(70.0, 70.0));

        assert!(!grid.tick(0.25));
        assert_eq!(grid.extents(), grid.targets());
        assert_eq!(grid.extent(Slot::TopRight), Vec2::new(90.0, 90.0));
    }

    #[test]
    fn test_duration_redirect_restarts_from_current() {
        let mut grid = GridTweenController::new(100.0, GridConfig::duration_based(1.0)).unwrap();
        grid.expand(Slot::TopLeft);
        grid.tick(0.5);
        let mid = grid.extents();

        grid.expand(Slot::BottomRight);
        // Zero-length tick leaves everything at the redirect point
        grid.tick(0.0);
        assert_eq!(grid.extents(), mid);

        // Still needs the full duration from the redirect
        assert!(grid.tick(0.75));
        assert!(!grid.tick(0.25));
        assert_eq!(grid.extent(Slot::BottomRight), Vec2::new(90.0, 90.0));
    }

    #[test]
    fn test_container_resize_applies_to_next_transition() {
        let mut grid = GridTweenController::new(100.0, GridConfig::duration_based(1.0)).unwrap();
        grid.expand(Slot::TopLeft);
        grid.set_container_size(200.0).unwrap();
        assert_eq!(grid.target(Slot::TopLeft), Vec2::new(90.0, 90.0));
        assert_eq!(grid.layout_container_size(), 100.0);

        grid.tick(1.0);
        grid.reset();
        assert_eq!(grid.layout_container_size(), 200.0);
        grid.tick(1.0);
        assert_eq!(grid.extents(), [Vec2::splat(100.0); 4]);

        assert!(grid.set_container_size(f32::NAN).is_err());
        assert_eq!(grid.container_size(), 200.0);
    }

    #[test]
    fn test_apply_immediate_cancels_transition() {
        let mut grid = GridTweenController::new(100.0, GridConfig::rate_based(2.0)).unwrap();
        grid.expand(Slot::TopLeft);
        grid.tick(0.1);
        grid.apply_immediate(Layout::Expanded(Slot::BottomLeft));
        assert!(!grid.is_animating());
        assert_eq!(grid.extent(Slot::BottomLeft), Vec2::new(90.0, 90.0));
        assert_eq!(grid.extent(Slot::TopRight), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_negative_dt_is_ignored() {
        let mut grid = GridTweenController::new(100.0, GridConfig::duration_based(1.0)).unwrap();
        grid.expand(Slot::TopLeft);
        grid.tick(-3.0);
        assert_eq!(grid.extents(), [Vec2::splat(50.0); 4]);
        assert!(grid.is_animating());
    }

    #[test]
    fn test_push_to_sink() {
        struct Collect(Vec<(Slot, Vec2)>);
        impl ExtentSink for Collect {
            fn apply_extent(&mut self, slot: Slot, extent: Vec2) {
                self.0.push((slot, extent));
            }
        }

        let grid = GridTweenController::new(80.0, GridConfig::default()).unwrap();
        let mut sink = Collect(Vec::new());
        grid.push_to(&mut sink);
        assert_eq!(sink.0.len(), 4);
        assert!(sink.0.iter().all(|(_, e)| *e == Vec2::splat(40.0)));
    }
}
