//! Tweened values with two ways of advancing them.
//!
//! A value can either run a timed animation (`animate_to` + `update`) that snaps
//! onto its target when the duration elapses, or be pulled toward its target by a
//! fraction of the remaining distance each step (`retarget` + `approach`).

use glam::Vec2;
use keyframe::{ease, functions};
use serde::{Deserialize, Serialize};

/// Easing curve applied to the normalized time of a timed animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EaseType {
    /// Constant speed interpolation
    #[default]
    Linear,
    /// Slow start, fast end
    EaseIn,
    /// Fast start, slow end
    EaseOut,
    /// Slow start and end, fast middle
    EaseInOut,
    /// Quadratic ease out
    QuadOut,
    /// Cubic ease out
    CubicOut,
}

impl EaseType {
    /// Apply the curve to a normalized time value. Input is clamped to `[0, 1]`.
    pub fn apply(&self, t: f32) -> f32 {
        let t = (t as f64).clamp(0.0, 1.0);
        let result = match self {
            EaseType::Linear => ease(functions::Linear, 0.0, 1.0, t),
            EaseType::EaseIn => ease(functions::EaseIn, 0.0, 1.0, t),
            EaseType::EaseOut => ease(functions::EaseOut, 0.0, 1.0, t),
            EaseType::EaseInOut => ease(functions::EaseInOut, 0.0, 1.0, t),
            EaseType::QuadOut => ease(functions::EaseOutQuad, 0.0, 1.0, t),
            EaseType::CubicOut => ease(functions::EaseOutCubic, 0.0, 1.0, t),
        };
        result as f32
    }
}

impl std::str::FromStr for EaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "linear" => Ok(EaseType::Linear),
            "ease_in" | "easein" => Ok(EaseType::EaseIn),
            "ease_out" | "easeout" => Ok(EaseType::EaseOut),
            "ease_in_out" | "easeinout" => Ok(EaseType::EaseInOut),
            "quad_out" | "quadout" => Ok(EaseType::QuadOut),
            "cubic_out" | "cubicout" => Ok(EaseType::CubicOut),
            other => Err(format!("unknown easing '{}'", other)),
        }
    }
}

/// Trait for types that can be interpolated (tweened).
pub trait Tweenable: Copy {
    /// Linear interpolation between two values.
    /// `t` should be 0.0 to 1.0, where 0.0 returns `a` and 1.0 returns `b`.
    fn lerp(a: Self, b: Self, t: f32) -> Self;

    /// Euclidean distance between two values.
    fn distance(a: Self, b: Self) -> f32;
}

impl Tweenable for f32 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a + (b - a) * t
    }

    fn distance(a: Self, b: Self) -> f32 {
        (b - a).abs()
    }
}

impl Tweenable for Vec2 {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        a.lerp(b, t)
    }

    fn distance(a: Self, b: Self) -> f32 {
        a.distance(b)
    }
}

impl Tweenable for [f32; 2] {
    fn lerp(a: Self, b: Self, t: f32) -> Self {
        [f32::lerp(a[0], b[0], t), f32::lerp(a[1], b[1], t)]
    }

    fn distance(a: Self, b: Self) -> f32 {
        Vec2::from(a).distance(Vec2::from(b))
    }
}

/// A value that moves toward a target over successive updates.
#[derive(Debug, Clone)]
pub struct AnimatedValue<T: Tweenable> {
    /// Current interpolated value
    current: T,
    /// Value at the moment the current animation started
    start: T,
    /// Target value to animate toward
    target: T,
    /// Elapsed time in current timed animation (seconds)
    elapsed: f32,
    /// Total duration of current timed animation (seconds)
    duration: f32,
    /// Easing function to apply
    easing: EaseType,
}

impl<T: Tweenable> AnimatedValue<T> {
    /// Create a new animated value resting at `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            current: initial,
            start: initial,
            target: initial,
            elapsed: 0.0,
            duration: 0.0,
            easing: EaseType::Linear,
        }
    }

    /// Start a timed animation toward `target`, starting from the current value.
    ///
    /// # Arguments
    /// * `target` - The value to animate toward
    /// * `duration` - How long the animation should take (seconds)
    /// * `easing` - The easing function to use
    pub fn animate_to(&mut self, target: T, duration: f32, easing: EaseType) {
        self.start = self.current;
        self.target = target;
        self.elapsed = 0.0;
        self.duration = duration.max(0.0);
        self.easing = easing;
    }

    /// Point the value at a new target without timing information.
    ///
    /// The current value becomes the new start, so a later `approach` continues
    /// from wherever the value is right now.
    pub fn retarget(&mut self, target: T) {
        self.start = self.current;
        self.target = target;
        self.elapsed = 0.0;
        self.duration = 0.0;
    }

    /// Move the current value `factor` of the remaining way toward the target.
    ///
    /// `factor` is clamped to `[0, 1]`, so the value never passes its target.
    pub fn approach(&mut self, factor: f32) {
        let factor = if factor.is_nan() {
            0.0
        } else {
            factor.clamp(0.0, 1.0)
        };
        self.current = T::lerp(self.current, self.target, factor);
    }

    /// Set the value immediately without animation.
    pub fn set_immediate(&mut self, value: T) {
        self.current = value;
        self.start = value;
        self.target = value;
        self.elapsed = 0.0;
        self.duration = 0.0;
    }

    /// Advance a timed animation by `dt` seconds.
    ///
    /// Returns `true` if the animation is still in progress, `false` once the value
    /// sits exactly on its target.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.duration <= 0.0 {
            self.current = self.target;
            return false;
        }

        self.elapsed += dt.max(0.0);

        if self.elapsed >= self.duration {
            self.current = self.target;
            self.elapsed = self.duration;
            return false;
        }

        let t = self.elapsed / self.duration;
        let eased_t = self.easing.apply(t);
        self.current = T::lerp(self.start, self.target, eased_t);
        true
    }

    /// Get the current interpolated value.
    pub fn value(&self) -> T {
        self.current
    }

    /// Get the target value.
    pub fn target(&self) -> T {
        self.target
    }

    /// Get the value the current animation started from.
    pub fn start(&self) -> T {
        self.start
    }

    /// Distance between the current value and the target.
    pub fn distance_to_target(&self) -> f32 {
        T::distance(self.current, self.target)
    }

    /// Check if a timed animation is currently in progress.
    pub fn is_animating(&self) -> bool {
        self.elapsed < self.duration && self.duration > 0.0
    }

    /// Get remaining animation time in seconds.
    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    /// Normalized progress of the timed animation (1.0 when idle).
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animated_value_linear() {
        let mut val = AnimatedValue::new(0.0f32);
        val.animate_to(100.0, 1.0, EaseType::Linear);

        // At t=0, should be at start
        assert!((val.value() - 0.0).abs() < 0.01);

        val.update(0.5);
        assert!((val.value() - 50.0).abs() < 1.0);

        val.update(0.5);
        assert_eq!(val.value(), 100.0);
        assert!(!val.is_animating());
    }

    #[test]
    fn test_animated_value_immediate() {
        let mut val = AnimatedValue::new(0.0f32);
        val.set_immediate(50.0);
        assert!((val.value() - 50.0).abs() < 0.01);
        assert!(!val.is_animating());
    }

    #[test]
    fn test_animated_value_vec2() {
        let mut val = AnimatedValue::new(Vec2::ZERO);
        val.animate_to(Vec2::new(100.0, 200.0), 1.0, EaseType::Linear);

        val.update(0.5);
        let v = val.value();
        assert!((v.x - 50.0).abs() < 1.0);
        assert!((v.y - 100.0).abs() < 1.0);
    }

    #[test]
    fn test_ease_out_faster_at_start() {
        let mut val_linear = AnimatedValue::new(0.0f32);
        let mut val_ease_out = AnimatedValue::new(0.0f32);

        val_linear.animate_to(100.0, 1.0, EaseType::Linear);
        val_ease_out.animate_to(100.0, 1.0, EaseType::EaseOut);

        val_linear.update(0.25);
        val_ease_out.update(0.25);

        assert!(val_ease_out.value() > val_linear.value());
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut val = AnimatedValue::new(3.0f32);
        val.animate_to(7.0, 0.0, EaseType::Linear);
        assert!(!val.update(0.0));
        assert_eq!(val.value(), 7.0);
    }

    #[test]
    fn test_overshooting_dt_snaps_exactly() {
        let mut val = AnimatedValue::new(Vec2::new(50.0, 50.0));
        val.animate_to(Vec2::new(90.0, 10.0), 0.3, EaseType::QuadOut);
        assert!(val.update(0.1));
        assert!(!val.update(5.0));
        assert_eq!(val.value(), Vec2::new(90.0, 10.0));
        assert_eq!(val.remaining(), 0.0);
        assert_eq!(val.progress(), 1.0);
    }

    #[test]
    fn test_approach_never_overshoots() {
        let mut val = AnimatedValue::new(10.0f32);
        val.retarget(0.0);
        val.approach(3.0);
        assert_eq!(val.value(), 0.0);

        let mut val = AnimatedValue::new(10.0f32);
        val.retarget(0.0);
        val.approach(0.5);
        assert_eq!(val.value(), 5.0);
        assert_eq!(val.distance_to_target(), 5.0);
    }

    #[test]
    fn test_retarget_starts_from_current() {
        let mut val = AnimatedValue::new(Vec2::ZERO);
        val.retarget(Vec2::new(10.0, 0.0));
        val.approach(0.5);
        val.retarget(Vec2::new(0.0, 10.0));
        assert_eq!(val.start(), Vec2::new(5.0, 0.0));
        assert_eq!(val.value(), Vec2::new(5.0, 0.0));
    }

    #[test]
    fn test_ease_type_from_str() {
        assert_eq!("ease-in-out".parse::<EaseType>(), Ok(EaseType::EaseInOut));
        assert_eq!("Linear".parse::<EaseType>(), Ok(EaseType::Linear));
        assert!("bouncy".parse::<EaseType>().is_err());
    }
}
