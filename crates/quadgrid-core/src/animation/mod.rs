//! Animation and tweening primitives.
//!
//! Provides `AnimatedValue<T>` for generic value interpolation, either timed with
//! easing or as a rate-based approach toward a target.

mod tweens;

pub use tweens::{AnimatedValue, EaseType, Tweenable};
