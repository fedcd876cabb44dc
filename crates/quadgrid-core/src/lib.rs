//! # quadgrid-core
//!
//! Tick-driven building blocks for small panel demos:
//! - 2x2 grid animator with rate-based or duration-based tweening (`grid`)
//! - Generic tweened values and easing (`animation`)
//! - Bouncing, pulsing circle confined to a rectangle (`motion`)
//! - CSV-backed key to text lookup (`text`)
//!
//! Nothing here owns a loop or a window; callers feed elapsed time and read back state.

pub mod animation;
pub mod error;
pub mod grid;
pub mod motion;
pub mod text;

pub use error::{GridError, TextError};
pub use grid::{ExtentSink, GridCommand, GridConfig, GridTweenController, Layout, Slot, TweenPolicy};
