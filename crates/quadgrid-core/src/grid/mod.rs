//! 2x2 panel grid that animates between an equal layout and one-slot-expanded layouts.

mod config;
mod controller;
mod slot;

pub use config::{GridConfig, TweenPolicy, check_container_size};
pub use controller::{ExtentSink, GridTweenController};
pub use slot::{GridCommand, Layout, Slot, split_sizes};
