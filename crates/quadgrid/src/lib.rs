//! # quadgrid
//!
//! Headless driver for the quadgrid demos: layered configuration, key bindings,
//! a recording render target and RON-scripted scenarios.

pub mod config;
pub mod input;
pub mod panels;
pub mod scenario;

pub use quadgrid_core::animation;
pub use quadgrid_core::grid;
pub use quadgrid_core::motion;
pub use quadgrid_core::text;
