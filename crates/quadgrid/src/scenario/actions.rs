//! Actions a scenario can perform against the grid

use quadgrid_core::grid::{Layout, Slot};
use serde::{Deserialize, Serialize};

/// One step of a scenario script
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ScenarioAction {
    // === COMMANDS ===
    /// Start a transition to the layout with `slot` expanded
    Expand { slot: Slot },

    /// Start a transition back to the equal layout
    Reset,

    /// Feed a key through the input map
    PressKey { key: char },

    /// Jump to a layout without animating
    ApplyImmediate { layout: Layout },

    /// Change the container size used by the next transition
    SetContainerSize { size: f32 },

    // === TIME ===
    /// Advance one tick
    Tick { dt: f32 },

    /// Advance `frames` ticks of `dt` seconds each
    TickFrames { frames: usize, dt: f32 },

    /// Tick until the transition finishes; fails after `max_frames`
    RunUntilIdle {
        dt: f32,
        #[serde(default = "default_max_frames")]
        max_frames: usize,
    },

    // === MISC ===
    /// Write a message to the execution log
    Log { message: String },
}

fn default_max_frames() -> usize {
    10_000
}
