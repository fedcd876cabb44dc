//! Slots of the 2x2 grid and the layouts they can be arranged in.

use std::fmt;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// One cell of the 2x2 grid.
///
/// Slots in the same row share a height, slots in the same column share a width:
///
/// ```text
/// TopLeft     TopRight
/// BottomLeft  BottomRight
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Slot {
    /// All slots in storage order.
    pub const ALL: [Slot; 4] = [
        Slot::TopLeft,
        Slot::TopRight,
        Slot::BottomLeft,
        Slot::BottomRight,
    ];

    /// Index into per-slot arrays.
    pub fn index(self) -> usize {
        match self {
            Slot::TopLeft => 0,
            Slot::TopRight => 1,
            Slot::BottomLeft => 2,
            Slot::BottomRight => 3,
        }
    }

    /// 0 for the top row, 1 for the bottom row.
    pub fn row(self) -> usize {
        self.index() / 2
    }

    /// 0 for the left column, 1 for the right column.
    pub fn column(self) -> usize {
        self.index() % 2
    }

    pub fn name(self) -> &'static str {
        match self {
            Slot::TopLeft => "top_left",
            Slot::TopRight => "top_right",
            Slot::BottomLeft => "bottom_left",
            Slot::BottomRight => "bottom_right",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Slot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "topleft" | "tl" => Ok(Slot::TopLeft),
            "topright" | "tr" => Ok(Slot::TopRight),
            "bottomleft" | "bl" => Ok(Slot::BottomLeft),
            "bottomright" | "br" => Ok(Slot::BottomRight),
            _ => Err(format!("unknown slot '{}'", s)),
        }
    }
}

/// Arrangement of the four slots inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Layout {
    /// Every slot gets `container * initial_division_ratio` on both axes.
    #[default]
    Equal,
    /// The given slot takes `container * expanded_ratio` on both axes, the rest shrink.
    Expanded(Slot),
}

impl Layout {
    /// Compute the extent of every slot for this layout.
    ///
    /// For an expanded layout a slot gets the expanded width when it shares the
    /// expanded slot's column and the expanded height when it shares its row; the
    /// other axis gets `container - expanded`.
    pub fn targets(
        &self,
        container_size: f32,
        initial_division_ratio: f32,
        expanded_ratio: f32,
    ) -> [Vec2; 4] {
        match *self {
            Layout::Equal => {
                let side = container_size * initial_division_ratio;
                [Vec2::splat(side); 4]
            }
            Layout::Expanded(expanded_slot) => {
                let (expanded, shrunk) = split_sizes(container_size, expanded_ratio);
                Slot::ALL.map(|slot| {
                    let width = if slot.column() == expanded_slot.column() {
                        expanded
                    } else {
                        shrunk
                    };
                    let height = if slot.row() == expanded_slot.row() {
                        expanded
                    } else {
                        shrunk
                    };
                    Vec2::new(width, height)
                })
            }
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Equal => f.write_str("equal"),
            Layout::Expanded(slot) => write!(f, "expanded({})", slot),
        }
    }
}

/// Split the container side into the expanded size and its complement.
///
/// The larger share is the rounded product and the smaller one is subtracted from
/// the container, so the two always add back up to `container_size` exactly.
pub fn split_sizes(container_size: f32, expanded_ratio: f32) -> (f32, f32) {
    if expanded_ratio >= 0.5 {
        let expanded = container_size * expanded_ratio;
        (expanded, container_size - expanded)
    } else {
        let shrunk = container_size * (1.0 - expanded_ratio);
        (container_size - shrunk, shrunk)
    }
}

/// A discrete request coming from the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridCommand {
    Expand(Slot),
    Reset,
}

impl GridCommand {
    /// Layout this command transitions to.
    pub fn layout(self) -> Layout {
        match self {
            GridCommand::Expand(slot) => Layout::Expanded(slot),
            GridCommand::Reset => Layout::Equal,
        }
    }
}
