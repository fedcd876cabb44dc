//! Headless stand-in for the four rendered panels.

use glam::Vec2;
use quadgrid_core::grid::{ExtentSink, Slot};

/// One panel's last received size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    pub slot: Slot,
    pub size: Vec2,
    /// Number of sizes pushed into this panel
    pub updates: usize,
}

/// The four panels of the grid, fed by `GridTweenController::push_to`.
#[derive(Debug, Clone)]
pub struct PanelSet {
    panels: [Panel; 4],
}

impl Default for PanelSet {
    fn default() -> Self {
        Self {
            panels: Slot::ALL.map(|slot| Panel {
                slot,
                size: Vec2::ZERO,
                updates: 0,
            }),
        }
    }
}

impl PanelSet {
    pub fn panel(&self, slot: Slot) -> &Panel {
        &self.panels[slot.index()]
    }

    pub fn panels(&self) -> &[Panel; 4] {
        &self.panels
    }

    /// One-line summary like `top_left=90.0x90.0 top_right=10.0x90.0 ...`.
    pub fn summary(&self) -> String {
        self.panels
            .iter()
            .map(|p| format!("{}={:.1}x{:.1}", p.slot, p.size.x, p.size.y))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ExtentSink for PanelSet {
    fn apply_extent(&mut self, slot: Slot, extent: Vec2) {
        let panel = &mut self.panels[slot.index()];
        panel.size = extent;
        panel.updates += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadgrid_core::grid::{GridConfig, GridTweenController};

    #[test]
    fn test_receives_controller_extents() {
        let mut grid = GridTweenController::new(100.0, GridConfig::duration_based(0.0)).unwrap();
        let mut panels = PanelSet::default();

        grid.expand(Slot::TopRight);
        grid.tick(0.0);
        grid.push_to(&mut panels);

        assert_eq!(panels.panel(Slot::TopRight).size, Vec2::new(90.0, 90.0));
        assert_eq!(panels.panel(Slot::BottomLeft).size, Vec2::new(10.0, 10.0));
        assert!(panels.panels().iter().all(|p| p.updates == 1));
        assert!(panels.summary().starts_with("top_left=10.0x90.0"));
    }
}
