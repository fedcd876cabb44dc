//! Key bindings for the grid demo.

use std::collections::HashMap;

use quadgrid_core::grid::{GridCommand, Slot};

/// Maps key characters to grid commands.
#[derive(Debug, Clone)]
pub struct InputMap {
    bindings: HashMap<char, GridCommand>,
}

impl Default for InputMap {
    /// `1`-`4` expand the slots in reading order, `0` and `r` reset.
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind('1', GridCommand::Expand(Slot::TopLeft));
        map.bind('2', GridCommand::Expand(Slot::TopRight));
        map.bind('3', GridCommand::Expand(Slot::BottomLeft));
        map.bind('4', GridCommand::Expand(Slot::BottomRight));
        map.bind('0', GridCommand::Reset);
        map.bind('r', GridCommand::Reset);
        map
    }
}

impl InputMap {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `key` (case-insensitive) to `command`, replacing any previous binding.
    pub fn bind(&mut self, key: char, command: GridCommand) {
        self.bindings.insert(key.to_ascii_lowercase(), command);
    }

    pub fn unbind(&mut self, key: char) -> Option<GridCommand> {
        self.bindings.remove(&key.to_ascii_lowercase())
    }

    pub fn command_for(&self, key: char) -> Option<GridCommand> {
        let command = self.bindings.get(&key.to_ascii_lowercase()).copied();
        if command.is_none() {
            log::debug!("Ignoring unbound key {:?}", key);
        }
        command
    }

    /// Translate a key sequence such as `"1 2 r"` or `"12r"` into commands.
    ///
    /// Whitespace and commas are ignored; unbound keys are dropped.
    pub fn parse_sequence(&self, keys: &str) -> Vec<GridCommand> {
        keys.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .filter_map(|c| self.command_for(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let map = InputMap::default();
        assert_eq!(map.command_for('1'), Some(GridCommand::Expand(Slot::TopLeft)));
        assert_eq!(map.command_for('4'), Some(GridCommand::Expand(Slot::BottomRight)));
        assert_eq!(map.command_for('R'), Some(GridCommand::Reset));
        assert_eq!(map.command_for('x'), None);
    }

    #[test]
    fn test_parse_sequence() {
        let map = InputMap::default();
        let commands = map.parse_sequence("1, 3 x r");
        assert_eq!(
            commands,
            vec![
                GridCommand::Expand(Slot::TopLeft),
                GridCommand::Expand(Slot::BottomLeft),
                GridCommand::Reset,
            ]
        );
    }

    #[test]
    fn test_rebind() {
        let mut map = InputMap::default();
        map.bind('q', GridCommand::Expand(Slot::TopLeft));
        assert_eq!(map.unbind('1'), Some(GridCommand::Expand(Slot::TopLeft)));
        assert_eq!(map.command_for('1'), None);
        assert_eq!(map.command_for('Q'), Some(GridCommand::Expand(Slot::TopLeft)));
    }
}
