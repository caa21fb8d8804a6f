use serde::{Deserialize, Serialize};

/// Most countries that can be compared at once.
pub const MAX_SELECTED: usize = 2;

/// What a call to [`Selection::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    /// The selection was already full; nothing changed.
    Rejected,
}

/// Ordered set of selected country names, capped at [`MAX_SELECTED`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    names: Vec<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` at the end if absent and there is room, remove it if present.
    pub fn toggle(&mut self, name: &str) -> Toggle {
        if let Some(idx) = self.names.iter().position(|n| n == name) {
            self.names.remove(idx);
            return Toggle::Removed;
        }
        if self.names.len() >= MAX_SELECTED {
            return Toggle::Rejected;
        }
        self.names.push(name.to_string());
        Toggle::Added
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The compare action is offered once the selection is full.
    pub fn can_compare(&self) -> bool {
        self.names.len() >= MAX_SELECTED
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}
