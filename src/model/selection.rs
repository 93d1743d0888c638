//! Selection collaborator

use super::types::ShapeId;

/// Marks shapes as selected in the host application
pub trait Selection {
    /// Replace the current selection with `id`
    fn select(&mut self, id: &ShapeId);
}

/// Selection kept in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionSet {
    selected: Vec<ShapeId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected shapes
    pub fn get(&self) -> &[ShapeId] {
        &self.selected
    }

    pub fn is_selected(&self, id: &ShapeId) -> bool {
        self.selected.contains(id)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }
}

impl Selection for SelectionSet {
    fn select(&mut self, id: &ShapeId) {
        self.selected.clear();
        self.selected.push(id.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_replaces() {
        let mut selection = SelectionSet::new();
        selection.select(&"a".into());
        selection.select(&"b".into());
        assert_eq!(selection.get(), &[ShapeId::new("b")]);
        assert!(!selection.is_selected(&"a".into()));
    }
}
