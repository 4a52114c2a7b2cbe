use crate::element::ElementId;

/// The objects currently selected on a surface, in the order they were selected.
///
/// A single selected object and a multi-selection are the same thing here: the
/// "active object" is simply a selection with exactly one member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// The only selected object, if exactly one is selected
    pub fn single(&self) -> Option<ElementId> {
        match self.ids.as_slice() {
            [id] => Some(*id),
            _ => None,
        }
    }

    /// Replace the selection with one object
    pub fn select(&mut self, id: ElementId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Add the object if it is not selected, remove it otherwise
    pub fn toggle(&mut self, id: ElementId) {
        if let Some(index) = self.ids.iter().position(|selected| *selected == id) {
            self.ids.remove(index);
        } else {
            self.ids.push(id);
        }
    }

    /// Replace the selection with the given objects
    pub fn replace(&mut self, ids: impl IntoIterator<Item = ElementId>) {
        self.ids.clear();
        for id in ids {
            if !self.ids.contains(&id) {
                self.ids.push(id);
            }
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_only_for_one_member() {
        let (a, b) = (ElementId::new(), ElementId::new());
        let mut selection = Selection::new();
        assert_eq!(selection.single(), None);

        selection.select(a);
        assert_eq!(selection.single(), Some(a));

        selection.toggle(b);
        assert_eq!(selection.single(), None);
        assert_eq!(selection.ids(), &[a, b]);
    }

    #[test]
    fn test_toggle_removes_selected() {
        let a = ElementId::new();
        let mut selection = Selection::new();
        selection.toggle(a);
        selection.toggle(a);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_replace_deduplicates() {
        let (a, b) = (ElementId::new(), ElementId::new());
        let mut selection = Selection::new();
        selection.select(a);
        selection.replace([b, b, a]);
        assert_eq!(selection.ids(), &[b, a]);
        assert_eq!(selection.len(), 2);
    }
}
