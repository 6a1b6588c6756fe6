use shared::PlacementId;

/// Single-selection scalar.
///
/// Holds at most one id. The id is not checked against the placement list:
/// an id that matches nothing simply highlights nothing.
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
    selected: Option<PlacementId>,
    /// Version counter for selection changes (for cache invalidation)
    version: u64,
}

impl SelectionState {
    /// Currently selected id, if any
    pub fn id(&self) -> Option<&PlacementId> {
        self.selected.as_ref()
    }

    /// Check if an id is the selected one
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Replace the selection (`None` clears it)
    pub fn select(&mut self, id: Option<PlacementId>) {
        if self.selected != id {
            self.selected = id;
            self.version += 1;
        }
    }

    /// Clear selection
    pub fn clear(&mut self) {
        self.select(None);
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
