//! Placement store: the list of placed furniture and the selection scalar

use std::sync::Arc;

use shared::{FurnitureItem, PlacedFurniture, PlacementId, PlanePoint};

use super::selection::SelectionState;
use crate::transform::normalize_degrees;

/// Owns every placement in the room plus the single selection.
///
/// Operations on different ids never interact. Unknown ids are no-ops.
#[derive(Debug, Default, Clone)]
pub struct PlacementStore {
    placements: Vec<PlacedFurniture>,
    selection: SelectionState,
    /// Monotonically increasing version counter for cache invalidation
    version: u64,
}

impl PlacementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a catalog entry at a plane position. Does not change the selection.
    pub fn add_placement(
        &mut self,
        item: impl Into<Arc<FurnitureItem>>,
        at: PlanePoint,
    ) -> PlacedFurniture {
        let mut id = uuid::Uuid::new_v4().to_string();
        while self.contains(&id) {
            id = uuid::Uuid::new_v4().to_string();
        }

        let placed = PlacedFurniture {
            id,
            furniture: item.into(),
            x: at.x,
            y: at.y,
            rotation: 0.0,
        };
        tracing::debug!(
            "Placed {} ({}) at ({:.1}, {:.1})",
            placed.furniture.name,
            placed.id,
            at.x,
            at.y
        );

        self.placements.push(placed.clone());
        self.version += 1;
        placed
    }

    /// Remove a placement; returns whether anything was removed
    pub fn remove_placement(&mut self, id: &str) -> bool {
        let Some(pos) = self.placements.iter().position(|p| p.id == id) else {
            return false;
        };
        self.placements.remove(pos);
        if self.selection.is_selected(id) {
            self.selection.clear();
        }
        self.version += 1;
        tracing::debug!("Removed placement {id}");
        true
    }

    /// Replace the position, keeping the rotation. Non-finite positions are rejected.
    pub fn move_placement(&mut self, id: &str, to: PlanePoint) -> bool {
        if !(to.x.is_finite() && to.y.is_finite()) {
            tracing::debug!("Ignoring non-finite move of {id} to ({}, {})", to.x, to.y);
            return false;
        }
        let Some(placed) = self.get_mut(id) else {
            return false;
        };
        placed.x = to.x;
        placed.y = to.y;
        self.version += 1;
        true
    }

    /// Shift the position by a plane-unit delta
    pub fn translate_placement(&mut self, id: &str, dx: f64, dy: f64) -> bool {
        let Some(current) = self.get(id).map(PlacedFurniture::position) else {
            return false;
        };
        self.move_placement(id, current.offset(dx, dy))
    }

    /// `rotation = (rotation + delta) mod 360`, always in `[0, 360)`.
    /// A non-finite delta is rejected.
    pub fn rotate_placement(&mut self, id: &str, delta_degrees: f64) -> bool {
        if !delta_degrees.is_finite() {
            tracing::debug!("Ignoring non-finite rotation of {id} by {delta_degrees}");
            return false;
        }
        let Some(placed) = self.get_mut(id) else {
            return false;
        };
        placed.rotation = normalize_degrees(placed.rotation + delta_degrees);
        tracing::debug!("Rotated placement {id} to {:.1}°", placed.rotation);
        self.version += 1;
        true
    }

    /// Set the selection scalar. An id not in the list matches nothing.
    pub fn select(&mut self, id: Option<&str>) {
        self.selection.select(id.map(str::to_string));
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Drop every placement and the selection
    pub fn reset(&mut self) {
        self.placements.clear();
        self.selection.clear();
        self.version += 1;
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn placements(&self) -> &[PlacedFurniture] {
        &self.placements
    }

    /// Value copy of the list for external consumers
    pub fn snapshot(&self) -> Vec<PlacedFurniture> {
        self.placements.clone()
    }

    pub fn get(&self, id: &str) -> Option<&PlacedFurniture> {
        self.placements.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut PlacedFurniture> {
        self.placements.iter_mut().find(|p| p.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Raw selection scalar (may name a placement that no longer exists)
    pub fn selected_id(&self) -> Option<&PlacementId> {
        self.selection.id()
    }

    /// The selected placement, if the scalar names one that exists
    pub fn selected(&self) -> Option<&PlacedFurniture> {
        self.selection.id().and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Current store version (increments on every placement mutation)
    pub fn version(&self) -> u64 {
        self.version
    }
}
