//! Catalog-to-canvas drag and drop
//!
//! A catalog entry travels as JSON text, the same way it would cross a
//! platform drag boundary. Dropping turns it back into a placement; anything
//! that does not decode is dropped on the floor without a trace.

use shared::{FurnitureItem, PlacedFurniture, PlanePoint};

use crate::state::catalog::CatalogBrowser;
use crate::state::placement::PlacementStore;

/// Serialized catalog entry in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragPayload(pub String);

impl DragPayload {
    pub fn encode(item: &FurnitureItem) -> Self {
        // A plain struct of strings and numbers always serializes
        Self(serde_json::to_string(item).unwrap_or_default())
    }

    pub fn decode(&self) -> Option<FurnitureItem> {
        serde_json::from_str::<FurnitureItem>(&self.0)
            .ok()
            .filter(FurnitureItem::is_valid)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Drag dimension of the interaction state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragPayload),
}

/// Bridges a sidebar drag source and a canvas drop target
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Package `item` and start dragging. A second `begin` replaces the payload.
    pub fn begin(&mut self, item: &FurnitureItem) -> DragPayload {
        let payload = DragPayload::encode(item);
        tracing::debug!("Drag started: {}", item.name);
        self.state = DragState::Dragging(payload.clone());
        payload
    }

    /// Finish a drag over the plan canvas.
    ///
    /// `pointer` and `canvas_origin` are in the same screen units; their
    /// difference plus `pan` is the plane position. Returns the new placement,
    /// or `None` when the payload does not decode.
    pub fn drop(
        &mut self,
        payload: &DragPayload,
        pointer: PlanePoint,
        canvas_origin: PlanePoint,
        pan: PlanePoint,
        catalog: &CatalogBrowser,
        store: &mut PlacementStore,
    ) -> Option<PlacedFurniture> {
        let at = PlanePoint::new(
            pointer.x - canvas_origin.x + pan.x,
            pointer.y - canvas_origin.y + pan.y,
        );
        self.place(payload, at, catalog, store)
    }

    /// Finish a drag at a plane position already resolved by the caller.
    ///
    /// Items still present in `catalog` are placed through the catalog's
    /// shared entry.
    pub fn place(
        &mut self,
        payload: &DragPayload,
        at: PlanePoint,
        catalog: &CatalogBrowser,
        store: &mut PlacementStore,
    ) -> Option<PlacedFurniture> {
        self.state = DragState::Idle;
        let Some(item) = payload.decode() else {
            tracing::debug!("Ignoring drop with undecodable payload");
            return None;
        };
        if !(at.x.is_finite() && at.y.is_finite()) {
            tracing::debug!("Ignoring drop at non-finite position");
            return None;
        }
        Some(store.add_placement(catalog.shared_item(item), at))
    }

    /// Released outside any drop target
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            tracing::debug!("Drag cancelled");
        }
        self.state = DragState::Idle;
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }
}

/// The two independent interaction dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionState {
    pub dragging: bool,
    pub selected: Option<String>,
}

impl InteractionState {
    pub fn capture(drag: &DragController, store: &PlacementStore) -> Self {
        Self {
            dragging: drag.is_dragging(),
            selected: store.selected().map(|p| p.id.clone()),
        }
    }

    pub fn is_idle(&self) -> bool {
        !self.dragging && self.selected.is_none()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::JsonCatalog;

    fn empty_catalog() -> CatalogBrowser {
        CatalogBrowser::new(Box::new(JsonCatalog::default()))
    }

    fn desk() -> FurnitureItem {
        let mut item = FurnitureItem::new("desk-1", "Desk", 800.0, 400.0);
        item.depth = Some(750.0);
        item
    }

    #[test]
    fn test_drop_places_relative_to_canvas() {
        let mut drag = DragController::new();
        let mut store = PlacementStore::new();
        let payload = drag.begin(&desk());
        assert!(drag.is_dragging());

        let placed = drag
            .drop(
                &payload,
                PlanePoint::new(350.0, 220.0),
                PlanePoint::new(250.0, 120.0),
                PlanePoint::default(),
                &empty_catalog(),
                &mut store,
            )
            .unwrap();

        assert_eq!(placed.position(), PlanePoint::new(100.0, 100.0));
        assert_eq!(placed.rotation, 0.0);
        assert_eq!(*placed.furniture, desk());
        assert_eq!(store.len(), 1);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_drop_adds_pan_offset() {
        let mut drag = DragController::new();
        let mut store = PlacementStore::new();
        let payload = drag.begin(&desk());
        let placed = drag
            .drop(
                &payload,
                PlanePoint::new(10.0, 10.0),
                PlanePoint::default(),
                PlanePoint::new(5.0, -5.0),
                &empty_catalog(),
                &mut store,
            )
            .unwrap();
        assert_eq!(placed.position(), PlanePoint::new(15.0, 5.0));
    }

    #[test]
    fn test_malformed_payload_is_silent_noop() {
        let mut drag = DragController::new();
        let mut store = PlacementStore::new();
        let catalog = empty_catalog();
        for junk in ["", "{", "[1,2,3]", r#"{"id":"x"}"#, r#"{"id":"x","name":"X","width":0,"height":10}"#] {
            let result = drag.drop(
                &DragPayload(junk.to_string()),
                PlanePoint::new(1.0, 1.0),
                PlanePoint::default(),
                PlanePoint::default(),
                &catalog,
                &mut store,
            );
            assert!(result.is_none(), "{junk:?} produced a placement");
        }
        assert!(store.is_empty());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_cancel_leaves_store_alone() {
        let mut drag = DragController::new();
        let mut store = PlacementStore::new();
        drag.begin(&desk());
        drag.cancel();
        assert_eq!(drag.state(), &DragState::Idle);
        assert!(!drag.is_dragging());
        assert!(store.is_empty());
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_place_at_resolved_position() {
        let mut drag = DragController::new();
        let mut store = PlacementStore::new();
        let payload = drag.begin(&desk());
        let placed = drag
            .place(&payload, PlanePoint::new(42.0, 7.5), &empty_catalog(), &mut store)
            .unwrap();
        assert_eq!(placed.position(), PlanePoint::new(42.0, 7.5));
        assert!(!drag.is_dragging());

        let nowhere = PlanePoint::new(f64::NAN, 0.0);
        assert!(drag.place(&payload, nowhere, &empty_catalog(), &mut store).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_drops_of_one_catalog_entry_share_it() {
        let catalog = CatalogBrowser::default();
        let entry = Arc::clone(&catalog.items()[0]);
        let mut drag = DragController::new();
        let mut store = PlacementStore::new();

        for x in [0.0, 50.0] {
            let payload = drag.begin(&entry);
            drag.place(&payload, PlanePoint::new(x, 0.0), &catalog, &mut store)
                .unwrap();
        }
        assert!(store
            .placements()
            .iter()
            .all(|p| Arc::ptr_eq(&p.furniture, &entry)));
    }

    #[test]
    fn test_second_begin_replaces_payload() {
        let mut drag = DragController::new();
        drag.begin(&desk());
        let chair = FurnitureItem::new("chair", "Chair", 450.0, 500.0);
        let payload = drag.begin(&chair);
        assert_eq!(drag.state(), &DragState::Dragging(payload.clone()));
        assert_eq!(payload.decode().unwrap().id, "chair");
    }

    #[test]
    fn test_interaction_dimensions_are_independent() {
        let mut drag = DragController::new();
        let mut store = PlacementStore::new();
        let p = store.add_placement(desk(), PlanePoint::default());
        store.select(Some(&p.id));

        drag.begin(&desk());
        let during = InteractionState::capture(&drag, &store);
        assert!(during.dragging);
        assert_eq!(during.selected.as_deref(), Some(p.id.as_str()));

        drag.cancel();
        let after = InteractionState::capture(&drag, &store);
        assert!(!after.dragging);
        assert_eq!(after.selected, during.selected);

        store.clear_selection();
        assert!(InteractionState::capture(&drag, &store).is_idle());
    }
}
