//! Planner session: everything one room-editing session owns

use std::sync::Arc;

use shared::RoomDimensions;

use crate::config::PlannerConfig;
use crate::drag::DragController;
use crate::state::catalog::CatalogBrowser;
use crate::state::placement::PlacementStore;
use crate::transform::CoordinateTransform;

/// Explicit session object handed to the scene builder and the views.
///
/// The config is immutable for the lifetime of the session; the transform is
/// derived from it once so both views share the same scale.
pub struct PlannerSession {
    pub config: Arc<PlannerConfig>,
    pub transform: CoordinateTransform,
    pub room: RoomDimensions,
    pub store: PlacementStore,
    pub drag: DragController,
    pub catalog: CatalogBrowser,
}

impl Default for PlannerSession {
    fn default() -> Self {
        Self::with_room(
            Arc::new(PlannerConfig::default()),
            RoomDimensions::default(),
            CatalogBrowser::default(),
        )
    }
}

impl PlannerSession {
    pub fn with_room(
        config: Arc<PlannerConfig>,
        room: RoomDimensions,
        catalog: CatalogBrowser,
    ) -> Self {
        let transform = CoordinateTransform::from_config(&config);
        tracing::info!(
            "Session started: room {}×{} mm, scale {}",
            room.width,
            room.height,
            transform.scale()
        );
        Self {
            config,
            transform,
            room,
            store: PlacementStore::new(),
            drag: DragController::new(),
            catalog,
        }
    }

    /// Drop every placement, the selection and any drag in flight
    pub fn reset(&mut self) {
        self.store.reset();
        self.drag.cancel();
        tracing::info!("Layout reset");
    }

    /// Room extents on the plane
    pub fn room_plane_size(&self) -> (f64, f64) {
        self.transform.room_plane_size(&self.room)
    }
}

#[cfg(test)]
mod tests {
    use shared::{FurnitureItem, PlanePoint};

    use super::*;

    #[test]
    fn test_transform_follows_config() {
        let mut config = PlannerConfig::default();
        config.scale = 0.25;
        let session = PlannerSession::with_room(
            Arc::new(config),
            RoomDimensions::new(4000.0, 2000.0),
            CatalogBrowser::default(),
        );
        assert_eq!(session.transform.scale(), 0.25);
        assert_eq!(session.room_plane_size(), (1000.0, 500.0));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = PlannerSession::default();
        let item = FurnitureItem::new("a", "A", 100.0, 100.0);
        let p = session.store.add_placement(item.clone(), PlanePoint::default());
        session.store.select(Some(&p.id));
        session.drag.begin(&item);

        session.reset();
        assert!(session.store.is_empty());
        assert!(session.store.selected_id().is_none());
        assert!(!session.drag.is_dragging());
    }

    #[test]
    fn test_category_switch_does_not_touch_placements() {
        let mut session = PlannerSession::default();
        let item = Arc::clone(&session.catalog.items()[0]);
        session.store.add_placement(item, PlanePoint::new(10.0, 20.0));
        let before = session.store.snapshot();
        let version = session.store.version();

        let other = session.catalog.categories()[1].id.clone();
        session.catalog.select_category(&other);

        assert_eq!(session.store.snapshot(), before);
        assert_eq!(session.store.version(), version);
    }
}
