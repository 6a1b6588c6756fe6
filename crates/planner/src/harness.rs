//! Headless test harness for programmatic layout manipulation.
//!
//! Owns a full planner session plus the scene cache and a texture cache, so
//! tests and the JSON command protocol can drive the planner without a window.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use shared::{FurnitureItem, PlacedFurniture, PlacementId, PlanePoint, RoomDimensions};

use crate::catalog::JsonCatalog;
use crate::config::PlannerConfig;
use crate::drag::DragPayload;
use crate::fixtures::MemoryThumbnailLoader;
use crate::scene::{FurnitureNode, SceneCache, SceneGraph};
use crate::session::PlannerSession;
use crate::state::catalog::CatalogBrowser;
use crate::texture::{FlatTextures, TextureCache, TextureEvent, ThumbnailLoader};
use crate::validation::{LayoutValidator, MeshValidator};
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Ray;

/// Headless test harness: session, scene cache and texture cache
pub struct TestHarness {
    pub session: PlannerSession,
    textures: Option<TextureCache>,
    cache: SceneCache,
    last_meshes: HashMap<PlacementId, MeshData>,
}

impl TestHarness {
    /// Default room and config, bundled catalog, in-memory thumbnails
    pub fn new() -> Self {
        Self::with_loader(Arc::new(MemoryThumbnailLoader::new()))
    }

    /// Use a specific thumbnail loader
    pub fn with_loader(loader: Arc<dyn ThumbnailLoader>) -> Self {
        Self::with_session(PlannerSession::default(), loader)
    }

    pub fn with_session(session: PlannerSession, loader: Arc<dyn ThumbnailLoader>) -> Self {
        let textures = TextureCache::new(loader)
            .map_err(|e| tracing::error!("Texture cache unavailable: {e}"))
            .ok();
        Self {
            session,
            textures,
            cache: SceneCache::new(),
            last_meshes: HashMap::new(),
        }
    }

    /// Custom config and room with an empty catalog
    pub fn with_config(config: PlannerConfig, room: RoomDimensions) -> Self {
        let session = PlannerSession::with_room(
            Arc::new(config),
            room,
            CatalogBrowser::new(Box::new(JsonCatalog::default())),
        );
        Self::with_session(session, Arc::new(MemoryThumbnailLoader::new()))
    }

    // ── Layout manipulation ───────────────────────────────────

    /// Place an item at a plane position and return the placement id
    pub fn add_item(&mut self, item: FurnitureItem, x: f64, y: f64) -> PlacementId {
        let item = self.session.catalog.shared_item(item);
        self.session
            .store
            .add_placement(item, PlanePoint::new(x, y))
            .id
    }

    /// Drop a raw payload with the canvas origin at (0, 0)
    pub fn drop_json(&mut self, payload: &str, x: f64, y: f64) -> Option<PlacementId> {
        self.drop_at(payload, PlanePoint::new(x, y), PlanePoint::default())
    }

    /// Drop a raw payload at a pointer position relative to a canvas origin
    pub fn drop_at(
        &mut self,
        payload: &str,
        pointer: PlanePoint,
        canvas_origin: PlanePoint,
    ) -> Option<PlacementId> {
        let session = &mut self.session;
        session
            .drag
            .drop(
                &DragPayload(payload.to_string()),
                pointer,
                canvas_origin,
                PlanePoint::default(),
                &session.catalog,
                &mut session.store,
            )
            .map(|p| p.id)
    }

    /// Drop a raw payload onto the floor where `ray` meets it, as the 3D view does
    pub fn drop_on_floor(&mut self, payload: &str, ray: &Ray) -> Option<PlacementId> {
        let session = &mut self.session;
        let at = session.transform.floor_point(ray)?;
        session
            .drag
            .place(
                &DragPayload(payload.to_string()),
                at,
                &session.catalog,
                &mut session.store,
            )
            .map(|p| p.id)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.session.store.remove_placement(id)
    }

    pub fn move_to(&mut self, id: &str, x: f64, y: f64) -> bool {
        self.session.store.move_placement(id, PlanePoint::new(x, y))
    }

    pub fn rotate(&mut self, id: &str, delta: f64) -> bool {
        self.session.store.rotate_placement(id, delta)
    }

    pub fn select(&mut self, id: Option<&str>) {
        self.session.store.select(id);
    }

    pub fn clear_selection(&mut self) {
        self.session.store.clear_selection();
    }

    /// Clear placements, selection and drag state
    pub fn reset(&mut self) {
        self.session.reset();
        self.last_meshes.clear();
    }

    // ── Build + inspection ────────────────────────────────────

    /// Build (or reuse) the scene and extract a mesh per furniture box
    pub fn build(&mut self) -> &SceneGraph {
        let session = &self.session;
        let scene = match self.textures.as_mut() {
            Some(textures) => {
                textures.poll();
                self.cache
                    .get_or_build(&session.room, &session.store, &session.config, textures)
            }
            None => self.cache.get_or_build_with(
                &session.room,
                &session.store,
                &session.config,
                &mut FlatTextures,
                0,
            ),
        };
        self.last_meshes = scene
            .furniture
            .iter()
            .map(|n| (n.id.clone(), MeshData::from_faces(&n.faces())))
            .collect();
        scene
    }

    /// Last built scene
    pub fn scene(&self) -> Option<&SceneGraph> {
        self.cache.scene()
    }

    pub fn scene_rebuild_count(&self) -> u64 {
        self.cache.rebuild_count()
    }

    pub fn placement_count(&self) -> usize {
        self.session.store.len()
    }

    pub fn placement(&self, id: &str) -> Option<&PlacedFurniture> {
        self.session.store.get(id)
    }

    /// Furniture node from the last build
    pub fn furniture_node(&self, id: &str) -> Option<&FurnitureNode> {
        self.scene()?.furniture_node(id)
    }

    /// Mesh of a furniture box from the last build
    pub fn mesh_of(&self, id: &str) -> Option<&MeshData> {
        self.last_meshes.get(id)
    }

    /// Create a validator for a box's mesh
    pub fn validate_mesh(&self, id: &str) -> Option<MeshValidator<'_>> {
        self.last_meshes.get(id).map(MeshValidator::new)
    }

    pub fn layout(&self) -> LayoutValidator<'_> {
        LayoutValidator::new(&self.session)
    }

    pub fn textures(&self) -> Option<&TextureCache> {
        self.textures.as_ref()
    }

    /// Poll the texture cache until nothing is pending or `timeout` passes
    pub fn wait_for_textures(&mut self, timeout: Duration) -> Vec<TextureEvent> {
        let Some(textures) = self.textures.as_mut() else {
            return Vec::new();
        };
        let deadline = Instant::now() + timeout;
        let mut events = textures.poll();
        while textures.pending_count() > 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            events.extend(textures.poll());
        }
        events
    }

    /// Snapshot of the placement list as JSON. Not persisted anywhere.
    pub fn export_layout_json(&self) -> String {
        serde_json::to_string_pretty(&self.session.store.snapshot()).unwrap_or_default()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn test_new_harness_empty() {
        let h = TestHarness::new();
        assert_eq!(h.placement_count(), 0);
        assert!(h.scene().is_none());
    }

    #[test]
    fn test_add_and_build() {
        let mut h = TestHarness::new();
        let id = h.add_item(fixtures::desk(), 100.0, 100.0);
        h.build();
        let node = h.furniture_node(&id).unwrap();
        assert!((node.center.x - 1.4).abs() < 1e-5);
        assert!(h.mesh_of(&id).is_some());
    }

    #[test]
    fn test_validate_mesh() {
        let mut h = TestHarness::new();
        let id = h.add_item(fixtures::chair(), 0.0, 0.0);
        h.build();
        let v = h.validate_mesh(&id).unwrap();
        assert!(v.validate_all().is_empty());
        assert_eq!(v.triangle_count(), 12);
        assert!(v.dimensions_approx([0.45, 0.75, 0.5], 1e-4));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut h = TestHarness::new();
        let id = h.add_item(fixtures::desk(), 0.0, 0.0);
        h.select(Some(&id));
        h.build();
        h.reset();
        assert_eq!(h.placement_count(), 0);
        assert!(h.mesh_of(&id).is_none());
        assert!(h.build().furniture.is_empty());
    }

    #[test]
    fn test_export_layout_json() {
        let mut h = TestHarness::new();
        h.add_item(fixtures::desk(), 10.0, 20.0);
        let json = h.export_layout_json();
        let back: Vec<PlacedFurniture> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].furniture.name, "Desk");
    }
}
