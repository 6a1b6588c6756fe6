//! Scene graph cache

use shared::RoomDimensions;

use super::{build_scene, SceneGraph};
use crate::config::PlannerConfig;
use crate::state::placement::PlacementStore;
use crate::texture::{TextureCache, TextureProvider};

/// Inputs a built scene depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SceneKey {
    store_version: u64,
    selection_version: u64,
    texture_generation: u64,
    room: (u64, u64),
}

impl SceneKey {
    fn new(room: &RoomDimensions, store: &PlacementStore, texture_generation: u64) -> Self {
        Self {
            store_version: store.version(),
            selection_version: store.selection().version(),
            texture_generation,
            room: (room.width.to_bits(), room.height.to_bits()),
        }
    }
}

/// Cached scene graph, rebuilt when placements, selection, room or loaded
/// textures change
#[derive(Default)]
pub struct SceneCache {
    scene: Option<SceneGraph>,
    key: Option<SceneKey>,
    rebuild_count: u64,
}

impl SceneCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the cached scene matches the current inputs
    pub fn is_valid(&self, room: &RoomDimensions, store: &PlacementStore, texture_generation: u64) -> bool {
        self.key == Some(SceneKey::new(room, store, texture_generation))
    }

    /// Return the scene, rebuilding it first if any input changed
    pub fn get_or_build(
        &mut self,
        room: &RoomDimensions,
        store: &PlacementStore,
        config: &PlannerConfig,
        textures: &mut TextureCache,
    ) -> &SceneGraph {
        let generation = textures.generation();
        self.get_or_build_with(room, store, config, textures, generation)
    }

    /// Same as [`SceneCache::get_or_build`] for any texture provider; the
    /// caller supplies the provider's generation
    pub fn get_or_build_with(
        &mut self,
        room: &RoomDimensions,
        store: &PlacementStore,
        config: &PlannerConfig,
        textures: &mut dyn TextureProvider,
        texture_generation: u64,
    ) -> &SceneGraph {
        let key = SceneKey::new(room, store, texture_generation);
        if self.key != Some(key) || self.scene.is_none() {
            self.rebuild_count += 1;
            tracing::trace!("Rebuilding scene (#{})", self.rebuild_count);
            self.key = Some(key);
            self.scene = Some(build_scene(room, store, config, textures));
        }
        self.scene.get_or_insert_with(|| build_scene(room, store, config, textures))
    }

    /// Last built scene, if any
    pub fn scene(&self) -> Option<&SceneGraph> {
        self.scene.as_ref()
    }

    /// Drop the cached scene (e.g. after a config change)
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// Rebuild counter
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }
}

#[cfg(test)]
mod tests {
    use shared::{FurnitureItem, PlanePoint};

    use super::*;

    struct Never;

    impl TextureProvider for Never {
        fn resolve(&mut self, _reference: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_rebuilds_only_on_change() {
        let room = RoomDimensions::default();
        let config = PlannerConfig::default();
        let mut store = PlacementStore::new();
        let mut cache = SceneCache::new();

        cache.get_or_build_with(&room, &store, &config, &mut Never, 0);
        cache.get_or_build_with(&room, &store, &config, &mut Never, 0);
        assert_eq!(cache.rebuild_count(), 1);

        let p = store.add_placement(FurnitureItem::new("a", "A", 100.0, 100.0), PlanePoint::default());
        cache.get_or_build_with(&room, &store, &config, &mut Never, 0);
        assert_eq!(cache.rebuild_count(), 2);

        store.select(Some(&p.id));
        assert!(!cache.is_valid(&room, &store, 0));
        let scene = cache.get_or_build_with(&room, &store, &config, &mut Never, 0);
        assert!(scene.furniture[0].selected);
        assert_eq!(cache.rebuild_count(), 3);

        cache.get_or_build_with(&room, &store, &config, &mut Never, 1);
        assert_eq!(cache.rebuild_count(), 4);

        cache.get_or_build_with(&RoomDimensions::new(3000.0, 3000.0), &store, &config, &mut Never, 1);
        assert_eq!(cache.rebuild_count(), 5);
    }

    #[test]
    fn test_invalidate() {
        let room = RoomDimensions::default();
        let config = PlannerConfig::default();
        let store = PlacementStore::new();
        let mut cache = SceneCache::new();
        cache.get_or_build_with(&room, &store, &config, &mut Never, 0);
        cache.invalidate();
        cache.get_or_build_with(&room, &store, &config, &mut Never, 0);
        assert_eq!(cache.rebuild_count(), 2);
    }
}
