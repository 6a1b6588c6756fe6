//! Factory functions for test data.
//!
//! Catalog items, a small catalog document and in-memory thumbnail loaders
//! used by unit tests, integration tests and the headless harness.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use shared::{FurnitureItem, Swatch};

use crate::texture::{TextureError, ThumbnailImage, ThumbnailLoader};

// ── Catalog items ───────────────────────────────────────────────

/// 800 × 400 mm desk, 750 mm tall
pub fn desk() -> FurnitureItem {
    let mut item = FurnitureItem::new("desk-800", "Desk", 800.0, 400.0);
    item.depth = Some(750.0);
    item.color = Some(Swatch::new("#8b7355"));
    item.price = Some(185_000);
    item
}

/// Chair without depth or color, exercising the defaults
pub fn chair() -> FurnitureItem {
    FurnitureItem::new("chair-450", "Chair", 450.0, 500.0)
}

/// Tall cabinet with a thumbnail reference
pub fn cabinet_with_thumbnail(reference: &str) -> FurnitureItem {
    let mut item = FurnitureItem::new("cabinet-900", "Cabinet", 900.0, 450.0);
    item.depth = Some(1800.0);
    item.color = Some(Swatch::new("#e0d8c8"));
    item.thumbnail = Some(reference.to_string());
    item
}

/// Item with arbitrary footprint and height
pub fn item(id: &str, width: f64, height: f64, depth: Option<f64>) -> FurnitureItem {
    let mut item = FurnitureItem::new(id, id, width, height);
    item.depth = depth;
    item
}

/// Catalog document with two categories
pub fn catalog_json() -> &'static str {
    r##"{
        "categories": [
            {"id": "office", "slug": "office", "name": "Office"},
            {"id": "lab", "slug": "lab-bench", "name": "Lab"}
        ],
        "products": [
            {"categoryId": "office", "id": "desk-800", "name": "Desk", "width": 800, "height": 400, "depth": 750, "color": "#8b7355", "price": 185000},
            {"categoryId": "office", "id": "chair-450", "name": "Chair", "width": 450, "height": 500},
            {"categoryId": "lab", "id": "bench-1800", "name": "Lab bench", "width": 1800, "height": 750, "depth": 850, "thumbnail": "bench.png"}
        ]
    }"##
}

// ── Thumbnail loaders ───────────────────────────────────────────

/// Serves a solid 4×4 image for every reference except the ones marked as
/// missing. Counts loads per call.
#[derive(Default)]
pub struct MemoryThumbnailLoader {
    missing: Mutex<HashSet<String>>,
    loads: AtomicUsize,
}

impl MemoryThumbnailLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `reference` fail to load
    pub fn with_missing(self, reference: &str) -> Self {
        if let Ok(mut missing) = self.missing.lock() {
            missing.insert(reference.to_string());
        }
        self
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl ThumbnailLoader for MemoryThumbnailLoader {
    fn load(&self, reference: &str) -> Result<ThumbnailImage, TextureError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let missing = self
            .missing
            .lock()
            .map(|m| m.contains(reference))
            .unwrap_or(false);
        if missing {
            return Err(TextureError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{reference} not found"),
            )));
        }
        Ok(ThumbnailImage::solid([4, 4], [200, 120, 40, 255]))
    }
}
