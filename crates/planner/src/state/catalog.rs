//! Sidebar catalog browsing state

use std::collections::HashMap;
use std::sync::Arc;

use shared::{Category, FurnitureItem};

use crate::catalog::{CatalogSource, JsonCatalog};

/// Category list, current category and its items.
///
/// Switching categories only swaps the item list; placements keep their own
/// `Arc` to the catalog entry they were created from. Entries are interned by
/// id, so revisiting a category hands out the same `Arc` again.
pub struct CatalogBrowser {
    source: Box<dyn CatalogSource>,
    categories: Vec<Category>,
    selected_category: Option<String>,
    items: Vec<Arc<FurnitureItem>>,
    interned: HashMap<String, Arc<FurnitureItem>>,
}

impl Default for CatalogBrowser {
    fn default() -> Self {
        Self::new(Box::new(JsonCatalog::builtin()))
    }
}

impl CatalogBrowser {
    /// Load categories and auto-select the first one
    pub fn new(source: Box<dyn CatalogSource>) -> Self {
        let mut browser = Self {
            source,
            categories: Vec::new(),
            selected_category: None,
            items: Vec::new(),
            interned: HashMap::new(),
        };
        browser.reload();
        browser
    }

    /// Swap the catalog source and reload
    pub fn set_source(&mut self, source: Box<dyn CatalogSource>) {
        self.source = source;
        self.selected_category = None;
        self.interned.clear();
        self.reload();
    }

    /// Re-read categories, keeping the current category when it still exists
    pub fn reload(&mut self) {
        self.categories = self.source.categories().unwrap_or_else(|e| {
            tracing::error!("Failed to load categories: {e}");
            Vec::new()
        });

        let keep = self
            .selected_category
            .as_ref()
            .filter(|id| self.categories.iter().any(|c| &c.id == *id))
            .cloned();
        match keep.or_else(|| self.categories.first().map(|c| c.id.clone())) {
            Some(id) => self.select_category(&id),
            None => {
                self.selected_category = None;
                self.items.clear();
            }
        }
    }

    /// Show the items of another category
    pub fn select_category(&mut self, category_id: &str) {
        self.selected_category = Some(category_id.to_string());
        let loaded = match self.source.items(category_id) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!("Failed to load items for category {category_id}: {e}");
                Vec::new()
            }
        };
        self.items = loaded.into_iter().map(|item| self.intern(item)).collect();
        tracing::debug!(
            "Category {category_id} selected ({} items)",
            self.items.len()
        );
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn items(&self) -> &[Arc<FurnitureItem>] {
        &self.items
    }

    pub fn find_item(&self, id: &str) -> Option<&Arc<FurnitureItem>> {
        self.items.iter().find(|i| i.id == id)
    }

    /// The catalog's own `Arc` for `item` when one with the same id and
    /// contents was loaded, otherwise a fresh one
    pub fn shared_item(&self, item: FurnitureItem) -> Arc<FurnitureItem> {
        match self.interned.get(&item.id) {
            Some(existing) if **existing == item => Arc::clone(existing),
            _ => Arc::new(item),
        }
    }

    fn intern(&mut self, item: FurnitureItem) -> Arc<FurnitureItem> {
        match self.interned.get(&item.id) {
            Some(existing) if **existing == item => Arc::clone(existing),
            _ => {
                let shared = Arc::new(item);
                self.interned.insert(shared.id.clone(), Arc::clone(&shared));
                shared
            }
        }
    }
}
