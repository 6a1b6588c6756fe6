//! Catalog and category sources
//!
//! The catalog is an external collaborator. This module defines the contract
//! the planner consumes plus two adapters: the bundled demo catalog and a JSON
//! catalog document loaded from disk.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use shared::{Category, FurnitureItem};

const BUILTIN_CATALOG: &str = include_str!("../assets/demo_catalog.json");

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// Supplies categories and their ordered furniture lists
pub trait CatalogSource {
    fn categories(&self) -> Result<Vec<Category>, CatalogError>;
    fn items(&self, category_id: &str) -> Result<Vec<FurnitureItem>, CatalogError>;
}

/// One product row of a catalog document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    category_id: String,
    #[serde(flatten)]
    item: FurnitureItem,
}

/// On-disk catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    products: Vec<CatalogEntry>,
}

/// Catalog backed by an in-memory JSON document
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    categories: Vec<Category>,
    products: Vec<CatalogEntry>,
}

impl JsonCatalog {
    /// Parse a catalog document. Entries with a non-positive footprint and
    /// duplicate ids within a category are skipped.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;

        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut products = Vec::with_capacity(doc.products.len());
        for entry in doc.products {
            if !entry.item.is_valid() {
                tracing::warn!(
                    "Skipping catalog item {} ({}): width/height must be positive",
                    entry.item.id,
                    entry.item.name
                );
                continue;
            }
            if !seen.insert((entry.category_id.clone(), entry.item.id.clone())) {
                tracing::warn!(
                    "Skipping duplicate catalog item {} in category {}",
                    entry.item.id,
                    entry.category_id
                );
                continue;
            }
            products.push(entry);
        }

        Ok(Self {
            categories: doc.categories,
            products,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        tracing::info!(
            "Loaded catalog from {} ({} categories, {} items)",
            path.display(),
            catalog.categories.len(),
            catalog.item_count()
        );
        Ok(catalog)
    }

    /// The bundled demo catalog
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).unwrap_or_else(|e| {
            tracing::error!("Bundled catalog is invalid: {e}");
            Self::default()
        })
    }

    pub fn item_count(&self) -> usize {
        self.products.len()
    }
}

impl CatalogSource for JsonCatalog {
    fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.clone())
    }

    fn items(&self, category_id: &str) -> Result<Vec<FurnitureItem>, CatalogError> {
        if !self.categories.iter().any(|c| c.id == category_id) {
            return Err(CatalogError::UnknownCategory(category_id.to_string()));
        }
        Ok(self
            .products
            .iter()
            .filter(|p| p.category_id == category_id)
            .map(|p| p.item.clone())
            .collect())
    }
}

// ── Category icons ───────────────────────────────────────────

/// Sidebar icon for a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryIcon {
    BookOpen,
    Monitor,
    Armchair,
    UtensilsCrossed,
    FlaskConical,
    Shield,
    #[default]
    Archive,
    Square,
    Sofa,
}

impl CategoryIcon {
    /// Map a category slug to its icon. Unknown slugs get the default.
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "educational" | "shelf" => CategoryIcon::BookOpen,
            "office" | "desk" => CategoryIcon::Monitor,
            "chairs" | "chair" => CategoryIcon::Armchair,
            "dining-table" => CategoryIcon::UtensilsCrossed,
            "lab-bench" => CategoryIcon::FlaskConical,
            "military" => CategoryIcon::Shield,
            "table" => CategoryIcon::Square,
            "sofa" => CategoryIcon::Sofa,
            _ => CategoryIcon::default(),
        }
    }

    /// Glyph drawn in the sidebar button
    pub fn glyph(self) -> &'static str {
        match self {
            CategoryIcon::BookOpen => "📖",
            CategoryIcon::Monitor => "🖥",
            CategoryIcon::Armchair => "💺",
            CategoryIcon::UtensilsCrossed => "🍴",
            CategoryIcon::FlaskConical => "⚗",
            CategoryIcon::Shield => "🛡",
            CategoryIcon::Archive => "🗄",
            CategoryIcon::Square => "⬜",
            CategoryIcon::Sofa => "🛋",
        }
    }
}

// ── Display helpers ──────────────────────────────────────────

/// `₩1,234,000` for a positive price, nothing otherwise
pub fn format_price(price: Option<u64>) -> Option<String> {
    let price = price.filter(|p| *p > 0)?;
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    Some(format!("₩{grouped}"))
}

/// Footprint caption shown under the item name: `800 × 400 mm`
pub fn dimension_caption(item: &FurnitureItem) -> String {
    format!("{} × {} mm", item.width, item.height)
}

/// Size of the thumbnail placeholder box as fractions of the card image area
pub fn placeholder_fraction(item: &FurnitureItem) -> (f32, f32) {
    let w = (item.width / 20.0).min(80.0) as f32;
    let h = (item.height / 15.0).min(80.0) as f32;
    (w / 100.0, h / 100.0)
}
