use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Unique identifier of a placed furniture instance
pub type PlacementId = String;

/// Identifier of a catalog entry (stable within a category)
pub type CatalogId = String;

/// Vertical size used when a catalog entry carries no `depth`
pub const DEFAULT_DEPTH_MM: f64 = 750.0;

/// Tint used when a catalog entry carries no usable `color`
pub const DEFAULT_FURNITURE_COLOR: [u8; 3] = [0xc8, 0xb8, 0x9a];

/// Room extents in millimeters. `height` is the depth axis of the floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomDimensions {
    pub width: f64,
    pub height: f64,
}

impl Default for RoomDimensions {
    fn default() -> Self {
        Self {
            width: 5000.0,
            height: 4000.0,
        }
    }
}

impl RoomDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Parse `"5000x4000"` (also accepts `×` and `X` as separator)
    pub fn parse(text: &str) -> Option<Self> {
        let normalized = text.trim().replace(['×', 'X'], "x");
        let (w, h) = normalized.split_once('x')?;
        let width: f64 = w.trim().parse().ok()?;
        let height: f64 = h.trim().parse().ok()?;
        (width > 0.0 && height > 0.0).then_some(Self { width, height })
    }
}

/// CSS-style hex color as authored by the catalog (`#rgb` or `#rrggbb`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Swatch(pub String);

impl Swatch {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Parse into RGB bytes, `None` if the text is not a hex color
    pub fn rgb(&self) -> Option<[u8; 3]> {
        parse_hex_color(&self.0)
    }
}

/// Parse `#rgb` / `#rrggbb` (leading `#` optional)
pub fn parse_hex_color(text: &str) -> Option<[u8; 3]> {
    let hex = text.trim().trim_start_matches('#');
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                out[i] = v * 16 + v;
            }
            Some(out)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some([r, g, b])
        }
        _ => None,
    }
}

/// Catalog entry. Owned by the catalog source; the planner only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureItem {
    pub id: CatalogId,
    pub name: String,
    /// Footprint width (mm)
    pub width: f64,
    /// Footprint depth on the floor plan (mm)
    pub height: f64,
    /// Vertical size (mm), see [`FurnitureItem::effective_depth_mm`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Swatch>,
    /// Image reference (URL or file path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
}

impl FurnitureItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width,
            height,
            depth: None,
            color: None,
            thumbnail: None,
            price: None,
        }
    }

    /// The one place where the missing-depth default is applied.
    pub fn effective_depth_mm(&self) -> f64 {
        match self.depth {
            Some(d) if d > 0.0 => d,
            _ => DEFAULT_DEPTH_MM,
        }
    }

    /// Catalog color, or the default tint when absent or unparsable
    pub fn rgb(&self) -> [u8; 3] {
        self.color
            .as_ref()
            .and_then(Swatch::rgb)
            .unwrap_or(DEFAULT_FURNITURE_COLOR)
    }

    /// Thumbnail reference, ignoring empty strings
    pub fn thumbnail_ref(&self) -> Option<&str> {
        self.thumbnail
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// `width×height×depth` in millimeters
    pub fn dimension_label(&self) -> String {
        format!(
            "{}×{}×{}",
            format_mm(self.width),
            format_mm(self.height),
            format_mm(self.effective_depth_mm())
        )
    }

    /// Catalog contract: positive footprint
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

fn format_mm(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

/// Position on the floor plan, in plane units
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanePoint {
    pub x: f64,
    pub y: f64,
}

impl PlanePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A catalog entry placed in the room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedFurniture {
    pub id: PlacementId,
    /// Shared with every other placement of the same catalog entry
    pub furniture: Arc<FurnitureItem>,
    /// Corner position on the plane
    pub x: f64,
    pub y: f64,
    /// Degrees, always in `[0, 360)`
    pub rotation: f64,
}

impl PlacedFurniture {
    pub fn position(&self) -> PlanePoint {
        PlanePoint::new(self.x, self.y)
    }
}

/// Catalog grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub slug: String,
    pub name: String,
}
