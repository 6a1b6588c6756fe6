//! Planner configuration
//!
//! One immutable object per session, shared by `Arc` between the plan view and
//! the scene builder. Both views read the scale constant from here, never from
//! their own literals.

use serde::{Deserialize, Serialize};

/// Smallest floor grid cell accepted (m)
pub const MIN_GRID_CELL: f32 = 0.01;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("scale must be positive and finite, got {0}")]
    InvalidScale(f64),
    #[error("ghost walls {0:?} leave no two adjoining opaque walls")]
    NoOpaqueCorner(Vec<WallSide>),
    #[error("grid cell {cell} m / section {section} m out of range (cell must be at least {MIN_GRID_CELL} m)")]
    InvalidGrid { cell: f32, section: f32 },
    #[error("zoom range [{min}, {max}] is empty")]
    InvalidZoomRange { min: f32, max: f32 },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Room wall, named from the default camera's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallSide {
    /// Along the x axis at z = 0
    Back,
    /// Along the z axis at x = 0
    Left,
    /// Along the z axis at x = room width
    Right,
    /// Along the x axis at z = room depth
    Front,
}

impl WallSide {
    pub fn all() -> [WallSide; 4] {
        [WallSide::Back, WallSide::Left, WallSide::Right, WallSide::Front]
    }

    /// Whether the two walls share a room corner
    pub fn adjoins(self, other: WallSide) -> bool {
        use WallSide::*;
        matches!(
            (self, other),
            (Back | Front, Left | Right) | (Left | Right, Back | Front)
        )
    }
}

/// Wall geometry and the ghost-wall convention
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Wall height (m)
    pub height_m: f32,
    /// Wall thickness (m)
    pub thickness_m: f32,
    /// Walls drawn partially transparent
    pub ghost: Vec<WallSide>,
    /// Opacity of ghost walls (0.0 - 1.0)
    pub ghost_opacity: f32,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            height_m: 2.8,
            thickness_m: 0.08,
            ghost: vec![WallSide::Right, WallSide::Front],
            ghost_opacity: 0.15,
        }
    }
}

impl WallConfig {
    pub fn is_ghost(&self, side: WallSide) -> bool {
        self.ghost.contains(&side)
    }

    /// At least two adjoining walls must stay opaque to convey orientation
    pub fn has_opaque_corner(&self) -> bool {
        let opaque: Vec<WallSide> = WallSide::all()
            .into_iter()
            .filter(|s| !self.is_ghost(*s))
            .collect();
        opaque
            .iter()
            .any(|a| opaque.iter().any(|b| a.adjoins(*b)))
    }
}

/// Scene colors (RGB)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub wall: [u8; 3],
    pub floor: [u8; 3],
    pub label: [u8; 3],
    pub grid_cell: [u8; 3],
    pub grid_section: [u8; 3],
    /// Opacity of furniture boxes
    pub furniture_opacity: f32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            wall: [0xf5, 0xf5, 0xf0],
            floor: [0xe8, 0xe8, 0xe0],
            label: [0x33, 0x33, 0x33],
            grid_cell: [0xcc, 0xcc, 0xcc],
            grid_section: [0x99, 0x99, 0x99],
            furniture_opacity: 0.85,
        }
    }
}

/// Edge outline style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutlineStyle {
    pub color: [u8; 3],
    pub width: f32,
}

/// The two fixed outline styles of a furniture box
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    pub normal: OutlineStyle,
    pub selected: OutlineStyle,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            normal: OutlineStyle {
                color: [0x33, 0x33, 0x33],
                width: 1.0,
            },
            selected: OutlineStyle {
                color: [0x00, 0x58, 0xa3],
                width: 2.0,
            },
        }
    }
}

/// Label metrics (meters)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub font_size: f32,
    pub dimension_font_size: f32,
    /// Height above the box top
    pub lift: f32,
    /// Max label width as a fraction of the box width
    pub max_width_ratio: f32,
    /// Offset of the dimension label along the box's local z
    pub dimension_offset: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font_size: 0.12,
            dimension_font_size: 0.08,
            lift: 0.05,
            max_width_ratio: 0.9,
            dimension_offset: 0.12,
        }
    }
}

/// Orbit camera rig limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial eye position (world, m)
    pub initial_eye: [f32; 3],
    /// Vertical field of view (degrees)
    pub fov_deg: f32,
    /// Eye height of the orbit target (m)
    pub target_height: f32,
    /// Polar angle range measured from straight up (radians)
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of the remaining motion applied per frame
    pub damping: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_eye: [8.0, 6.0, 8.0],
            fov_deg: 50.0,
            target_height: 0.5,
            min_polar: 0.0,
            max_polar: std::f32::consts::PI / 2.1,
            min_distance: 2.0,
            max_distance: 15.0,
            damping: 0.05,
            near: 0.1,
            far: 200.0,
        }
    }
}

/// Floor grid spacing (m)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cell: f32,
    pub section: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell: 0.5,
            section: 1.0,
        }
    }
}

/// Scene lights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    pub ambient: f32,
    /// Key light sits above the far room corner at this height
    pub key_height: f32,
    pub key_intensity: f32,
    pub shadow_map_size: u32,
    pub fill_position: [f32; 3],
    pub fill_intensity: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: 0.6,
            key_height: 6.0,
            key_intensity: 0.8,
            shadow_map_size: 1024,
            fill_position: [-2.0, 4.0, -2.0],
            fill_intensity: 0.3,
        }
    }
}

/// All planner configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Plane units per millimeter, shared by the plan view and the 3D scene
    pub scale: f64,
    pub walls: WallConfig,
    pub palette: Palette,
    pub outline: OutlineConfig,
    pub labels: LabelConfig,
    pub camera: CameraConfig,
    pub grid: GridConfig,
    pub lighting: LightingConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            scale: 0.1,
            walls: WallConfig::default(),
            palette: Palette::default(),
            outline: OutlineConfig::default(),
            labels: LabelConfig::default(),
            camera: CameraConfig::default(),
            grid: GridConfig::default(),
            lighting: LightingConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validated()
    }

    /// Check cross-field invariants
    pub fn validated(self) -> Result<Self, ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale));
        }
        if !self.walls.has_opaque_corner() {
            return Err(ConfigError::NoOpaqueCorner(self.walls.ghost.clone()));
        }
        let (cell, section) = (self.grid.cell, self.grid.section);
        if !(cell.is_finite() && cell >= MIN_GRID_CELL && section.is_finite() && section > 0.0) {
            return Err(ConfigError::InvalidGrid { cell, section });
        }
        let (min, max) = (self.camera.min_distance, self.camera.max_distance);
        if !(min > 0.0 && min <= max) {
            return Err(ConfigError::InvalidZoomRange { min, max });
        }
        Ok(self)
    }

    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "room-planner", "room-planner")
            .map(|dirs| dirs.config_dir().join("planner.json"))
    }

    /// Load `planner.json` from the config directory, or defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        let Ok(json) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(config) => {
                tracing::info!("Loaded planner config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
