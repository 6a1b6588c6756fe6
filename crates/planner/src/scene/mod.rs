//! Scene graph construction
//!
//! Turns the room and the placement store into renderable nodes: the room
//! shell, one box per placement with its labels, the lights, and the camera
//! rig setup. The graph is plain data; the viewport decides how to draw it.

pub mod cache;
pub mod camera;
mod furniture;
mod room;

pub use cache::SceneCache;
pub use camera::{CameraSetup, OrbitRig};
pub use furniture::furniture_node;
pub use room::room_shell;

use glam::{Mat4, Vec2, Vec3};
use shared::{PlacementId, RoomDimensions};

use crate::config::{OutlineStyle, PlannerConfig, WallSide};
use crate::state::placement::PlacementStore;
use crate::texture::TextureProvider;
use crate::transform::CoordinateTransform;
use crate::viewport::mesh::{box_edges, box_faces, BoxFace};
use crate::viewport::picking::{pick_nearest, Ray};

/// Surface appearance of a face
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Flat {
        color: [u8; 3],
        opacity: f32,
    },
    /// Thumbnail image; `tint` is used wherever the image is unavailable
    Textured {
        reference: String,
        tint: [u8; 3],
        opacity: f32,
    },
}

impl Material {
    pub fn color(&self) -> [u8; 3] {
        match self {
            Material::Flat { color, .. } => *color,
            Material::Textured { tint, .. } => *tint,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            Material::Flat { opacity, .. } | Material::Textured { opacity, .. } => *opacity,
        }
    }

    pub fn texture(&self) -> Option<&str> {
        match self {
            Material::Flat { .. } => None,
            Material::Textured { reference, .. } => Some(reference),
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity() < 1.0
    }
}

/// Text drawn flat in a node's local horizontal plane
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    /// Anchor relative to the box center, in the box frame
    pub offset: Vec3,
    /// Rotation about the local x axis (−π/2 lays the text on the top face)
    pub pitch: f32,
    /// Glyph height (m)
    pub font_size: f32,
    pub max_width: Option<f32>,
    pub color: [u8; 3],
}

/// One placed furniture box
#[derive(Debug, Clone)]
pub struct FurnitureNode {
    pub id: PlacementId,
    pub name: String,
    pub center: Vec3,
    /// (width, vertical, plan depth) in meters
    pub size: Vec3,
    /// Rotation about +Y (radians)
    pub yaw: f32,
    /// Side, top and bottom faces
    pub body: Material,
    /// Front and back faces
    pub face: Material,
    pub outline: OutlineStyle,
    pub selected: bool,
    pub labels: Vec<Label>,
}

impl FurnitureNode {
    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.center) * Mat4::from_rotation_y(self.yaw)
    }

    pub fn faces(&self) -> Vec<BoxFace> {
        box_faces(self.model(), self.size, &self.body, &self.face)
    }

    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        box_edges(self.model(), self.size)
    }

    /// World anchor of a label plus the world directions of its text baseline
    /// and of its "up" (toward the top of the glyphs)
    pub fn label_frame(&self, label: &Label) -> (Vec3, Vec3, Vec3) {
        let model = self.model() * Mat4::from_rotation_x(label.pitch);
        let anchor = self.model().transform_point3(label.offset);
        let right = model.transform_vector3(Vec3::X).normalize_or_zero();
        let up = model.transform_vector3(Vec3::Y).normalize_or_zero();
        (anchor, right, up)
    }
}

/// A wall slab
#[derive(Debug, Clone)]
pub struct WallNode {
    pub side: WallSide,
    pub center: Vec3,
    pub size: Vec3,
    pub material: Material,
    pub outline: OutlineStyle,
}

impl WallNode {
    pub fn is_ghost(&self) -> bool {
        self.material.is_transparent()
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_translation(self.center)
    }

    pub fn faces(&self) -> Vec<BoxFace> {
        box_faces(self.model(), self.size, &self.material, &self.material)
    }

    pub fn edges(&self) -> [(Vec3, Vec3); 12] {
        box_edges(self.model(), self.size)
    }
}

/// Floor plane (y = 0)
#[derive(Debug, Clone)]
pub struct Floor {
    pub center: Vec3,
    /// (width, depth) in meters
    pub size: Vec2,
    pub color: [u8; 3],
}

impl Floor {
    /// Corners in counter-clockwise order seen from above
    pub fn corners(&self) -> [Vec3; 4] {
        let h = self.size * 0.5;
        let c = self.center;
        [
            Vec3::new(c.x - h.x, c.y, c.z + h.y),
            Vec3::new(c.x + h.x, c.y, c.z + h.y),
            Vec3::new(c.x + h.x, c.y, c.z - h.y),
            Vec3::new(c.x - h.x, c.y, c.z - h.y),
        ]
    }
}

/// Lines per axis beyond which the grid is skipped
const MAX_GRID_LINES: usize = 4096;

/// Grid lines limited to the floor extents
#[derive(Debug, Clone)]
pub struct FloorGrid {
    /// Lift above the floor to avoid z-fighting
    pub height: f32,
    pub extent: Vec2,
    pub cell: f32,
    pub section: f32,
    pub cell_color: [u8; 3],
    pub section_color: [u8; 3],
}

/// One grid segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub from: Vec3,
    pub to: Vec3,
    pub section: bool,
}

impl FloorGrid {
    pub fn lines(&self) -> Vec<GridLine> {
        let mut lines = Vec::new();
        if !(self.cell.is_finite() && self.cell > 0.0) {
            return lines;
        }
        let nx = (self.extent.x / self.cell).floor() as usize;
        let nz = (self.extent.y / self.cell).floor() as usize;
        if nx.max(nz) > MAX_GRID_LINES {
            tracing::warn!("Grid cell {} m too fine for the floor, grid skipped", self.cell);
            return lines;
        }
        let per_section = (self.section / self.cell).round().max(1.0) as usize;
        let y = self.height;

        for i in 0..=nx {
            let x = i as f32 * self.cell;
            lines.push(GridLine {
                from: Vec3::new(x, y, 0.0),
                to: Vec3::new(x, y, self.extent.y),
                section: i % per_section == 0,
            });
        }
        for i in 0..=nz {
            let z = i as f32 * self.cell;
            lines.push(GridLine {
                from: Vec3::new(0.0, y, z),
                to: Vec3::new(self.extent.x, y, z),
                section: i % per_section == 0,
            });
        }
        lines
    }
}

/// Floor, walls and grid
#[derive(Debug, Clone)]
pub struct RoomShell {
    pub floor: Floor,
    pub walls: Vec<WallNode>,
    pub grid: FloorGrid,
}

impl RoomShell {
    pub fn wall(&self, side: WallSide) -> Option<&WallNode> {
        self.walls.iter().find(|w| w.side == side)
    }
}

/// Scene light
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient {
        intensity: f32,
    },
    Directional {
        position: Vec3,
        intensity: f32,
        cast_shadows: bool,
        shadow_map_size: Option<u32>,
    },
}

/// Everything the 3D view draws
#[derive(Debug, Clone)]
pub struct SceneGraph {
    pub room: RoomShell,
    pub furniture: Vec<FurnitureNode>,
    pub lights: Vec<Light>,
    pub camera: CameraSetup,
}

impl SceneGraph {
    pub fn furniture_node(&self, id: &str) -> Option<&FurnitureNode> {
        self.furniture.iter().find(|n| n.id == id)
    }

    pub fn selected_nodes(&self) -> impl Iterator<Item = &FurnitureNode> {
        self.furniture.iter().filter(|n| n.selected)
    }

    /// Nearest furniture box hit by the ray. Walls and floor never pick.
    pub fn pick(&self, ray: &Ray) -> Option<PlacementId> {
        pick_nearest(
            ray,
            self.furniture
                .iter()
                .map(|n| (n.id.as_str(), n.model(), n.size)),
        )
    }

    /// Lambert factor for a face normal, from the scene lights
    pub fn shade(&self, normal: Vec3, at: Vec3) -> f32 {
        let light: f32 = self
            .lights
            .iter()
            .map(|l| match l {
                Light::Ambient { intensity } => *intensity,
                Light::Directional {
                    position,
                    intensity,
                    ..
                } => {
                    let dir = (*position - at).normalize_or_zero();
                    normal.dot(dir).max(0.0) * intensity
                }
            })
            .sum();
        light.min(1.0)
    }
}

fn lights(room: &RoomDimensions, config: &PlannerConfig, transform: &CoordinateTransform) -> Vec<Light> {
    let (w, d) = transform.room_scene_size(room);
    let lighting = &config.lighting;
    vec![
        Light::Ambient {
            intensity: lighting.ambient,
        },
        Light::Directional {
            position: Vec3::new(w, lighting.key_height, d),
            intensity: lighting.key_intensity,
            cast_shadows: true,
            shadow_map_size: Some(lighting.shadow_map_size),
        },
        Light::Directional {
            position: Vec3::from_array(lighting.fill_position),
            intensity: lighting.fill_intensity,
            cast_shadows: false,
            shadow_map_size: None,
        },
    ]
}

/// Build the scene for the current store contents.
///
/// Thumbnails are requested from `textures` as a side effect; boxes whose
/// thumbnail is not ready yet keep the flat color on every face.
pub fn build_scene(
    room: &RoomDimensions,
    store: &PlacementStore,
    config: &PlannerConfig,
    textures: &mut dyn TextureProvider,
) -> SceneGraph {
    let transform = CoordinateTransform::from_config(config);

    let furniture = store
        .placements()
        .iter()
        .map(|p| furniture_node(p, store.is_selected(&p.id), config, &transform, textures))
        .collect();

    SceneGraph {
        room: room_shell(room, config, &transform),
        furniture,
        lights: lights(room, config, &transform),
        camera: CameraSetup::for_room(room, &config.camera, &transform),
    }
}
