use glam::{Vec2, Vec3};
use shared::RoomDimensions;

use super::{Floor, FloorGrid, Material, RoomShell, WallNode};
use crate::config::{PlannerConfig, WallSide};
use crate::transform::CoordinateTransform;

/// Floor, four walls centered on the room edges, and the floor grid
pub fn room_shell(
    room: &RoomDimensions,
    config: &PlannerConfig,
    transform: &CoordinateTransform,
) -> RoomShell {
    let (w, d) = transform.room_scene_size(room);
    let walls_cfg = &config.walls;
    let (h, t) = (walls_cfg.height_m, walls_cfg.thickness_m);

    let walls = WallSide::all()
        .into_iter()
        .map(|side| {
            let (center, size) = match side {
                WallSide::Back => (Vec3::new(w / 2.0, h / 2.0, 0.0), Vec3::new(w, h, t)),
                WallSide::Front => (Vec3::new(w / 2.0, h / 2.0, d), Vec3::new(w, h, t)),
                WallSide::Left => (Vec3::new(0.0, h / 2.0, d / 2.0), Vec3::new(t, h, d)),
                WallSide::Right => (Vec3::new(w, h / 2.0, d / 2.0), Vec3::new(t, h, d)),
            };
            let opacity = if walls_cfg.is_ghost(side) {
                walls_cfg.ghost_opacity
            } else {
                1.0
            };
            WallNode {
                side,
                center,
                size,
                material: Material::Flat {
                    color: config.palette.wall,
                    opacity,
                },
                outline: config.outline.normal,
            }
        })
        .collect();

    RoomShell {
        floor: Floor {
            center: Vec3::new(w / 2.0, 0.0, d / 2.0),
            size: Vec2::new(w, d),
            color: config.palette.floor,
        },
        walls,
        grid: FloorGrid {
            height: 0.001,
            extent: Vec2::new(w, d),
            cell: config.grid.cell,
            section: config.grid.section,
            cell_color: config.palette.grid_cell,
            section_color: config.palette.grid_section,
        },
    }
}
