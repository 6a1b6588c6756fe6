use glam::Vec3;
use shared::PlacedFurniture;

use super::{FurnitureNode, Label, Material};
use crate::config::PlannerConfig;
use crate::texture::TextureProvider;
use crate::transform::CoordinateTransform;

/// Box node for one placement
pub fn furniture_node(
    placed: &PlacedFurniture,
    selected: bool,
    config: &PlannerConfig,
    transform: &CoordinateTransform,
    textures: &mut dyn TextureProvider,
) -> FurnitureNode {
    let item = &placed.furniture;
    let size = transform.box_size(item);
    let color = item.rgb();
    let opacity = config.palette.furniture_opacity;

    let body = Material::Flat { color, opacity };
    let face = match item.thumbnail_ref() {
        Some(reference) if textures.resolve(reference) => Material::Textured {
            reference: reference.to_string(),
            tint: color,
            opacity,
        },
        _ => body.clone(),
    };

    let labels_cfg = &config.labels;
    let top = size.y / 2.0 + labels_cfg.lift;
    let pitch = -std::f32::consts::FRAC_PI_2;
    let labels = vec![
        Label {
            text: item.name.clone(),
            offset: Vec3::new(0.0, top, 0.0),
            pitch,
            font_size: labels_cfg.font_size,
            max_width: Some(size.x * labels_cfg.max_width_ratio),
            color: config.palette.label,
        },
        Label {
            text: item.dimension_label(),
            offset: Vec3::new(0.0, top, labels_cfg.dimension_offset),
            pitch,
            font_size: labels_cfg.dimension_font_size,
            max_width: None,
            color: config.palette.label,
        },
    ];

    FurnitureNode {
        id: placed.id.clone(),
        name: item.name.clone(),
        center: transform.scene_center(placed),
        size,
        yaw: transform.scene_yaw(placed.rotation),
        body,
        face,
        outline: if selected {
            config.outline.selected
        } else {
            config.outline.normal
        },
        selected,
        labels,
    }
}
