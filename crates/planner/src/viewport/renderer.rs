//! Scene graph rendering through egui's painter
//!
//! Faces are culled against the eye, sorted back to front and filled as
//! convex polygons. Painter order stands in for a depth buffer, which is
//! good enough for axis-aligned boxes standing on a floor.

use egui::epaint::{TextShape, Vertex};
use egui::{Color32, FontId, Mesh, Painter, Pos2, Rect, Shape, Stroke, Ui};
use glam::Vec3;

use room_planner_lib::config::OutlineStyle;
use room_planner_lib::scene::{FurnitureNode, Label, OrbitRig, SceneGraph};
use room_planner_lib::state::settings::ViewportSettings;
use room_planner_lib::viewport::mesh::BoxFace;

use super::textures::TextureHandles;

/// Labels whose glyphs would be smaller than this (px) are skipped
const MIN_LABEL_PX: f32 = 4.0;

struct ProjectedFace {
    points: [Pos2; 4],
    depth: f32,
    fill: Color32,
    texture: Option<egui::TextureId>,
    stroke: Stroke,
}

/// Paint the whole scene into `rect`
pub fn paint_scene(
    ui: &Ui,
    rect: Rect,
    rig: &OrbitRig,
    scene: &SceneGraph,
    textures: &TextureHandles,
    settings: &ViewportSettings,
) {
    let painter = ui.painter_at(rect);

    let bg = settings.background_color;
    painter.rect_filled(rect, 0.0, Color32::from_rgb(bg[0], bg[1], bg[2]));

    draw_floor(&painter, rect, rig, scene);
    if settings.grid_visible {
        draw_grid(&painter, rect, rig, scene);
    }

    let eye = rig.eye_position();
    let mut faces = Vec::new();
    for wall in &scene.room.walls {
        project_faces(&mut faces, &wall.faces(), &wall.outline, rect, rig, scene, eye, textures);
    }
    for node in &scene.furniture {
        project_faces(&mut faces, &node.faces(), &node.outline, rect, rig, scene, eye, textures);
    }

    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    for face in faces {
        paint_face(&painter, face);
    }

    if settings.labels_visible {
        for node in &scene.furniture {
            for label in &node.labels {
                draw_label(&painter, rect, rig, node, label);
            }
        }
    }
}

fn color(rgb: [u8; 3], shade: f32, opacity: f32) -> Color32 {
    let scale = |c: u8| (c as f32 * shade).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(
        scale(rgb[0]),
        scale(rgb[1]),
        scale(rgb[2]),
        (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
    )
}

fn outline_stroke(style: &OutlineStyle) -> Stroke {
    let [r, g, b] = style.color;
    Stroke::new(style.width, Color32::from_rgb(r, g, b))
}

#[allow(clippy::too_many_arguments)]
fn project_faces(
    out: &mut Vec<ProjectedFace>,
    faces: &[BoxFace],
    outline: &OutlineStyle,
    rect: Rect,
    rig: &OrbitRig,
    scene: &SceneGraph,
    eye: Vec3,
    textures: &TextureHandles,
) {
    let stroke = outline_stroke(outline);
    for face in faces {
        let center = face.center();
        if face.normal.dot(eye - center) <= 0.0 {
            continue;
        }
        let mut points = [Pos2::ZERO; 4];
        let mut visible = true;
        for (slot, corner) in points.iter_mut().zip(face.corners) {
            match rig.project(corner, rect) {
                Some((p, _)) => *slot = p,
                None => {
                    visible = false;
                    break;
                }
            }
        }
        let Some((_, depth)) = rig.project(center, rect).filter(|_| visible) else {
            continue;
        };

        let shade = scene.shade(face.normal, center);
        let material = &face.material;
        let texture = material.texture().and_then(|r| textures.id(r));
        let fill = if texture.is_some() {
            // Vertex tint multiplies the image
            let level = (shade * 255.0).round().clamp(0.0, 255.0) as u8;
            color([level; 3], 1.0, material.opacity())
        } else {
            color(material.color(), shade, material.opacity())
        };
        out.push(ProjectedFace {
            points,
            depth,
            fill,
            texture,
            stroke,
        });
    }
}

fn paint_face(painter: &Painter, face: ProjectedFace) {
    match face.texture {
        Some(texture_id) => {
            let mut mesh = Mesh::with_texture(texture_id);
            for (pos, uv) in face.points.iter().zip(BoxFace::UVS) {
                mesh.vertices.push(Vertex {
                    pos: *pos,
                    uv: egui::pos2(uv.x, uv.y),
                    color: face.fill,
                });
            }
            mesh.add_triangle(0, 1, 2);
            mesh.add_triangle(0, 2, 3);
            painter.add(Shape::mesh(mesh));
            painter.add(Shape::closed_line(face.points.to_vec(), face.stroke));
        }
        None => {
            painter.add(Shape::convex_polygon(
                face.points.to_vec(),
                face.fill,
                face.stroke,
            ));
        }
    }
}

fn draw_floor(painter: &Painter, rect: Rect, rig: &OrbitRig, scene: &SceneGraph) {
    let floor = &scene.room.floor;
    let points: Option<Vec<Pos2>> = floor
        .corners()
        .iter()
        .map(|c| rig.project(*c, rect).map(|(p, _)| p))
        .collect();
    let Some(points) = points else {
        return;
    };
    let shade = scene.shade(Vec3::Y, floor.center);
    painter.add(Shape::convex_polygon(
        points,
        color(floor.color, shade, 1.0),
        Stroke::NONE,
    ));
}

fn draw_grid(painter: &Painter, rect: Rect, rig: &OrbitRig, scene: &SceneGraph) {
    let grid = &scene.room.grid;
    let [cr, cg, cb] = grid.cell_color;
    let [sr, sg, sb] = grid.section_color;
    let cell = Stroke::new(0.5, Color32::from_rgb(cr, cg, cb));
    let section = Stroke::new(1.0, Color32::from_rgb(sr, sg, sb));

    for line in grid.lines() {
        if let (Some((a, _)), Some((b, _))) =
            (rig.project(line.from, rect), rig.project(line.to, rect))
        {
            painter.line_segment([a, b], if line.section { section } else { cell });
        }
    }
}

/// Text lying in the label's plane: the glyph size and baseline direction
/// come from projecting the label frame, so the text follows the box yaw.
fn draw_label(painter: &Painter, rect: Rect, rig: &OrbitRig, node: &FurnitureNode, label: &Label) {
    let (anchor, right, up) = node.label_frame(label);
    let (Some((a, _)), Some((r, _)), Some((u, _))) = (
        rig.project(anchor, rect),
        rig.project(anchor + right * label.font_size, rect),
        rig.project(anchor + up * label.font_size, rect),
    ) else {
        return;
    };

    let glyph_px = (u - a).length();
    if glyph_px < MIN_LABEL_PX {
        return;
    }
    let baseline = r - a;
    let px_per_meter = baseline.length() / label.font_size;
    let angle = baseline.y.atan2(baseline.x);

    let [cr, cg, cb] = label.color;
    let text_color = Color32::from_rgb(cr, cg, cb);
    let font = FontId::proportional(glyph_px);
    let galley = match label.max_width {
        Some(width) => painter.layout(label.text.clone(), font, text_color, width * px_per_meter),
        None => painter.layout_no_wrap(label.text.clone(), font, text_color),
    };

    let half = galley.size() * 0.5;
    let rotation = egui::emath::Rot2::from_angle(angle);
    let pos = a - rotation * half;
    painter.add(TextShape::new(pos, galley, text_color).with_angle(angle));
}
