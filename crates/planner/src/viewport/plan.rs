//! Top-down floor plan: drop target for catalog items, selection and moves
//!
//! One plane unit is drawn as one point, so a pointer position maps to the
//! plane by subtracting the canvas origin and adding the pan offset.

use egui::{Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};
use kurbo::Point;

use room_planner_lib::drag::DragPayload;
use room_planner_lib::session::PlannerSession;
use shared::{PlacementId, PlanePoint};

use crate::i18n::t;
use crate::state::AppState;

/// Gap between the panel edge and the room corner at zero pan
const MARGIN: f32 = 24.0;
const DROP_ACCENT: Color32 = Color32::from_rgb(0x00, 0x58, 0xa3);

#[derive(Default)]
pub struct PlanView {
    pan: Vec2,
    /// Placement being dragged across the plan
    moving: Option<PlacementId>,
}

fn plane_point(pos: Pos2) -> PlanePoint {
    PlanePoint::new(pos.x as f64, pos.y as f64)
}

impl PlanView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset_pan(&mut self) {
        self.pan = Vec2::ZERO;
    }

    fn origin(rect: Rect) -> Pos2 {
        rect.min + egui::vec2(MARGIN, MARGIN)
    }

    fn to_screen(&self, origin: Pos2, p: Point) -> Pos2 {
        egui::pos2(
            origin.x + p.x as f32 - self.pan.x,
            origin.y + p.y as f32 - self.pan.y,
        )
    }

    fn to_plane(&self, origin: Pos2, pos: Pos2) -> Point {
        Point::new(
            (pos.x - origin.x + self.pan.x) as f64,
            (pos.y - origin.y + self.pan.y) as f64,
        )
    }

    /// Topmost placement under a plane point
    fn hit(session: &PlannerSession, point: Point) -> Option<PlacementId> {
        session
            .store
            .placements()
            .iter()
            .rev()
            .find(|p| session.transform.footprint(p).contains(point))
            .map(|p| p.id.clone())
    }

    pub fn show(&mut self, ui: &mut Ui, state: &mut AppState) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let origin = Self::origin(rect);

        // ── Drop from the catalog ───────────────────────────
        let drop_hovered = response.dnd_hover_payload::<DragPayload>().is_some();
        if let Some(payload) = response.dnd_release_payload::<DragPayload>() {
            if let Some(pointer) = ui.input(|i| i.pointer.interact_pos()) {
                let session = &mut state.session;
                let pan = PlanePoint::new(self.pan.x as f64, self.pan.y as f64);
                session.drag.drop(
                    &payload,
                    plane_point(pointer),
                    plane_point(origin),
                    pan,
                    &session.catalog,
                    &mut session.store,
                );
            }
        }

        // ── Select and move ─────────────────────────────────
        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                self.moving = Self::hit(&state.session, self.to_plane(origin, pos));
                if let Some(id) = &self.moving {
                    state.session.store.select(Some(id.as_str()));
                }
            }
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(id) = &self.moving {
                let delta = response.drag_delta();
                if delta != Vec2::ZERO {
                    state
                        .session
                        .store
                        .translate_placement(id, delta.x as f64, delta.y as f64);
                }
            }
        }
        if response.drag_stopped() {
            self.moving = None;
        }
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan -= response.drag_delta();
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let hit = Self::hit(&state.session, self.to_plane(origin, pos));
                state.session.store.select(hit.as_deref());
            }
        }

        if !ui.is_rect_visible(rect) {
            return;
        }
        self.paint(ui, rect, origin, state, drop_hovered);
    }

    fn paint(&self, ui: &Ui, rect: Rect, origin: Pos2, state: &AppState, drop_hovered: bool) {
        let painter = ui.painter_at(rect);
        let session = &state.session;
        let config = &session.config;
        let settings = &state.settings.plan;

        painter.rect_filled(rect, 0.0, Color32::from_rgb(0xfa, 0xfa, 0xf7));

        // Room
        let (w, h) = session.room_plane_size();
        let room_rect = Rect::from_min_max(
            self.to_screen(origin, Point::ZERO),
            self.to_screen(origin, Point::new(w, h)),
        );
        let [fr, fg, fb] = config.palette.floor;
        painter.rect_filled(room_rect, 0.0, Color32::from_rgb(fr, fg, fb));

        if settings.grid_visible {
            let step = session.transform.meters_to_plane(config.grid.cell as f64) as f32;
            if step > 2.0 {
                let alpha = (settings.grid_opacity.clamp(0.0, 1.0) * 255.0) as u8;
                let [gr, gg, gb] = config.palette.grid_cell;
                let stroke = Stroke::new(0.5, Color32::from_rgba_unmultiplied(gr, gg, gb, alpha));
                let mut x = room_rect.left() + step;
                while x < room_rect.right() {
                    painter.line_segment(
                        [egui::pos2(x, room_rect.top()), egui::pos2(x, room_rect.bottom())],
                        stroke,
                    );
                    x += step;
                }
                let mut y = room_rect.top() + step;
                while y < room_rect.bottom() {
                    painter.line_segment(
                        [egui::pos2(room_rect.left(), y), egui::pos2(room_rect.right(), y)],
                        stroke,
                    );
                    y += step;
                }
            }
        }

        let [wr, wg, wb] = config.palette.wall;
        painter.rect_stroke(
            room_rect,
            0.0,
            Stroke::new(3.0, Color32::from_rgb(wr, wg, wb)),
            egui::StrokeKind::Outside,
        );

        // Footprints
        for placed in session.store.placements() {
            let footprint = session.transform.footprint(placed);
            let points: Vec<Pos2> = footprint
                .corners()
                .iter()
                .map(|c| self.to_screen(origin, *c))
                .collect();
            let [r, g, b] = placed.furniture.rgb();
            let style = if session.store.is_selected(&placed.id) {
                config.outline.selected
            } else {
                config.outline.normal
            };
            let [sr, sg, sb] = style.color;
            painter.add(Shape::convex_polygon(
                points,
                Color32::from_rgba_unmultiplied(r, g, b, 220),
                Stroke::new(style.width, Color32::from_rgb(sr, sg, sb)),
            ));

            if settings.show_names {
                painter.text(
                    self.to_screen(origin, footprint.center()),
                    egui::Align2::CENTER_CENTER,
                    &placed.furniture.name,
                    FontId::proportional(11.0),
                    Color32::from_gray(40),
                );
            }
        }

        if drop_hovered {
            painter.rect_stroke(
                room_rect.expand(2.0),
                4.0,
                Stroke::new(2.0, DROP_ACCENT),
                egui::StrokeKind::Outside,
            );
            painter.text(
                rect.center_top() + egui::vec2(0.0, 6.0),
                egui::Align2::CENTER_TOP,
                t("plan.drop_here"),
                FontId::proportional(12.0),
                DROP_ACCENT,
            );
        }
    }
}
