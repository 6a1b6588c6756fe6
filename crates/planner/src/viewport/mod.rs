//! 3D room view and the 2D floor plan

pub mod plan;
mod renderer;
pub mod textures;

use egui::Ui;

use room_planner_lib::drag::DragPayload;
use room_planner_lib::scene::{CameraSetup, OrbitRig, SceneCache};
use room_planner_lib::session::PlannerSession;
use room_planner_lib::texture::{FlatTextures, TextureCache};

use crate::i18n::t;
use crate::state::AppState;
use textures::TextureHandles;

/// Degrees of orbit per dragged pixel
const ROTATE_SPEED: f32 = 0.4;
/// Zoom fraction per scrolled point
const ZOOM_SPEED: f32 = 0.0015;

/// 3D viewport panel drawing the scene graph with egui's painter
pub struct ViewportPanel {
    rig: OrbitRig,
    scene_cache: SceneCache,
}

impl ViewportPanel {
    pub fn new(session: &PlannerSession) -> Self {
        let setup = CameraSetup::for_room(&session.room, &session.config.camera, &session.transform);
        Self {
            rig: OrbitRig::new(setup),
            scene_cache: SceneCache::new(),
        }
    }

    pub fn reset_camera(&mut self) {
        self.rig.reset();
    }

    /// Force a rebuild on the next frame
    pub fn invalidate(&mut self) {
        self.scene_cache.invalidate();
    }

    pub fn show(
        &mut self,
        ui: &mut Ui,
        state: &mut AppState,
        textures: Option<&mut TextureCache>,
        handles: &TextureHandles,
    ) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        // ── Orbit / pan / zoom ──────────────────────────────
        let delta = response.drag_delta();
        if response.dragged_by(egui::PointerButton::Primary) {
            self.rig.rotate(delta.x * ROTATE_SPEED, delta.y * ROTATE_SPEED);
        } else if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.rig.pan(delta.x, delta.y);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.rig.zoom(scroll * ZOOM_SPEED);
            }
        }

        // ── Drop from the catalog onto the floor ────────────
        if let Some(payload) = response.dnd_release_payload::<DragPayload>() {
            if let Some(pos) = ui.input(|i| i.pointer.interact_pos()) {
                let ray = self.rig.screen_ray(pos, rect);
                let session = &mut state.session;
                match session.transform.floor_point(&ray) {
                    Some(at) => {
                        session.drag.place(&payload, at, &session.catalog, &mut session.store);
                    }
                    None => session.drag.cancel(),
                }
            }
        }

        // ── Click selection against the last built scene ────
        if response.clicked() {
            if let (Some(pos), Some(scene)) = (response.interact_pointer_pos(), self.scene_cache.scene()) {
                let ray = self.rig.screen_ray(pos, rect);
                let picked = scene.pick(&ray);
                state.session.store.select(picked.as_deref());
            }
        }

        // ── Scene ───────────────────────────────────────────
        let session = &state.session;
        let scene = match textures {
            Some(textures) => self.scene_cache.get_or_build(
                &session.room,
                &session.store,
                &session.config,
                textures,
            ),
            None => self.scene_cache.get_or_build_with(
                &session.room,
                &session.store,
                &session.config,
                &mut FlatTextures,
                0,
            ),
        };

        self.rig.set_setup(scene.camera.clone());
        if self.rig.update() {
            ui.ctx().request_repaint();
        }

        if !ui.is_rect_visible(rect) {
            return;
        }

        renderer::paint_scene(ui, rect, &self.rig, scene, handles, &state.settings.viewport);

        ui.painter_at(rect).text(
            rect.left_bottom() + egui::vec2(8.0, -6.0),
            egui::Align2::LEFT_BOTTOM,
            t("view3d.hint"),
            egui::FontId::proportional(11.0),
            egui::Color32::from_gray(120),
        );
    }
}
