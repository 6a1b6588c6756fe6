use egui::Ui;

use room_planner_lib::texture::TextureCache;
use room_planner_lib::validation::LayoutValidator;

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &AppState, textures: Option<&TextureCache>) {
    let session = &state.session;
    ui.horizontal(|ui| {
        ui.weak(format!(
            "{}: {}×{} mm",
            t("status.room"),
            session.room.width,
            session.room.height
        ));
        ui.separator();
        ui.weak(format!("{}: {}", t("status.placed"), session.store.len()));
        ui.separator();

        if session.drag.is_dragging() {
            ui.colored_label(egui::Color32::YELLOW, t("status.dragging"));
        } else if let Some(placed) = session.store.selected() {
            ui.label(format!("{}: {}", t("status.selected"), placed.furniture.name));
        } else {
            ui.weak(t("status.ready"));
        }

        let outside = LayoutValidator::new(session).out_of_room().len();
        if outside > 0 {
            ui.separator();
            ui.colored_label(
                egui::Color32::from_rgb(255, 200, 100),
                format!("{}: {outside}", t("status.out_of_room")),
            );
        }

        if let Some(pending) = textures.map(|c| c.pending_count()).filter(|n| *n > 0) {
            ui.separator();
            ui.weak(format!("{} ({pending})", t("status.loading_textures")));
        }

        // Right-aligned version
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.weak(concat!("Room Planner v", env!("CARGO_PKG_VERSION")));
        });
    });
}
