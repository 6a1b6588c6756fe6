//! Properties panel for the selected placement

use egui::Ui;
use shared::PlacedFurniture;

use room_planner_lib::catalog::format_price;
use room_planner_lib::transform::CoordinateTransform;

use crate::i18n::t;
use crate::state::AppState;

/// Rotation steps offered as buttons (degrees)
const STEPS: [f64; 2] = [90.0, 15.0];

enum Action {
    Rotate(f64),
    Remove,
}

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.heading(t("prop.title"));
    ui.separator();

    let session = &state.session;
    let Some(placed) = session.store.selected() else {
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("prop.select_item"));
            ui.weak(t("prop.to_view"));
        });
        return;
    };

    show_placement(ui, placed, &session.transform);
    let id = placed.id.clone();

    ui.add_space(8.0);
    let mut action = None;
    ui.label(format!("{}:", t("prop.rotate")));
    for step in STEPS {
        ui.horizontal(|ui| {
            if ui.button(format!("↺ {step}°")).clicked() {
                action = Some(Action::Rotate(-step));
            }
            if ui.button(format!("↻ {step}°")).clicked() {
                action = Some(Action::Rotate(step));
            }
        });
    }
    ui.add_space(6.0);
    if ui
        .button(egui::RichText::new(t("prop.remove")).color(egui::Color32::from_rgb(220, 80, 80)))
        .clicked()
    {
        action = Some(Action::Remove);
    }

    match action {
        Some(Action::Rotate(delta)) => {
            state.session.store.rotate_placement(&id, delta);
        }
        Some(Action::Remove) => {
            state.session.store.remove_placement(&id);
        }
        None => {}
    }
}

fn show_placement(ui: &mut Ui, placed: &PlacedFurniture, transform: &CoordinateTransform) {
    let item = &placed.furniture;
    ui.strong(&item.name);
    ui.add_space(4.0);

    egui::Grid::new("placement_props")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label("ID:");
            ui.monospace(short_id(&placed.id));
            ui.end_row();

            ui.label(format!("{}:", t("prop.size")));
            ui.label(format!("{} mm", item.dimension_label()));
            ui.end_row();

            ui.label(format!("{}:", t("prop.position")));
            ui.label(format!(
                "{:.0}, {:.0} mm",
                transform.plane_to_mm(placed.x),
                transform.plane_to_mm(placed.y)
            ));
            ui.end_row();

            ui.label(format!("{}:", t("prop.rotation")));
            ui.label(format!("{:.0}°", placed.rotation));
            ui.end_row();

            if let Some(price) = format_price(item.price) {
                ui.label(format!("{}:", t("prop.price")));
                ui.label(price);
                ui.end_row();
            }
        });
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
