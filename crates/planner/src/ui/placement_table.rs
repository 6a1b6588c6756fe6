//! Table of every placement; clicking a row selects it

use egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::i18n::t;
use crate::state::AppState;

pub fn show(ui: &mut Ui, state: &mut AppState) {
    ui.strong(t("prop.placements"));
    let session = &state.session;
    if session.store.is_empty() {
        ui.weak(t("prop.no_placements"));
        return;
    }

    let mut clicked = None;
    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 4.0;
    TableBuilder::new(ui)
        .id_salt("placement_table")
        .striped(true)
        .sense(egui::Sense::click())
        .column(Column::remainder().at_least(80.0))
        .column(Column::auto().at_least(48.0))
        .column(Column::auto().at_least(48.0))
        .column(Column::auto().at_least(36.0))
        .header(row_height, |mut header| {
            header.col(|ui| {
                ui.strong(t("prop.name"));
            });
            header.col(|ui| {
                ui.strong("x");
            });
            header.col(|ui| {
                ui.strong("y");
            });
            header.col(|ui| {
                ui.strong("°");
            });
        })
        .body(|mut body| {
            for placed in session.store.placements() {
                body.row(row_height, |mut row| {
                    row.set_selected(session.store.is_selected(&placed.id));
                    row.col(|ui| {
                        ui.label(&placed.furniture.name);
                    });
                    row.col(|ui| {
                        ui.monospace(format!("{:.0}", placed.x));
                    });
                    row.col(|ui| {
                        ui.monospace(format!("{:.0}", placed.y));
                    });
                    row.col(|ui| {
                        ui.monospace(format!("{:.0}", placed.rotation));
                    });
                    if row.response().clicked() {
                        clicked = Some(placed.id.clone());
                    }
                });
            }
        });

    if let Some(id) = clicked {
        state.session.store.select(Some(&id));
    }
}
