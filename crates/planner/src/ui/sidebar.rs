//! Catalog sidebar: category buttons and draggable item cards

use egui::{Color32, Ui};

use room_planner_lib::catalog::{dimension_caption, format_price, placeholder_fraction, CategoryIcon};
use room_planner_lib::drag::DragPayload;
use room_planner_lib::texture::TextureCache;
use shared::FurnitureItem;

use crate::i18n::t;
use crate::state::AppState;
use crate::viewport::textures::TextureHandles;

const THUMB_SIZE: f32 = 56.0;

pub fn show(
    ui: &mut Ui,
    state: &mut AppState,
    mut textures: Option<&mut TextureCache>,
    handles: &TextureHandles,
) {
    ui.heading(t("sidebar.categories"));
    ui.add_space(4.0);

    let mut clicked_category = None;
    ui.horizontal_wrapped(|ui| {
        let catalog = &state.session.catalog;
        for category in catalog.categories() {
            let selected = catalog.selected_category() == Some(category.id.as_str());
            let icon = CategoryIcon::from_slug(&category.slug);
            if ui
                .selectable_label(selected, format!("{} {}", icon.glyph(), category.name))
                .clicked()
            {
                clicked_category = Some(category.id.clone());
            }
        }
    });
    if let Some(id) = clicked_category {
        state.session.catalog.select_category(&id);
    }

    ui.separator();
    ui.horizontal(|ui| {
        ui.strong(t("sidebar.items"));
        ui.weak(format!("({})", state.session.catalog.items().len()));
    });
    ui.weak(t("sidebar.drag_hint"));
    ui.add_space(4.0);

    if state.session.catalog.items().is_empty() {
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            ui.weak(t("sidebar.empty"));
        });
        return;
    }

    egui::ScrollArea::vertical()
        .id_salt("catalog_items")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let session = &mut state.session;
            for item in session.catalog.items() {
                let thumbnail = item.thumbnail_ref().and_then(|reference| {
                    if let Some(cache) = textures.as_mut() {
                        cache.request(reference);
                    }
                    handles.id(reference)
                });

                let id = egui::Id::new(("catalog_item", item.id.as_str()));
                let payload = DragPayload::encode(item);
                let inner = ui.dnd_drag_source(id, payload, |ui| item_card(ui, item, thumbnail));
                if inner.response.drag_started() {
                    session.drag.begin(item);
                }
                inner.response.on_hover_text(item.dimension_label());
                ui.add_space(2.0);
            }
        });
}

fn item_card(ui: &mut Ui, item: &FurnitureItem, thumbnail: Option<egui::TextureId>) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(4))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                match thumbnail {
                    Some(texture_id) => {
                        ui.add(egui::Image::new((texture_id, egui::vec2(THUMB_SIZE, THUMB_SIZE))));
                    }
                    None => placeholder(ui, item),
                }
                ui.vertical(|ui| {
                    ui.strong(&item.name);
                    ui.weak(dimension_caption(item));
                    if let Some(price) = format_price(item.price) {
                        ui.label(price);
                    }
                });
            });
        });
}

/// Colored box sized in proportion to the item footprint
fn placeholder(ui: &mut Ui, item: &FurnitureItem) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(THUMB_SIZE, THUMB_SIZE), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 3.0, Color32::from_gray(236));

    let (fw, fh) = placeholder_fraction(item);
    let inner = egui::Rect::from_center_size(
        rect.center(),
        egui::vec2(rect.width() * fw, rect.height() * fh),
    );
    let [r, g, b] = item.rgb();
    painter.rect_filled(inner, 2.0, Color32::from_rgb(r, g, b));
}
