//! Application menu bar and settings window

use std::path::PathBuf;

use eframe::egui;

use room_planner_lib::state::{AppSettings, Language};

use crate::i18n::{lang, set_lang, t};
use crate::state::AppState;
use crate::viewport::plan::PlanView;
use crate::viewport::ViewportPanel;

/// Menu actions the app handles itself because they touch more than `AppState`
pub enum MenuAction {
    OpenCatalog(PathBuf),
}

/// Show the file menu
pub fn file_menu(ui: &mut egui::Ui, state: &mut AppState) -> Option<MenuAction> {
    let mut action = None;
    ui.menu_button(t("menu.file"), |ui| {
        if ui.button(t("menu.open_catalog")).clicked() {
            ui.close_menu();
            if let Some(path) = rfd::FileDialog::new()
                .set_title(t("menu.open_catalog_title"))
                .add_filter("JSON", &["json"])
                .pick_file()
            {
                action = Some(MenuAction::OpenCatalog(path));
            }
        }
        if ui
            .add_enabled(
                !state.session.store.is_empty(),
                egui::Button::new(t("menu.reset_layout")),
            )
            .clicked()
        {
            state.session.reset();
            ui.close_menu();
        }
        ui.separator();
        if ui.button(t("menu.quit")).clicked() {
            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
    action
}

/// Show the view menu
pub fn view_menu(
    ui: &mut egui::Ui,
    state: &mut AppState,
    viewport: &mut ViewportPanel,
    plan: &mut PlanView,
) {
    ui.menu_button(t("menu.view"), |ui| {
        ui.checkbox(&mut state.panels.sidebar, t("menu.sidebar"));
        ui.checkbox(&mut state.panels.properties, t("menu.properties"));
        ui.checkbox(&mut state.panels.plan, t("menu.plan"));
        ui.checkbox(&mut state.panels.placement_table, t("menu.placement_table"));
        ui.separator();
        if ui.button(t("menu.reset_camera")).clicked() {
            viewport.reset_camera();
            plan.reset_pan();
            ui.close_menu();
        }
        ui.separator();
        ui.menu_button(t("menu.language"), |ui| {
            for &language in Language::all() {
                if ui
                    .selectable_label(lang() == language, language.display_name())
                    .clicked()
                {
                    set_language(state, language);
                    ui.close_menu();
                }
            }
        });
    });
}

/// Show the settings menu
pub fn settings_menu(ui: &mut egui::Ui, state: &mut AppState) {
    ui.menu_button(t("menu.settings"), |ui| {
        if ui.button(t("menu.preferences")).clicked() {
            state.show_settings_window = true;
            ui.close_menu();
        }
    });
}

fn set_language(state: &mut AppState, language: Language) {
    set_lang(language);
    state.settings.language = language;
    state.settings.save();
}

/// Show the settings window
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_settings_window;
    egui::Window::new(t("settings.title"))
        .open(&mut open)
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                show_ui_settings(ui, state);
                show_plan_settings(ui, state);
                show_viewport_settings(ui, state);
                show_settings_buttons(ui, state);
            });
        });
    state.show_settings_window = open;
}

fn show_ui_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.ui"));
    ui.horizontal(|ui| {
        ui.label(t("settings.language"));
        let current = state.settings.language;
        egui::ComboBox::from_id_salt("language_combo")
            .selected_text(current.display_name())
            .show_ui(ui, |ui| {
                for &language in Language::all() {
                    if ui
                        .selectable_label(current == language, language.display_name())
                        .clicked()
                    {
                        set_lang(language);
                        state.settings.language = language;
                    }
                }
            });
    });
    ui.horizontal(|ui| {
        ui.label(t("settings.font_size"));
        ui.add(
            egui::DragValue::new(&mut state.settings.ui.font_size)
                .speed(0.5)
                .range(8.0..=24.0)
                .suffix(" pt"),
        );
    });
    ui.add_space(10.0);
}

fn show_plan_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.plan"));
    let plan = &mut state.settings.plan;
    ui.checkbox(&mut plan.grid_visible, t("settings.plan_grid"));
    ui.horizontal(|ui| {
        ui.label(t("settings.grid_opacity"));
        ui.add(egui::Slider::new(&mut plan.grid_opacity, 0.0..=1.0));
    });
    ui.checkbox(&mut plan.show_names, t("settings.show_names"));
    ui.add_space(10.0);
}

fn show_viewport_settings(ui: &mut egui::Ui, state: &mut AppState) {
    ui.heading(t("settings.viewport"));
    let viewport = &mut state.settings.viewport;
    ui.horizontal(|ui| {
        ui.label(t("settings.background"));
        let [r, g, b] = viewport.background_color;
        let mut color = egui::Color32::from_rgb(r, g, b);
        if ui.color_edit_button_srgba(&mut color).changed() {
            viewport.background_color = [color.r(), color.g(), color.b()];
        }
    });
    ui.checkbox(&mut viewport.grid_visible, t("settings.floor_grid"));
    ui.checkbox(&mut viewport.labels_visible, t("settings.labels"));
    ui.add_space(10.0);
}

fn show_settings_buttons(ui: &mut egui::Ui, state: &mut AppState) {
    ui.separator();
    ui.horizontal(|ui| {
        if ui.button(t("settings.apply")).clicked() {
            state.settings.save();
        }
        if ui.button(t("settings.reset")).clicked() {
            state.settings = AppSettings::default();
            set_lang(state.settings.language);
        }
        if ui.button(t("settings.close")).clicked() {
            state.show_settings_window = false;
        }
    });
}
