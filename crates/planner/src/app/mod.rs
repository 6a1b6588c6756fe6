//! Main application module

mod keyboard;
mod menus;
mod styles;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use room_planner_lib::catalog::JsonCatalog;
use room_planner_lib::session::PlannerSession;
use room_planner_lib::texture::{HttpThumbnailLoader, TextureCache};

use crate::i18n::{set_lang, t};
use crate::state::{AppSettings, AppState};
use crate::ui::{placement_table, properties, sidebar, status_bar};
use crate::viewport::plan::PlanView;
use crate::viewport::textures::TextureHandles;
use crate::viewport::ViewportPanel;
use menus::MenuAction;

/// Main application
pub struct PlannerApp {
    state: AppState,
    viewport: ViewportPanel,
    plan: PlanView,
    /// `None` when the loader runtime could not start; boxes stay flat
    textures: Option<TextureCache>,
    handles: TextureHandles,
    /// Last applied font size (to detect changes)
    last_font_size: f32,
}

/// Texture cache whose finished loads wake the UI
fn texture_cache(ctx: &egui::Context, base_dir: Option<PathBuf>) -> Option<TextureCache> {
    let loader = match HttpThumbnailLoader::new(base_dir) {
        Ok(loader) => loader,
        Err(e) => {
            tracing::error!("Thumbnail loader unavailable: {e}");
            return None;
        }
    };
    match TextureCache::new(Arc::new(loader)) {
        Ok(mut cache) => {
            let ctx = ctx.clone();
            cache.set_on_ready(move |event| {
                tracing::debug!("Thumbnail {} settled (ready: {})", event.reference, event.ready);
                ctx.request_repaint();
            });
            Some(cache)
        }
        Err(e) => {
            tracing::error!("Texture cache unavailable: {e}");
            None
        }
    }
}

impl PlannerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        session: PlannerSession,
        thumbnail_dir: Option<PathBuf>,
    ) -> Self {
        let settings = AppSettings::load();
        set_lang(settings.language);

        // Apply initial styles with font size from settings
        styles::configure_styles(&cc.egui_ctx, settings.ui.font_size);

        let viewport = ViewportPanel::new(&session);
        let last_font_size = settings.ui.font_size;

        Self {
            state: AppState::new(session, settings),
            viewport,
            plan: PlanView::new(),
            textures: texture_cache(&cc.egui_ctx, thumbnail_dir),
            handles: TextureHandles::default(),
            last_font_size,
        }
    }

    fn open_catalog(&mut self, ctx: &egui::Context, path: &Path) {
        match JsonCatalog::from_path(path) {
            Ok(catalog) => {
                if catalog.item_count() == 0 {
                    tracing::warn!("Catalog {} has no usable items", path.display());
                }
                self.state.session.catalog.set_source(Box::new(catalog));
                // Relative thumbnails resolve against the new catalog's folder
                self.textures = texture_cache(ctx, path.parent().map(Path::to_path_buf));
                self.handles = TextureHandles::default();
                self.viewport.invalidate();
            }
            Err(e) => tracing::error!("Failed to open catalog {}: {e}", path.display()),
        }
    }

    fn poll_textures(&mut self, ctx: &egui::Context) {
        let Some(textures) = self.textures.as_mut() else {
            return;
        };
        let events = textures.poll();
        self.handles.upload(ctx, textures, &events);
        if textures.pending_count() > 0 {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply font size if changed
        if self.state.settings.ui.font_size != self.last_font_size {
            styles::apply_font_size(ctx, self.state.settings.ui.font_size);
            self.last_font_size = self.state.settings.ui.font_size;
        }

        self.poll_textures(ctx);
        keyboard::handle_keyboard(ctx, &mut self.state);

        // ── Menu bar ──────────────────────────────────────────
        let mut action = None;
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                action = menus::file_menu(ui, &mut self.state);
                menus::view_menu(ui, &mut self.state, &mut self.viewport, &mut self.plan);
                menus::settings_menu(ui, &mut self.state);
            });
        });
        if let Some(MenuAction::OpenCatalog(path)) = action {
            self.open_catalog(ctx, &path);
        }

        // ── Settings window ──────────────────────────────────
        menus::settings_window(ctx, &mut self.state);

        // ── Status bar ───────────────────────────────────────
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(22.0)
            .frame(
                egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::symmetric(8, 2)),
            )
            .show(ctx, |ui| {
                status_bar::show(ui, &self.state, self.textures.as_ref());
            });

        // ── Left panel: catalog ──────────────────────────────
        if self.state.panels.sidebar {
            egui::SidePanel::left("catalog_sidebar")
                .default_width(240.0)
                .width_range(180.0..=420.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    sidebar::show(ui, &mut self.state, self.textures.as_mut(), &self.handles);
                });
        }

        // ── Right panel: properties + placement list ─────────
        if self.state.panels.properties || self.state.panels.placement_table {
            egui::SidePanel::right("right_panel")
                .default_width(240.0)
                .width_range(180.0..=480.0)
                .resizable(true)
                .frame(
                    egui::Frame::side_top_panel(&ctx.style()).inner_margin(egui::Margin::same(6)),
                )
                .show(ctx, |ui| {
                    if self.state.panels.properties {
                        properties::show(ui, &mut self.state);
                    }
                    if self.state.panels.placement_table {
                        ui.add_space(8.0);
                        ui.separator();
                        placement_table::show(ui, &mut self.state);
                    }
                });
        }

        // ── Floor plan ───────────────────────────────────────
        if self.state.panels.plan {
            egui::SidePanel::left("plan_view")
                .default_width(560.0)
                .width_range(240.0..=1200.0)
                .resizable(true)
                .frame(egui::Frame::NONE)
                .show(ctx, |ui| {
                    ui.add_space(2.0);
                    ui.horizontal(|ui| {
                        ui.add_space(6.0);
                        ui.strong(t("plan.title"));
                    });
                    self.plan.show(ui, &mut self.state);
                });
        }

        // ── Central panel: 3D view ───────────────────────────
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                self.viewport
                    .show(ui, &mut self.state, self.textures.as_mut(), &self.handles);
            });

        // Released somewhere that is not the plan: the payload is gone
        if self.state.session.drag.is_dragging() && !egui::DragAndDrop::has_any_payload(ctx) {
            self.state.session.drag.cancel();
        }
    }

    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        self.state.settings.save();
    }
}
