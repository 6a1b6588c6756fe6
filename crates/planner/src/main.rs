mod app;
pub mod i18n;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state` etc. resolve to the lib
// crate types everywhere in the binary.
pub use room_planner_lib::state;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use room_planner_lib::catalog::JsonCatalog;
use room_planner_lib::config::PlannerConfig;
use room_planner_lib::session::PlannerSession;
use room_planner_lib::state::CatalogBrowser;
use shared::RoomDimensions;

use app::PlannerApp;

/// Command-line options
#[derive(Default)]
struct Args {
    catalog: Option<PathBuf>,
    room: Option<RoomDimensions>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "room_planner=info,room_planner_lib=info".into()),
        )
        .init();

    let args = parse_args();

    let config = match PlannerConfig::load().validated() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid planner config, using defaults: {e}");
            PlannerConfig::default()
        }
    };

    let (catalog, thumbnail_dir) = match args.catalog.as_deref() {
        Some(path) => load_catalog(path),
        None => (CatalogBrowser::default(), None),
    };
    let session = PlannerSession::with_room(
        Arc::new(config),
        args.room.unwrap_or_default(),
        catalog,
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Room Planner")
            .with_inner_size([1500.0, 900.0])
            .with_min_inner_size([900.0, 560.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "room-planner",
        native_options,
        Box::new(move |cc| Ok(Box::new(PlannerApp::new(cc, session, thumbnail_dir)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

/// Catalog from a JSON file, or the bundled one if it cannot be read
fn load_catalog(path: &Path) -> (CatalogBrowser, Option<PathBuf>) {
    match JsonCatalog::from_path(path) {
        Ok(catalog) => (
            CatalogBrowser::new(Box::new(catalog)),
            path.parent().map(Path::to_path_buf),
        ),
        Err(e) => {
            tracing::error!("Failed to load catalog {}: {e}", path.display());
            (CatalogBrowser::default(), None)
        }
    }
}

fn parse_args() -> Args {
    let mut parsed = Args::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => parsed.catalog = args.next().map(PathBuf::from),
            "--room" => match args.next() {
                Some(text) => {
                    parsed.room = RoomDimensions::parse(&text);
                    if parsed.room.is_none() {
                        tracing::warn!("Ignoring --room {text}: expected <width>x<height> in mm");
                    }
                }
                None => tracing::warn!("--room needs a value like 5000x4000"),
            },
            other => tracing::warn!("Unknown argument {other}"),
        }
    }
    parsed
}
