pub mod catalog;
pub mod placement;
pub mod selection;
pub mod settings;

pub use catalog::CatalogBrowser;
pub use placement::PlacementStore;
pub use settings::{AppSettings, Language};

use crate::session::PlannerSession;

/// Panel visibility flags
pub struct PanelVisibility {
    pub sidebar: bool,
    pub properties: bool,
    pub plan: bool,
    pub placement_table: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self {
            sidebar: true,
            properties: true,
            plan: true,
            placement_table: false,
        }
    }
}

/// Combined application state
pub struct AppState {
    pub session: PlannerSession,
    pub panels: PanelVisibility,
    pub settings: AppSettings,
    /// Show settings window
    pub show_settings_window: bool,
}

impl AppState {
    pub fn new(session: PlannerSession, settings: AppSettings) -> Self {
        Self {
            session,
            panels: PanelVisibility::default(),
            settings,
            show_settings_window: false,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PlannerSession::default(), AppSettings::load())
    }
}
