//! Application settings

use serde::{Deserialize, Serialize};

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    Korean,
    English,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Korean => "한국어",
            Language::English => "English",
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::Korean, Language::English]
    }
}

/// Plan view display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanViewSettings {
    /// Show the floor grid
    pub grid_visible: bool,
    /// Grid line opacity (0.0 - 1.0)
    pub grid_opacity: f32,
    /// Show item names inside footprints
    pub show_names: bool,
}

impl Default for PlanViewSettings {
    fn default() -> Self {
        Self {
            grid_visible: true,
            grid_opacity: 0.6,
            show_names: true,
        }
    }
}

/// 3D view settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Background color RGB
    pub background_color: [u8; 3],
    /// Draw the floor grid
    pub grid_visible: bool,
    /// Draw furniture labels
    pub labels_visible: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            background_color: [0xf0, 0xf0, 0xeb],
            grid_visible: true,
            labels_visible: true,
        }
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self { font_size: 14.0 }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub plan: PlanViewSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

impl AppSettings {
    fn settings_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "room-planner", "room-planner")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("Ignoring settings file {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to file
    pub fn save(&self) {
        let Some(path) = Self::settings_path() else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!("Cannot create config dir {}: {e}", dir.display());
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!("Failed to save settings: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize settings: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sections_default() {
        let settings: AppSettings = serde_json::from_str(r#"{"language": "English"}"#).unwrap();
        assert_eq!(settings.language, Language::English);
        assert!(settings.plan.grid_visible);
        assert_eq!(settings.ui.font_size, 14.0);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut settings = AppSettings::default();
        settings.viewport.labels_visible = false;
        let json = serde_json::to_string(&settings).unwrap();
        let back: AppSettings = serde_json::from_str(&json).unwrap();
        assert!(!back.viewport.labels_visible);
        assert_eq!(back.language, Language::Korean);
    }
}
