use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::renderer::{LaneColoring, RenderConfig, Stroke};
use crate::ui::theme;

/// User settings, stored as JSON
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Height of one commit row in pixels; text is half as tall
    pub row_height: i32,
    /// Wrap width for commit subjects, 0 for unbounded
    pub text_max_width: f32,
    /// Wrap width for ref labels, 0 for unbounded
    pub label_max_width: f32,
    /// Space after each label
    pub label_margin: i32,
    pub label_outline: bool,
    /// Color lanes from the theme palette instead of a single color
    pub lane_palette: bool,
    pub max_commits: usize,
    pub font_path: Option<PathBuf>,
}

/// Fonts tried when none is configured
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/Roboto-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

impl Default for Settings {
    fn default() -> Self {
        Self {
            row_height: 20,
            text_max_width: 0.0,
            label_max_width: 0.0,
            label_margin: 2,
            label_outline: true,
            lane_palette: false,
            max_commits: 1000,
            font_path: None,
        }
    }
}

impl Settings {
    fn config_dir() -> Option<PathBuf> {
        std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".config").join("history-graph"))
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("settings.json"))
    }

    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("ignoring settings: {e}");
                Self::default()
            }
        }
    }

    /// Load from an explicit file; missing fields take their defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save(&self) {
        let Some(path) = Self::default_path() else {
            return;
        };
        if let Err(e) = self.save_to(&path) {
            tracing::error!("failed to save settings: {e}");
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| Error::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Renderer configuration for these settings
    pub fn render_config(&self) -> RenderConfig {
        let outline = self
            .label_outline
            .then(|| Stroke::new(theme::LABEL_OUTLINE, 1.0));
        let lanes = if self.lane_palette {
            LaneColoring::palette()
        } else {
            LaneColoring::default()
        };
        RenderConfig::new(self.row_height)
            .with_text_max_width(self.text_max_width)
            .with_label_max_width(self.label_max_width)
            .with_label_margin(self.label_margin)
            .with_label_outline(outline)
            .with_lane_coloring(lanes)
    }

    /// The configured font, or the first fallback present on this system
    pub fn resolve_font(&self) -> Option<PathBuf> {
        if let Some(path) = &self.font_path {
            return Some(path.clone());
        }
        FALLBACK_FONTS
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_render_config() {
        let settings = Settings::default();
        assert_eq!(settings.render_config(), RenderConfig::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "row_height": 30, "lane_palette": true }"#).unwrap();
        assert_eq!(settings.row_height, 30);
        assert!(settings.lane_palette);
        assert_eq!(settings.label_margin, 2);
        assert_eq!(settings.max_commits, 1000);

        let config = settings.render_config();
        assert!((config.font_size() - 15.0).abs() < 0.001);
        assert_eq!(config.lane_coloring(), &LaneColoring::palette());
    }

    #[test]
    fn test_outline_can_be_disabled() {
        let settings = Settings {
            label_outline: false,
            ..Settings::default()
        };
        assert_eq!(settings.render_config().label_outline(), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            row_height: 24,
            label_max_width: 80.0,
            font_path: Some(PathBuf::from("/fonts/mono.ttf")),
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "{ not json").unwrap();
        assert!(matches!(Settings::load_from(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_configured_font_wins() {
        let settings = Settings {
            font_path: Some(PathBuf::from("/nowhere/font.ttf")),
            ..Settings::default()
        };
        assert_eq!(settings.resolve_font(), Some(PathBuf::from("/nowhere/font.ttf")));
    }
}
