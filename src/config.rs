//! Configuration: the branding a plan is rendered with, and where the generator
//! finds its assets and puts its output.

use crate::colour::{colours, Colour};
use crate::pagesize::Paper;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default location of the vector logo painted in the first page's header
pub const DEFAULT_LOGO: &str = "assets/logo.svg";
/// Default location of the raster painted behind every page
pub const DEFAULT_BACKGROUND: &str = "assets/background.png";

/// Branding and styling applied to every generated document. The defaults reproduce
/// the G-FORCE house style; any subset can be overridden from a JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub paper: Paper,
    /// Headings, table labels, rules and footer
    pub accent: Colour,
    /// Solid colour painted under the background image and in the header bar
    pub page_colour: Colour,
    /// Table values and paragraphs
    pub text_colour: Colour,
    /// Line under the logo on the first page
    pub subtitle: String,
    /// Appended to the trainer credit in the footer
    pub tagline: String,
    /// Opacity of the background image, 0.0 to 1.0
    pub background_opacity: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            paper: Paper::A4,
            accent: colours::LIME_GREEN,
            page_colour: colours::BLACK,
            text_colour: colours::WHITE,
            subtitle: "Your Personalized G-FORCE Diet Plan.".into(),
            tagline: "Fuel Your Power".into(),
            background_opacity: 0.12,
        }
    }
}

impl RenderSettings {
    pub fn from_json(json: &str) -> Result<RenderSettings, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Paths used by the command line generator, read from `DIETPLAN_*` environment
/// variables (a `.env` file is honoured). Command line flags take precedence.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct AppConfig {
    pub logo: Option<PathBuf>,
    pub background: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// JSON file with [RenderSettings] overrides
    pub settings: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<AppConfig, envy::Error> {
        dotenvy::dotenv().ok();
        envy::prefixed("DIETPLAN_").from_env::<AppConfig>()
    }

    pub fn logo_path(&self) -> &Path {
        self.logo.as_deref().unwrap_or(Path::new(DEFAULT_LOGO))
    }

    pub fn background_path(&self) -> &Path {
        self.background
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_BACKGROUND))
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or(Path::new("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_keep_defaults() {
        let settings = RenderSettings::from_json(
            r#"{ "tagline": "Train Hard", "paper": "letter", "accent": { "r": 1.0, "g": 0.0, "b": 0.0 } }"#,
        )
        .unwrap();
        assert_eq!(settings.tagline, "Train Hard");
        assert_eq!(settings.paper, Paper::Letter);
        assert_eq!(settings.accent, Colour::new_rgb(1.0, 0.0, 0.0));
        assert_eq!(settings.subtitle, RenderSettings::default().subtitle);
        assert_eq!(settings.background_opacity, 0.12);
    }

    #[test]
    fn prefixed_environment_variables_fill_paths() {
        let config: AppConfig = envy::prefixed("DIETPLAN_")
            .from_iter(vec![
                ("DIETPLAN_LOGO".to_string(), "brand/logo.svg".to_string()),
                ("DIETPLAN_OUTPUT_DIR".to_string(), "out".to_string()),
                ("UNRELATED".to_string(), "x".to_string()),
            ])
            .unwrap();
        assert_eq!(config.logo_path(), Path::new("brand/logo.svg"));
        assert_eq!(config.background_path(), Path::new(DEFAULT_BACKGROUND));
        assert_eq!(config.output_dir(), Path::new("out"));
    }
}
