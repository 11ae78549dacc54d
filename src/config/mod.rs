//! Configuration file support for sketchboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/sketchboard/config.toml`. Settings include tool style defaults,
//! arrowhead sizing, eraser size, brush stroke shaping, history depth and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ArrowLengthMode, ColorSpec};
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{ArrowConfig, BrushConfig, DrawingConfig, EraserConfig, HistoryConfig};

use crate::draw::ElementSettings;
use crate::error::BoardError;
use crate::input::toolbox::{self, size_range};
use crate::input::{ToolKind, ToolStyleRegistry};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "brush"
/// stroke_color = "black"
/// brush_size = 2.0
/// font_size = 24.0
///
/// [arrow]
/// mode = "fixed"
/// length = 20.0
///
/// [eraser]
/// size = 20.0
///
/// [history]
/// limit = 0
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Tool style defaults (color, sizes, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Arrowhead sizing
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Eraser settings
    #[serde(default)]
    pub eraser: EraserConfig,

    /// Freehand stroke shaping
    #[serde(default)]
    pub brush: BrushConfig,

    /// Undo history settings
    #[serde(default)]
    pub history: HistoryConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by the
    /// default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `stroke_width`, `brush_size`: 1.0 - 20.0
    /// - `font_size`: 12.0 - 100.0
    /// - `eraser.size`: 5.0 - 50.0
    /// - `arrow.length`: 5.0 - 100.0
    /// - `arrow.factor`: 1.0 - 50.0
    /// - `brush.thinning`: -1.0 - 1.0
    /// - `brush.smoothing`, `brush.streamline`: 0.0 - 1.0
    /// - `brush.start.taper`, `brush.end.taper`: >= 0.0
    pub fn validate_and_clamp(&mut self) {
        clamp_field(
            "stroke_width",
            &mut self.drawing.stroke_width,
            size_range(ToolKind::Line).min,
            size_range(ToolKind::Line).max,
        );
        clamp_field(
            "brush_size",
            &mut self.drawing.brush_size,
            size_range(ToolKind::Brush).min,
            size_range(ToolKind::Brush).max,
        );
        clamp_field(
            "font_size",
            &mut self.drawing.font_size,
            size_range(ToolKind::Text).min,
            size_range(ToolKind::Text).max,
        );
        clamp_field(
            "eraser size",
            &mut self.eraser.size,
            size_range(ToolKind::Eraser).min,
            size_range(ToolKind::Eraser).max,
        );
        clamp_field("arrow length", &mut self.arrow.length, 5.0, 100.0);
        clamp_field("arrow factor", &mut self.arrow.factor, 1.0, 50.0);
        clamp_field("brush thinning", &mut self.brush.thinning, -1.0, 1.0);
        clamp_field("brush smoothing", &mut self.brush.smoothing, 0.0, 1.0);
        clamp_field("brush streamline", &mut self.brush.streamline, 0.0, 1.0);
        clamp_field("brush start taper", &mut self.brush.start.taper, 0.0, f64::MAX);
        clamp_field("brush end taper", &mut self.brush.end.taper, 0.0, f64::MAX);

        // Colors fall back to black at conversion time; warn once here
        if !self.drawing.stroke_color.is_valid() {
            log::warn!(
                "Invalid stroke_color {:?}, falling back to black",
                self.drawing.stroke_color
            );
        }
        if self
            .drawing
            .fill_color
            .as_ref()
            .is_some_and(|fill| !fill.is_valid())
        {
            log::warn!(
                "Invalid fill_color {:?}, ignoring it",
                self.drawing.fill_color
            );
            self.drawing.fill_color = None;
        }
    }

    /// Builds the tool-style store from the drawing and eraser sections.
    pub fn tool_styles(&self) -> Result<ToolStyleRegistry, BoardError> {
        let mut registry = ToolStyleRegistry::new();
        let stroke = self.drawing.stroke_color.to_color();
        let fill = self.drawing.fill_color.as_ref().map(ColorSpec::to_color);

        for tool in ToolKind::ALL {
            let size = match tool {
                ToolKind::Brush => self.drawing.brush_size,
                ToolKind::Text => self.drawing.font_size,
                ToolKind::Eraser => self.eraser.size,
                ToolKind::Line | ToolKind::Rectangle | ToolKind::Circle | ToolKind::Arrow => {
                    self.drawing.stroke_width
                }
            };
            registry.set_size(tool, size);
            if toolbox::supports_stroke(tool) {
                registry.set_stroke(tool, stroke)?;
            }
            if toolbox::supports_fill(tool) {
                registry.set_fill(tool, fill)?;
            }
        }
        registry.set_font_family(ToolKind::Text, &self.drawing.font_family)?;

        Ok(registry)
    }

    /// Element construction settings (arrow policy and brush outline template).
    pub fn element_settings(&self) -> ElementSettings {
        ElementSettings {
            arrow: self.arrow.policy(),
            brush: self.brush.stroke_options(),
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Self::load`], a missing file is an error.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        config.keybindings.build_action_map().map_err(|err| {
            anyhow::anyhow!("Invalid keybindings in {}: {}", config_path.display(), err)
        })?;

        config.validate_and_clamp();
        Ok(config)
    }

    /// Parses TOML text without validation.
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid config TOML")
    }

    /// Saves the current configuration to file.
    ///
    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to `config_path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        // Create directory
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(config_path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// Documented example configuration shipped with the crate.
pub const EXAMPLE_CONFIG: &str = include_str!("../../config.example.toml");

fn clamp_field(name: &str, value: &mut f64, min: f64, max: f64) {
    if value.is_nan() {
        log::warn!("Invalid {} NaN, using {:.1}", name, min);
        *value = min;
    } else if !(min..=max).contains(value) {
        log::warn!(
            "Invalid {} {:.1}, clamping to {:.1}-{:.1} range",
            name,
            value,
            min,
            max
        );
        *value = value.clamp(min, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::element::ArrowLengthPolicy;
    use crate::draw::{ORANGE, PURPLE};
    use tempfile::TempDir;

    #[test]
    fn empty_toml_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.drawing.default_tool, ToolKind::Brush);
        assert_eq!(config.drawing.font_size, 24.0);
        assert_eq!(config.eraser.size, 20.0);
        assert_eq!(config.arrow.mode, ArrowLengthMode::Fixed);
        assert_eq!(config.history.limit, 0);
    }

    #[test]
    fn example_config_parses() {
        let mut config = Config::from_toml(EXAMPLE_CONFIG).unwrap();
        config.validate_and_clamp();
        assert!(config.keybindings.build_action_map().is_ok());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::from_toml(
            r#"
            [drawing]
            stroke_width = 50.0
            font_size = 4.0
            fill_color = "not-a-color"

            [eraser]
            size = 500.0

            [brush]
            streamline = 3.0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();
        assert_eq!(config.drawing.stroke_width, 20.0);
        assert_eq!(config.drawing.font_size, 12.0);
        assert_eq!(config.eraser.size, 50.0);
        assert_eq!(config.brush.streamline, 1.0);
        assert!(config.drawing.fill_color.is_none());
    }

    #[test]
    fn tool_styles_follow_config() {
        let config = Config::from_toml(
            r#"
            [drawing]
            stroke_color = "purple"
            fill_color = [255, 165, 0]
            stroke_width = 3.0
            brush_size = 6.0
            font_family = "arial"
            "#,
        )
        .unwrap();
        let styles = config.tool_styles().unwrap();
        assert_eq!(styles.get(ToolKind::Line).stroke, PURPLE);
        assert_eq!(styles.get(ToolKind::Line).size, 3.0);
        assert_eq!(styles.get(ToolKind::Line).fill, None);
        assert_eq!(styles.get(ToolKind::Rectangle).fill, Some(ORANGE));
        assert_eq!(styles.get(ToolKind::Brush).size, 6.0);
        assert_eq!(
            styles.get(ToolKind::Text).font_family.as_deref(),
            Some("Arial")
        );
    }

    #[test]
    fn arrow_mode_selects_policy() {
        let config = Config::from_toml(
            r#"
            [arrow]
            mode = "proportional"
            factor = 15.0
            "#,
        )
        .unwrap();
        assert_eq!(
            config.element_settings().arrow,
            ArrowLengthPolicy::Proportional { factor: 15.0 }
        );
    }

    #[test]
    fn load_from_rejects_duplicate_keybindings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [keybindings]
            undo = ["Ctrl+Z"]
            redo = ["Ctrl+Z"]
            "#,
        )
        .unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Duplicate keybinding"));
    }

    #[test]
    fn create_default_file_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        Config::create_default_file(&path).unwrap();
        assert!(Config::create_default_file(&path).is_err());
    }

    #[test]
    fn schema_mentions_every_section() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        for section in ["drawing", "arrow", "eraser", "brush", "history", "keybindings"] {
            assert!(schema.contains(section), "schema is missing {section}");
        }
    }
}
