use crate::effects::embroidery::EmbroiderySettings;
use crate::error::ConfigError;
use imprint_colors::{ColorBook, ColorReducer, PaletteError, Thresholds};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "IMPRINT_CONFIG";

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Print color book, in lookup order
    #[serde(default = "default_color_book")]
    pub color_book: Vec<ColorBookEntry>,

    /// Similarity cutoffs
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Tiles per side for the tiled strategy (1 disables tiling)
    #[serde(default = "default_tile_count")]
    pub tile_count: u32,

    /// Quantization budget before the histogram is taken
    #[serde(default = "default_quantize_colors")]
    pub quantize_colors: usize,

    /// Inset of the corner samples used for background detection
    #[serde(default = "default_corner_offset")]
    pub corner_offset: u32,

    /// Total download attempts per asset
    #[serde(default = "default_max_download_attempts")]
    pub max_download_attempts: u32,

    /// Per-request download timeout in seconds
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,

    /// Embroidery effect settings
    #[serde(default)]
    pub embroidery: EmbroiderySettings,
}

/// One color book entry
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ColorBookEntry {
    /// `#RRGGBB` or `#AARRGGBB`
    pub hex: String,
    /// Display name
    pub name: String,
}

impl ColorBookEntry {
    fn new(hex: &str, name: &str) -> Self {
        Self {
            hex: hex.to_string(),
            name: name.to_string(),
        }
    }
}

fn default_color_book() -> Vec<ColorBookEntry> {
    vec![
        ColorBookEntry::new("#FFFFFF", "White"),
        ColorBookEntry::new("#000000", "Black"),
        ColorBookEntry::new("#C3ABD3", "Lavender"),
        ColorBookEntry::new("#DDDBD3", "Light Lavender"),
        ColorBookEntry::new("#717073", "Cool Gray"),
        ColorBookEntry::new("#C8102E", "Red"),
        ColorBookEntry::new("#FFD100", "Yellow"),
        ColorBookEntry::new("#0033A0", "Blue"),
        ColorBookEntry::new("#009A44", "Green"),
    ]
}

fn default_tile_count() -> u32 {
    4
}

fn default_quantize_colors() -> usize {
    24
}

fn default_corner_offset() -> u32 {
    1
}

fn default_max_download_attempts() -> u32 {
    3
}

fn default_download_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults on any error
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    colors = config.color_book.len(),
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from `path`, or from `IMPRINT_CONFIG`, or use defaults
    pub fn load_optional(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load(path),
            None => match std::env::var_os(CONFIG_ENV) {
                Some(env_path) => Self::load(Path::new(&env_path)),
                None => Self::default(),
            },
        }
    }

    /// Read and parse a config file, validating the color book
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.color_book()?;
        Ok(config)
    }

    /// Build the color book
    pub fn color_book(&self) -> Result<ColorBook, PaletteError> {
        let pairs: Vec<(&str, &str)> = self
            .color_book
            .iter()
            .map(|e| (e.hex.as_str(), e.name.as_str()))
            .collect();
        ColorBook::from_hex(&pairs)
    }

    /// Build a reducer configured from this config
    pub fn reducer(&self) -> Result<ColorReducer, PaletteError> {
        Ok(ColorReducer::new(self.color_book()?)
            .thresholds(self.thresholds)
            .tile_count(self.tile_count)
            .quantize_colors(self.quantize_colors))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            color_book: default_color_book(),
            thresholds: Thresholds::default(),
            tile_count: default_tile_count(),
            quantize_colors: default_quantize_colors(),
            corner_offset: default_corner_offset(),
            max_download_attempts: default_max_download_attempts(),
            download_timeout_secs: default_download_timeout(),
            embroidery: EmbroiderySettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.tile_count, 4);
        assert_eq!(config.quantize_colors, 24);
        assert_eq!(config.corner_offset, 1);
        assert_eq!(config.max_download_attempts, 3);
        assert_eq!(config.download_timeout_secs, 30);
        assert_eq!(config.thresholds, Thresholds::default());

        let book = config.color_book().unwrap();
        assert_eq!(book.len(), 9);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = write_config(
            r#"
tile_count: 2
thresholds:
  cut:
    delta_e: 12
    hue: 6
    rgb: 35
    percentage: 2
"#,
        );
        let config = AppConfig::try_load(file.path()).unwrap();

        assert_eq!(config.tile_count, 2);
        assert_eq!(config.thresholds.cut.delta_e, 12.0);
        assert_eq!(config.thresholds.pass_sd, Thresholds::default().pass_sd);
        assert_eq!(config.quantize_colors, 24);
        assert_eq!(config.color_book, default_color_book());
    }

    #[test]
    fn test_color_book_order_is_kept() {
        let file = write_config(
            r##"
color_book:
  - hex: "#00FF00"
    name: Green
  - hex: "#FF0000"
    name: Red
"##,
        );
        let config = AppConfig::try_load(file.path()).unwrap();
        let names: Vec<&str> = config.color_book.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Green", "Red"]);
        assert!(config.reducer().is_ok());
    }

    #[test]
    fn test_invalid_color_book_rejected() {
        let file = write_config("color_book:\n  - hex: \"#XYZ\"\n    name: Bad\n");
        assert!(matches!(
            AppConfig::try_load(file.path()),
            Err(ConfigError::ColorBook(_))
        ));
    }

    #[test]
    fn test_load_falls_back_on_parse_error() {
        let file = write_config("tile_count: [not a number\n");
        let config = AppConfig::load(file.path());
        assert_eq!(config.tile_count, 4);
    }

    #[test]
    fn test_load_falls_back_on_missing_file() {
        let config = AppConfig::load(Path::new("/nonexistent/imprint.yaml"));
        assert_eq!(config.color_book, default_color_book());
    }
}
