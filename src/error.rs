use thiserror::Error;

/// Failures at the image decode/encode boundary.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("PNG encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invalid effect settings.
#[derive(Debug, Error, PartialEq)]
pub enum EffectError {
    #[error("Invalid {name} specified, value must be {range}")]
    InvalidSetting {
        name: &'static str,
        range: &'static str,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Asset download failures.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Resource not found: {url}")]
    NotFound { url: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration file failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid color book: {0}")]
    ColorBook(#[from] imprint_colors::PaletteError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_setting_message() {
        let error = EffectError::InvalidSetting {
            name: "angle",
            range: "between -360 and 360",
        };
        assert_eq!(
            error.to_string(),
            "Invalid angle specified, value must be between -360 and 360"
        );
    }

    #[test]
    fn test_not_found_message() {
        let error = FetchError::NotFound {
            url: "http://example.com/a.png".to_string(),
        };
        assert_eq!(error.to_string(), "Resource not found: http://example.com/a.png");
    }

    #[test]
    fn test_invalid_color_message() {
        let error = EffectError::InvalidColor("#12".to_string());
        assert_eq!(error.to_string(), "Invalid color: #12");
    }

    #[test]
    fn test_config_error_from_yaml() {
        let yaml_err = serde_yaml::from_str::<Vec<u32>>("{not: a list}").unwrap_err();
        let error: ConfigError = yaml_err.into();
        assert!(error.to_string().starts_with("Failed to parse config:"));
    }
}
