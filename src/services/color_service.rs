use crate::effects::{process_background, BackgroundActions, ProcessedBackground};
use crate::models::AppConfig;
use image::RgbaImage;
use imprint_colors::{detect_background, BackgroundHint, ColorReducer, PaletteError, ReduceError, ReductionOutput};

/// Color analysis of artwork: background detection plus reduction onto the
/// configured color book
pub struct ColorService {
    reducer: ColorReducer,
    corner_offset: u32,
}

impl ColorService {
    pub fn new(config: &AppConfig) -> Result<Self, PaletteError> {
        Ok(Self {
            reducer: config.reducer()?,
            corner_offset: config.corner_offset,
        })
    }

    /// Override the configured tile count
    pub fn with_tile_count(mut self, tile_count: u32) -> Self {
        self.reducer = self.reducer.tile_count(tile_count);
        self
    }

    /// Detect the background from the image corners
    pub fn detect_background(&self, image: &RgbaImage) -> Option<BackgroundHint> {
        detect_background(image, self.corner_offset, None)
    }

    /// Reduce the artwork to book colors.
    ///
    /// With `use_background`, the detected background is excluded from the
    /// output and returned mapped alongside it.
    pub fn analyze(&self, image: &RgbaImage, use_background: bool) -> Result<ReductionOutput, ReduceError> {
        let hint = if use_background {
            self.detect_background(image)
        } else {
            None
        };
        let background = hint.map(|h| h.to_detail());

        let output = self.reducer.reduce(image, background.as_ref())?;
        tracing::info!(
            colors = output.visible().count(),
            background = background.as_ref().map(|b| b.original.name.as_str()),
            "Analyzed artwork"
        );
        Ok(output)
    }

    /// Crop and/or remove the detected background
    pub fn clean_background(&self, image: &RgbaImage, actions: BackgroundActions) -> ProcessedBackground {
        match self.detect_background(image) {
            Some(hint) => process_background(image, &hint.name(), actions),
            None => ProcessedBackground {
                image: image.clone(),
                cropped: None,
                removed: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn artwork() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(32, 32, Rgba([255, 255, 255, 255]));
        for y in 8..24 {
            for x in 8..24 {
                img.put_pixel(x, y, Rgba([0xC8, 0x10, 0x2E, 255]));
            }
        }
        img
    }

    #[test]
    fn test_analyze_excludes_background() {
        let service = ColorService::new(&AppConfig::default()).unwrap().with_tile_count(1);
        let output = service.analyze(&artwork(), true).unwrap();

        let names: Vec<&str> = output.visible().map(|d| d.mapped_name()).collect();
        assert_eq!(names, vec!["ffc8102e"]);
        assert_eq!(output.background.unwrap().mapped_name(), "ffffffff");
    }

    #[test]
    fn test_analyze_without_background_keeps_white() {
        let service = ColorService::new(&AppConfig::default()).unwrap().with_tile_count(1);
        let output = service.analyze(&artwork(), false).unwrap();
        assert!(output.background.is_none());
        assert!(output.visible().any(|d| d.mapped_name() == "ffffffff"));
    }

    #[test]
    fn test_clean_background_crops_white() {
        let service = ColorService::new(&AppConfig::default()).unwrap();
        let actions = BackgroundActions {
            crop: true,
            remove: false,
            remove_on_transparent: false,
        };
        let out = service.clean_background(&artwork(), actions);
        assert_eq!(out.image.dimensions(), (21, 21));
    }
}
