pub mod detect;
pub mod interactive;
pub mod stitch;

use substitch_common::DetectionConfig;

use crate::DetectionArgs;

/// Apply command-line overrides on top of the configured defaults.
pub fn detection_config(base: DetectionConfig, args: &DetectionArgs) -> DetectionConfig {
    DetectionConfig {
        bottom_pixels: args.bottom_pixels.unwrap_or(base.bottom_pixels),
        extra_space_ratio: args.extra_space_ratio.unwrap_or(base.extra_space_ratio),
        language: args.lang.unwrap_or(base.language),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use substitch_common::SubtitleLanguage;

    #[test]
    fn test_overrides_win_over_config() {
        let args = DetectionArgs {
            lang: Some(SubtitleLanguage::English),
            bottom_pixels: None,
            extra_space_ratio: Some(0.25),
        };
        let config = detection_config(DetectionConfig::default(), &args);
        assert_eq!(config.language, SubtitleLanguage::English);
        assert_eq!(config.bottom_pixels, 150);
        assert!((config.extra_space_ratio - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let base = DetectionConfig {
            bottom_pixels: 90,
            ..DetectionConfig::default()
        };
        assert_eq!(detection_config(base, &DetectionArgs::default()), base);
    }
}
