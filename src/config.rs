//! Viewer configuration.

use crate::error::ConfigError;
use crate::FrameSequence;

/// Settings for one viewer instance.
///
/// Every field has a default, so callers only set what differs:
///
/// ```rust
/// use spin360_view::ViewerConfig;
///
/// let config = ViewerConfig {
///     canvas: "#product".into(),
///     count: 24,
///     path: "/images/".into(),
///     prefix: "sneaker-".into(),
///     suffix: ".jpg".into(),
///     ..ViewerConfig::default()
/// };
/// assert_eq!(config.width, 600);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ViewerConfig {
    /// CSS selector of the canvas element
    pub canvas: String,
    /// Nominal canvas width in pixels
    pub width: u32,
    /// Nominal canvas height in pixels
    pub height: u32,
    /// Number of frames
    pub count: usize,
    /// Intro rotation interval in milliseconds
    pub interval: u32,
    /// Image directory including trailing slash, e.g. `/images/`
    pub path: String,
    /// Filename prefix including separator, e.g. `shoe-`
    pub prefix: String,
    /// Filename suffix including dot, e.g. `.jpg`
    pub suffix: String,
    /// Overlay icon URL
    pub icon: Option<String>,
    /// Play one automatic rotation after loading
    pub intro: bool,
    /// Paint a progress bar while frames load
    pub progress: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            canvas: String::new(),
            width: 600,
            height: 600,
            count: 36,
            interval: 25,
            path: String::new(),
            prefix: String::new(),
            suffix: String::new(),
            icon: None,
            intro: true,
            progress: true,
        }
    }
}

impl ViewerConfig {
    /// Parse a TOML document into a config, filling missing keys with defaults.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Parse a JSON object into a config, filling missing keys with defaults.
    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Reject settings the viewer cannot run with.
    ///
    /// The selector is not checked here; a selector that matches nothing
    /// leaves activation a silent no-op.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::ZeroFrameCount);
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Frame URLs derived from path, prefix, suffix and count.
    pub fn frame_sequence(&self) -> FrameSequence {
        FrameSequence::from_pattern(&self.path, &self.prefix, &self.suffix, self.count)
    }

    /// Icon URL, treating an empty string as unset.
    pub fn icon_url(&self) -> Option<&str> {
        self.icon.as_deref().filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!((config.width, config.height), (600, 600));
        assert_eq!(config.count, 36);
        assert_eq!(config.interval, 25);
        assert!(config.intro);
        assert!(config.progress);
        assert_eq!(config.icon_url(), None);
    }

    #[test]
    fn test_validate_rejects_zero_count() {
        let config = ViewerConfig {
            count: 0,
            ..ViewerConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrameCount));
    }

    #[test]
    fn test_validate_rejects_zero_size() {
        let config = ViewerConfig {
            height: 0,
            ..ViewerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroSize { width: 600, height: 0 })
        );
    }

    #[test]
    fn test_empty_icon_is_unset() {
        let config = ViewerConfig {
            icon: Some(String::new()),
            ..ViewerConfig::default()
        };
        assert_eq!(config.icon_url(), None);
    }

    #[test]
    fn test_frame_sequence() {
        let config = ViewerConfig {
            path: "/p/".into(),
            prefix: "a-".into(),
            suffix: ".png".into(),
            count: 4,
            ..ViewerConfig::default()
        };
        let seq = config.frame_sequence();
        assert_eq!(seq.len(), 4);
        assert_eq!(seq.url(3), Some("/p/a-4.png"));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_partial() {
        let config = ViewerConfig::from_toml_str(
            r##"
            canvas = "#view"
            count = 8
            intro = false
            "##,
        )
        .unwrap();
        assert_eq!(config.canvas, "#view");
        assert_eq!(config.count, 8);
        assert!(!config.intro);
        assert_eq!(config.width, 600);
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json_partial() {
        let config =
            ViewerConfig::from_json_str(r##"{"canvas":"#c","icon":"/360.png","width":400}"##)
                .unwrap();
        assert_eq!(config.icon_url(), Some("/360.png"));
        assert_eq!(config.width, 400);
        assert_eq!(config.height, 600);
    }
}
