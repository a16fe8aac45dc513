//! Error types for configuration and asset loading.

use crate::AssetKind;

/// Invalid viewer configuration, rejected before anything is loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Frame count must be at least one
    ZeroFrameCount,
    /// Nominal surface size must be non-zero in both dimensions
    ZeroSize { width: u32, height: u32 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroFrameCount => write!(f, "Frame count must be at least 1"),
            ConfigError::ZeroSize { width, height } => {
                write!(f, "Invalid nominal size: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Error type for viewer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// A frame or the icon could not be fetched
    AssetLoad {
        kind: AssetKind,
        path: String,
        reason: String,
    },
    /// The configuration was rejected
    Config(ConfigError),
    /// The drawing surface refused a draw call
    Render(String),
}

impl ViewerError {
    pub fn asset_load(kind: AssetKind, path: &str, reason: impl Into<String>) -> Self {
        ViewerError::AssetLoad {
            kind,
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ViewerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewerError::AssetLoad { kind, path, reason } => {
                write!(
                    f,
                    "{} could not be loaded! (Check path: {}): {}",
                    kind, path, reason
                )
            }
            ViewerError::Config(err) => write!(f, "Invalid configuration: {}", err),
            ViewerError::Render(msg) => write!(f, "Render failed: {}", msg),
        }
    }
}

impl std::error::Error for ViewerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ViewerError::Config(err) => Some(err),
            ViewerError::AssetLoad { .. } | ViewerError::Render(_) => None,
        }
    }
}

impl From<ConfigError> for ViewerError {
    fn from(err: ConfigError) -> Self {
        ViewerError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_load_message_names_path() {
        let err = ViewerError::asset_load(AssetKind::Frame, "/img/p-7.jpg", "404");
        let msg = err.to_string();
        assert!(msg.starts_with("Image could not be loaded!"));
        assert!(msg.contains("/img/p-7.jpg"));
    }

    #[test]
    fn test_config_error_source() {
        use std::error::Error;
        let err: ViewerError = ConfigError::ZeroFrameCount.into();
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Frame count must be at least 1"
        );
    }
}
