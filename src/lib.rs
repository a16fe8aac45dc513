//! # spin360-view
//!
//! Drag-to-rotate 360° product viewer that flips through a fixed sequence of
//! pre-rendered frames on a canvas.
//!
//! This crate provides platform-agnostic data structures and logic for:
//! - Building and loading the frame sequence (all-or-nothing, concurrent)
//! - Sizing the surface to its container and deriving drag sensitivity
//! - Stepping a wrap-around frame cursor from drag gestures
//! - Playing a one-pass intro rotation after loading
//! - Rendering frames, the overlay icon and a progress bar (with optional web support)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for the configuration
//! - `toml` / `json` - Parse a configuration from TOML or JSON
//! - `web` - Enable web/WASM canvas rendering and the `init` entry point
//!
//! ## Example
//!
//! ```rust
//! use spin360_view::{FrameCursor, GestureController, Step, SurfaceLayout};
//!
//! // 4 frames on a 600px surface inside a 300px container
//! let layout = SurfaceLayout::compute(300, 600, 600, 4);
//! assert_eq!(layout.threshold, 30);
//!
//! let mut cursor = FrameCursor::new(4);
//! let mut gesture = GestureController::new();
//! gesture.pointer_down(200.0);
//! if let Some(step) = gesture.pointer_move(160.0, layout.threshold) {
//!     cursor.advance(step);
//! }
//! assert_eq!(cursor.current(), 1);
//! assert_eq!(cursor.advance(Step::Backward), 0);
//! ```

mod config;
mod cursor;
mod data;
pub mod debounce;
mod error;
mod gesture;
mod intro;
pub mod loader;
pub mod registry;
pub mod render;
mod sizing;
pub mod viewer;

#[cfg(feature = "web")]
pub mod web;

pub use config::ViewerConfig;
pub use cursor::{FrameCursor, Step};
pub use data::{AssetKind, FrameSequence, LoadedAsset};
pub use error::{ConfigError, ViewerError};
pub use gesture::GestureController;
pub use intro::{IntroPlayer, IntroState, IntroTick};
pub use loader::{load_assets, AssetProvider, LoadState, LoadedAssets, LoadingPhase};
pub use render::{DrawCommand, RenderResult, Surface};
pub use sizing::{drag_threshold, parse_css_px, SurfaceLayout};
pub use viewer::{Handoff, Viewer, ViewerPhase};

#[cfg(feature = "web")]
pub use web::init;
