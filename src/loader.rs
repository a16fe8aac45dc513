//! Asset loading and load-state tracking.
//!
//! All frames and the optional icon are fetched concurrently. The batch
//! succeeds only if every fetch succeeds; the first failure fails the whole
//! batch and the viewer never becomes interactive.

use std::cell::Cell;
use std::future::Future;

use futures::future::{try_join, try_join_all};

use crate::error::ViewerError;
use crate::{AssetKind, FrameSequence, LoadedAsset};

/// Loading phase indicator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadingPhase {
    /// Nothing requested yet
    Idle,
    /// Fetches outstanding
    Loading,
    /// Every asset arrived
    Complete,
    /// At least one asset failed
    Failed,
}

/// Progress and outcome of one loading session.
#[derive(Clone, Debug)]
pub struct LoadState {
    phase: LoadingPhase,
    /// Number of resources requested (frames plus icon)
    requested: usize,
    /// Number of frames loaded so far
    frames_loaded: usize,
    /// Number of frames requested
    frames_total: usize,
    error: Option<ViewerError>,
}

impl Default for LoadState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadState {
    pub fn new() -> Self {
        Self {
            phase: LoadingPhase::Idle,
            requested: 0,
            frames_loaded: 0,
            frames_total: 0,
            error: None,
        }
    }

    /// Begin loading `frame_count` frames and, optionally, an icon.
    ///
    /// Returns `false` if this state was already used; a load state is not
    /// reused across activations.
    pub fn start(&mut self, frame_count: usize, with_icon: bool) -> bool {
        if self.phase != LoadingPhase::Idle {
            return false;
        }
        self.phase = LoadingPhase::Loading;
        self.frames_total = frame_count;
        self.requested = frame_count + usize::from(with_icon);
        true
    }

    /// Record that one more frame arrived. Returns the new count.
    pub fn frame_loaded(&mut self) -> usize {
        if self.phase == LoadingPhase::Loading {
            self.frames_loaded = (self.frames_loaded + 1).min(self.frames_total);
        }
        self.frames_loaded
    }

    /// Mark the batch complete.
    pub fn complete(&mut self) {
        if self.phase == LoadingPhase::Loading {
            self.phase = LoadingPhase::Complete;
        }
    }

    /// Mark the batch failed. Returns `true` only for the first failure.
    pub fn fail(&mut self, error: ViewerError) -> bool {
        if self.phase != LoadingPhase::Loading {
            return false;
        }
        self.phase = LoadingPhase::Failed;
        self.error = Some(error);
        true
    }

    #[inline]
    pub fn phase(&self) -> LoadingPhase {
        self.phase
    }

    #[inline]
    pub fn requested(&self) -> usize {
        self.requested
    }

    #[inline]
    pub fn frames_loaded(&self) -> usize {
        self.frames_loaded
    }

    #[inline]
    pub fn frames_total(&self) -> usize {
        self.frames_total
    }

    pub fn error(&self) -> Option<&ViewerError> {
        self.error.as_ref()
    }

    /// Frame loading percentage (0-100)
    pub fn percent(&self) -> u8 {
        if self.frames_total == 0 {
            0
        } else {
            ((self.frames_loaded as f32 / self.frames_total as f32) * 100.0) as u8
        }
    }

    /// Human readable progress line.
    pub fn message(&self) -> String {
        match self.phase {
            LoadingPhase::Idle => "Waiting...".to_string(),
            LoadingPhase::Loading => format!(
                "Loading frames... {} / {} ({}%)",
                self.frames_loaded,
                self.frames_total,
                self.percent()
            ),
            LoadingPhase::Complete => format!("Loaded {} frames", self.frames_total),
            LoadingPhase::Failed => match &self.error {
                Some(err) => format!("Loading failed: {}", err),
                None => "Loading failed".to_string(),
            },
        }
    }
}

/// Result type for a single fetch; the error is a human readable reason.
pub type LoadResult<T> = Result<T, String>;

/// Trait for async image fetchers.
///
/// Implement this for your platform's image loading (an `<img>` element on
/// the web, a file reader in tests, ...).
///
/// No `Send` bounds, so it works in both native and WASM (single-threaded) contexts.
pub trait AssetProvider {
    /// Platform image handle
    type Image;

    /// Fetch and decode the image at `url`.
    fn fetch(&self, url: &str) -> impl Future<Output = LoadResult<LoadedAsset<Self::Image>>>;
}

/// Everything needed to start playback.
#[derive(Clone, Debug)]
pub struct LoadedAssets<I> {
    /// Frames in sequence order
    pub frames: Vec<LoadedAsset<I>>,
    pub icon: Option<LoadedAsset<I>>,
}

/// Fetch every frame of `sequence` and the icon concurrently.
///
/// `on_frame_loaded(loaded, total)` runs after each successful frame fetch,
/// in completion order. Frames are returned in sequence order regardless of
/// the order their fetches complete in. The first failing fetch fails the
/// batch with an error naming its URL.
pub async fn load_assets<P, F>(
    provider: &P,
    sequence: &FrameSequence,
    icon_url: Option<&str>,
    on_frame_loaded: F,
) -> Result<LoadedAssets<P::Image>, ViewerError>
where
    P: AssetProvider,
    F: Fn(usize, usize),
{
    let total = sequence.len();
    let loaded = Cell::new(0usize);
    let loaded = &loaded;
    let on_frame_loaded = &on_frame_loaded;

    let frames = sequence.iter().map(move |url| async move {
        let asset = provider
            .fetch(url)
            .await
            .map_err(|reason| ViewerError::asset_load(AssetKind::Frame, url, reason))?;
        loaded.set(loaded.get() + 1);
        on_frame_loaded(loaded.get(), total);
        Ok::<_, ViewerError>(asset)
    });

    let icon = async move {
        match icon_url {
            Some(url) => provider
                .fetch(url)
                .await
                .map(Some)
                .map_err(|reason| ViewerError::asset_load(AssetKind::Icon, url, reason)),
            None => Ok(None),
        }
    };

    let (frames, icon) = try_join(try_join_all(frames), icon).await?;
    Ok(LoadedAssets { frames, icon })
}

/// Browser image fetching and timer helpers.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use wasm_bindgen::JsValue;
    use web_sys::HtmlImageElement;

    /// Fetches images through `<img>` elements so the browser decodes them.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct ImageElementProvider;

    impl AssetProvider for ImageElementProvider {
        type Image = HtmlImageElement;

        async fn fetch(&self, url: &str) -> LoadResult<LoadedAsset<HtmlImageElement>> {
            let img = HtmlImageElement::new().map_err(|_| "Failed to create image element")?;
            let promise = js_sys::Promise::new(&mut |resolve, reject| {
                img.set_onload(Some(&resolve));
                img.set_onerror(Some(&reject));
            });
            img.set_src(url);

            let loaded = wasm_bindgen_futures::JsFuture::from(promise).await;
            img.set_onload(None);
            img.set_onerror(None);
            loaded.map_err(|_| "network or decode error".to_string())?;

            let (width, height) = (img.natural_width(), img.natural_height());
            Ok(LoadedAsset::new(img, width, height))
        }
    }

    /// Resolve after `ms` milliseconds on the browser event loop.
    ///
    /// With `ms == 0` this just yields so pending input callbacks can run.
    pub async fn sleep_ms(ms: u32) {
        let promise = js_sys::Promise::new(&mut |resolve, _| {
            if let Some(window) = web_sys::window() {
                let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    &resolve,
                    ms.min(i32::MAX as u32) as i32,
                );
            } else {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }
}
