//! Resize debouncing.

/// Quiescence window before a resize is applied.
pub const RESIZE_DEBOUNCE_MS: u32 = 300;

/// Bookkeeping for the resize debounce timer.
///
/// Each accepted resize gets a new generation number. Only the timer carrying
/// the latest generation is allowed to apply, so a resize arriving inside the
/// window supersedes the pending one even if the platform timer could not be
/// cancelled.
#[derive(Clone, Debug)]
pub struct ResizeDebouncer {
    last_width: f64,
    generation: u64,
    pending: Option<u64>,
    delay_ms: u32,
}

impl ResizeDebouncer {
    /// Create a debouncer that remembers `viewport_width` as already applied.
    pub fn new(viewport_width: f64) -> Self {
        Self::with_delay(viewport_width, RESIZE_DEBOUNCE_MS)
    }

    pub fn with_delay(viewport_width: f64, delay_ms: u32) -> Self {
        Self {
            last_width: viewport_width,
            generation: 0,
            pending: None,
            delay_ms,
        }
    }

    #[inline]
    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Register a resize event.
    ///
    /// Returns the generation to attach to a newly scheduled timer, or `None`
    /// when the viewport width has not changed (height-only resizes are
    /// ignored). Any earlier pending generation is superseded.
    pub fn schedule(&mut self, viewport_width: f64) -> Option<u64> {
        if viewport_width == self.last_width {
            return None;
        }
        self.generation += 1;
        self.pending = Some(self.generation);
        Some(self.generation)
    }

    /// Returns `true` if a timer is pending.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Called when a timer fires.
    ///
    /// Returns `true` if this generation is the latest and the re-layout
    /// should run; the viewport width is then remembered as applied.
    pub fn fire(&mut self, generation: u64, viewport_width: f64) -> bool {
        if self.pending != Some(generation) {
            return false;
        }
        self.pending = None;
        self.last_width = viewport_width;
        true
    }
}
