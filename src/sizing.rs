//! Surface sizing and drag sensitivity calculations.

/// Divisor applied to the surface width before splitting it across frames.
///
/// A full drag across 40% of the surface width rotates once through every frame.
pub const THRESHOLD_WIDTH_DIVISOR: f64 = 2.5;

/// Computed size of the drawing surface for a given container.
///
/// The surface keeps the aspect ratio of its nominal size and never grows
/// beyond it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceLayout {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Container width divided by nominal width (not capped)
    pub ratio: f64,
    /// Horizontal drag distance in pixels per frame step
    pub threshold: u32,
}

impl SurfaceLayout {
    /// Compute the layout for a container of `container_width` pixels.
    ///
    /// ## Arguments
    ///
    /// * `container_width` - Width of the surface's parent element in pixels
    /// * `configured_width` - Nominal surface width
    /// * `configured_height` - Nominal surface height
    /// * `frame_count` - Number of frames in the sequence
    ///
    /// ## Example
    ///
    /// ```rust
    /// use spin360_view::SurfaceLayout;
    ///
    /// let layout = SurfaceLayout::compute(300, 600, 400, 4);
    /// assert_eq!((layout.width, layout.height), (300, 200));
    /// assert_eq!(layout.ratio, 0.5);
    /// assert_eq!(layout.threshold, 30);
    /// ```
    pub fn compute(
        container_width: u32,
        configured_width: u32,
        configured_height: u32,
        frame_count: usize,
    ) -> Self {
        let ratio = if configured_width == 0 {
            1.0
        } else {
            container_width as f64 / configured_width as f64
        };

        let (width, height) = if ratio >= 1.0 {
            (configured_width, configured_height)
        } else {
            // Integer floor; scaling by the float ratio can land one pixel short
            let height =
                configured_height as u64 * container_width as u64 / configured_width as u64;
            (container_width, height as u32)
        };

        Self {
            width,
            height,
            ratio,
            threshold: drag_threshold(width, frame_count),
        }
    }

    /// Returns `true` when the computed size differs from the size currently
    /// applied to the surface.
    #[inline]
    pub fn needs_resize(&self, current_width: u32, current_height: u32) -> bool {
        self.width != current_width || self.height != current_height
    }

    /// Scale applied to the overlay icon; never above 1.
    #[inline]
    pub fn icon_ratio(&self) -> f64 {
        self.ratio.min(1.0)
    }

    /// Width and height as floating point, for draw arithmetic.
    #[inline]
    pub fn size_f64(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }
}

/// Pixels of horizontal drag required for one frame step.
///
/// `floor((width / 2.5) / frame_count)`, kept at 1 or more whenever there is
/// something to drag across. Returns 0 for an empty surface or sequence.
pub fn drag_threshold(width: u32, frame_count: usize) -> u32 {
    if width == 0 || frame_count == 0 {
        return 0;
    }
    let raw = ((width as f64 / THRESHOLD_WIDTH_DIVISOR) / frame_count as f64).floor() as u32;
    raw.max(1)
}

/// Parse a computed CSS length such as `"412.5px"` into whole pixels.
///
/// Fractional pixels are truncated. Returns `None` for anything that is not a
/// non-negative pixel value.
pub fn parse_css_px(value: &str) -> Option<u32> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    let px = number.parse::<f64>().ok()?;
    if px.is_finite() && px >= 0.0 {
        Some(px as u32)
    } else {
        None
    }
}
