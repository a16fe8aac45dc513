//! Core data structures for frame sequences and overlay assets.

/// Which kind of asset a URL refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssetKind {
    /// One frame of the rotation sequence
    Frame,
    /// The overlay icon drawn on top of every frame
    Icon,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Frame => write!(f, "Image"),
            AssetKind::Icon => write!(f, "Icon"),
        }
    }
}

/// Ordered list of frame URLs.
///
/// The order is the rotation direction: advancing the cursor moves to the
/// next URL in this list.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameSequence {
    urls: Vec<String>,
}

impl FrameSequence {
    /// Build the URLs `path + prefix + i + suffix` for `i` in `1..=count`.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use spin360_view::FrameSequence;
    ///
    /// let seq = FrameSequence::from_pattern("/img/", "shoe-", ".jpg", 3);
    /// assert_eq!(seq.len(), 3);
    /// assert_eq!(seq.url(0), Some("/img/shoe-1.jpg"));
    /// assert_eq!(seq.url(2), Some("/img/shoe-3.jpg"));
    /// ```
    pub fn from_pattern(path: &str, prefix: &str, suffix: &str, count: usize) -> Self {
        let urls = (1..=count)
            .map(|i| format!("{}{}{}{}", path, prefix, i, suffix))
            .collect();
        Self { urls }
    }

    /// Number of frames in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// URL of the frame at a 0-based index.
    pub fn url(&self, index: usize) -> Option<&str> {
        self.urls.get(index).map(|s| s.as_str())
    }

    /// Iterate over all frame URLs in rotation order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(|s| s.as_str())
    }
}

/// A fetched image together with its natural pixel size.
///
/// `I` is the platform image handle (an `HtmlImageElement` on the web).
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedAsset<I> {
    pub image: I,
    pub width: u32,
    pub height: u32,
}

impl<I> LoadedAsset<I> {
    pub fn new(image: I, width: u32, height: u32) -> Self {
        Self { image, width, height }
    }

    /// Natural size as floating point, for draw arithmetic.
    #[inline]
    pub fn size_f64(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }
}
