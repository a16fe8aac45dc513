//! Rendering logic for frames, the overlay icon and the progress bar.

use crate::SurfaceLayout;

/// Margin between the overlay icon and the surface edges at full size.
pub const ICON_MARGIN: f64 = 10.0;

/// Progress bar geometry.
pub const PROGRESS_X: f64 = 10.0;
pub const PROGRESS_Y: f64 = 10.0;
pub const PROGRESS_HEIGHT: f64 = 10.0;
pub const PROGRESS_COLOR: &str = "#ccc";

/// Image to draw, resolved by the caller against its loaded assets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageRef {
    /// Frame at a 0-based sequence index
    Frame(usize),
    /// The overlay icon
    Icon,
}

/// A single drawing operation.
///
/// This is a platform-agnostic representation of what needs to be drawn.
/// Each [`Surface`] implementation replays these commands on its backend.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Clear a rectangle starting at the origin
    Clear { width: f64, height: f64 },
    /// Draw an image scaled into a rectangle
    Image {
        image: ImageRef,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Fill a rectangle with a CSS color
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: &'static str,
    },
}

/// Result of a render operation containing draw commands in paint order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderResult {
    pub commands: Vec<DrawCommand>,
}

impl RenderResult {
    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Drawing target for the viewer.
///
/// Implemented by the web canvas binding and by test doubles. Image handles
/// are resolved from [`ImageRef`] by the viewer before drawing.
pub trait Surface {
    /// Platform image handle
    type Image;

    /// Clear the rectangle `(0, 0, width, height)`.
    fn clear_rect(&mut self, width: f64, height: f64);

    /// Draw `image` scaled into `(x, y, width, height)`.
    fn draw_image(
        &mut self,
        image: &Self::Image,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), String>;

    /// Fill `(x, y, width, height)` with a CSS color.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str);

    /// Currently applied pixel size.
    fn size(&self) -> (u32, u32);

    /// Apply a new pixel size.
    fn set_size(&mut self, width: u32, height: u32);
}

/// Generate commands that paint one frame, plus the icon on top when present.
///
/// `icon_size` is the icon's natural `(width, height)`; it is scaled by
/// [`SurfaceLayout::icon_ratio`] and anchored at the bottom-right corner.
///
/// ## Example
///
/// ```rust
/// use spin360_view::render::{render_frame, DrawCommand, ImageRef};
/// use spin360_view::SurfaceLayout;
///
/// let layout = SurfaceLayout::compute(300, 600, 600, 4);
/// let result = render_frame(&layout, 2, Some((80.0, 40.0)));
///
/// assert_eq!(result.len(), 3);
/// assert_eq!(
///     result.commands[2],
///     DrawCommand::Image { image: ImageRef::Icon, x: 255.0, y: 275.0, width: 40.0, height: 20.0 }
/// );
/// ```
pub fn render_frame(
    layout: &SurfaceLayout,
    frame: usize,
    icon_size: Option<(f64, f64)>,
) -> RenderResult {
    let (width, height) = layout.size_f64();
    let mut commands = vec![
        DrawCommand::Clear { width, height },
        DrawCommand::Image {
            image: ImageRef::Frame(frame),
            x: 0.0,
            y: 0.0,
            width,
            height,
        },
    ];

    if let Some((icon_width, icon_height)) = icon_size {
        let icon_ratio = layout.icon_ratio();
        let icon_width = icon_width * icon_ratio;
        let icon_height = icon_height * icon_ratio;
        let offset = ICON_MARGIN * icon_ratio;

        commands.push(DrawCommand::Image {
            image: ImageRef::Icon,
            x: width - icon_width - offset,
            y: height - icon_height - offset,
            width: icon_width,
            height: icon_height,
        });
    }

    RenderResult { commands }
}

/// Generate commands that paint the loading progress bar.
///
/// The bar spans at most half the surface width minus its margins:
/// `floor(loaded * ((width / 2) - 20) / total)`.
pub fn render_progress(layout: &SurfaceLayout, loaded: usize, total: usize) -> RenderResult {
    let (width, height) = layout.size_f64();
    let bar_width = if total == 0 {
        0.0
    } else {
        (loaded as f64 * ((width / 2.0) - 20.0) / total as f64).floor().max(0.0)
    };

    RenderResult {
        commands: vec![
            DrawCommand::Clear { width, height },
            DrawCommand::FillRect {
                x: PROGRESS_X,
                y: PROGRESS_Y,
                width: bar_width,
                height: PROGRESS_HEIGHT,
                color: PROGRESS_COLOR,
            },
        ],
    }
}

/// Web-specific rendering implementation.
#[cfg(feature = "web")]
pub mod web {
    use super::*;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

    /// A canvas element together with its 2D context.
    #[derive(Clone, Debug)]
    pub struct CanvasSurface {
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl CanvasSurface {
        /// Wrap a canvas, acquiring its 2D context.
        pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
            let ctx = canvas
                .get_context("2d")
                .map_err(|_| "Failed to get 2d context")?
                .ok_or("No 2d context available")?
                .dyn_into::<CanvasRenderingContext2d>()
                .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;
            Ok(Self { canvas, ctx })
        }

        pub fn canvas(&self) -> &HtmlCanvasElement {
            &self.canvas
        }
    }

    impl Surface for CanvasSurface {
        type Image = HtmlImageElement;

        fn clear_rect(&mut self, width: f64, height: f64) {
            self.ctx.clear_rect(0.0, 0.0, width, height);
        }

        fn draw_image(
            &mut self,
            image: &HtmlImageElement,
            x: f64,
            y: f64,
            width: f64,
            height: f64,
        ) -> Result<(), String> {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(image, x, y, width, height)
                .map_err(|_| "Failed to draw image".to_string())
        }

        fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: &str) {
            self.ctx.set_fill_style_str(color);
            self.ctx.fill_rect(x, y, width, height);
        }

        fn size(&self) -> (u32, u32) {
            (self.canvas.width(), self.canvas.height())
        }

        fn set_size(&mut self, width: u32, height: u32) {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
    }
}
