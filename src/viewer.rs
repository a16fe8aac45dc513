//! Viewer instance tying loading, layout, cursor, intro and gestures together.

use crate::error::ViewerError;
use crate::loader::{LoadState, LoadedAssets};
use crate::render::{render_frame, render_progress, DrawCommand, ImageRef, RenderResult, Surface};
use crate::{
    FrameCursor, FrameSequence, GestureController, IntroPlayer, IntroTick, LoadedAsset, Step,
    SurfaceLayout, ViewerConfig,
};

/// Lifecycle of a viewer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewerPhase {
    /// Assets are being fetched
    Loading,
    /// Intro rotation is playing; drag input is not attached yet
    Intro,
    /// Drag navigation is attached
    Interactive,
    /// Loading failed; the viewer stays inert
    Failed,
}

/// What the host should do once loading finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handoff {
    /// Call [`Viewer::tick_intro`] every `interval_ms` until it reports done
    PlayIntro { interval_ms: u32 },
    /// Attach drag listeners now
    Navigate,
}

/// One 360° viewer bound to a drawing surface.
///
/// The viewer owns all of its state and performs no timing or event wiring
/// itself; the host (the `web` binding, or a test) feeds it load results,
/// timer ticks, pointer positions and container widths.
pub struct Viewer<S: Surface> {
    config: ViewerConfig,
    sequence: FrameSequence,
    surface: S,
    layout: SurfaceLayout,
    cursor: FrameCursor,
    gesture: GestureController,
    intro: IntroPlayer,
    load_state: LoadState,
    frames: Vec<LoadedAsset<S::Image>>,
    icon: Option<LoadedAsset<S::Image>>,
    phase: ViewerPhase,
}

impl<S: Surface> Viewer<S> {
    /// Validate `config`, size `surface` for a container of `container_width`
    /// pixels and enter the loading phase.
    pub fn new(
        config: ViewerConfig,
        surface: S,
        container_width: u32,
    ) -> Result<Self, ViewerError> {
        config.validate()?;

        let sequence = config.frame_sequence();
        let layout =
            SurfaceLayout::compute(container_width, config.width, config.height, config.count);
        let mut load_state = LoadState::new();
        load_state.start(sequence.len(), config.icon_url().is_some());

        let mut viewer = Self {
            cursor: FrameCursor::new(config.count),
            gesture: GestureController::new(),
            intro: IntroPlayer::new(config.intro, config.interval),
            sequence,
            surface,
            layout,
            load_state,
            frames: Vec::new(),
            icon: None,
            phase: ViewerPhase::Loading,
            config,
        };
        viewer.apply_layout();

        log::debug!(
            "Viewer created: {} frames, surface {}x{}, threshold {}px",
            viewer.sequence.len(),
            viewer.layout.width,
            viewer.layout.height,
            viewer.layout.threshold
        );
        Ok(viewer)
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Frame URLs to fetch.
    pub fn sequence(&self) -> &FrameSequence {
        &self.sequence
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    #[inline]
    pub fn phase(&self) -> ViewerPhase {
        self.phase
    }

    /// Index of the displayed frame.
    #[inline]
    pub fn current_frame(&self) -> usize {
        self.cursor.current()
    }

    /// Record one loaded frame and repaint the progress bar if enabled.
    pub fn on_frame_loaded(&mut self, loaded: usize, total: usize) {
        if self.phase != ViewerPhase::Loading {
            return;
        }
        self.load_state.frame_loaded();
        if self.config.progress {
            let result = render_progress(&self.layout, loaded, total);
            // Progress only fills rects, which cannot fail
            let _ = self.paint(&result);
        }
    }

    /// Accept the loaded assets, draw the first frame and decide the handoff.
    ///
    /// Returns `Ok(None)` if the viewer is no longer loading.
    pub fn on_load_complete(
        &mut self,
        assets: LoadedAssets<S::Image>,
    ) -> Result<Option<Handoff>, ViewerError> {
        if self.phase != ViewerPhase::Loading {
            return Ok(None);
        }

        self.load_state.complete();
        self.frames = assets.frames;
        self.icon = assets.icon;
        log::info!("Loaded {} frames", self.frames.len());

        self.advance(Step::Stay)?;

        if self.intro.start() {
            self.phase = ViewerPhase::Intro;
            Ok(Some(Handoff::PlayIntro {
                interval_ms: self.intro.interval_ms(),
            }))
        } else {
            self.phase = ViewerPhase::Interactive;
            Ok(Some(Handoff::Navigate))
        }
    }

    /// Record a failed load. The viewer stays inert from here on.
    ///
    /// Returns `true` for the first failure only.
    pub fn on_load_failed(&mut self, error: ViewerError) -> bool {
        if self.phase != ViewerPhase::Loading {
            return false;
        }
        log::error!("{}", error);
        log::error!("At least one image could not be loaded!");
        self.phase = ViewerPhase::Failed;
        self.load_state.fail(error)
    }

    /// Run one intro step.
    ///
    /// Returns `Ok(true)` once the intro is over and drag listeners should be
    /// attached; the host then stops its timer.
    pub fn tick_intro(&mut self) -> Result<bool, ViewerError> {
        if self.phase != ViewerPhase::Intro {
            return Ok(self.phase == ViewerPhase::Interactive);
        }

        let finished = match self.intro.tick(&self.cursor) {
            IntroTick::Advance(step) => {
                self.advance(step)?;
                false
            }
            IntroTick::AdvanceAndFinish(step) => {
                self.advance(step)?;
                true
            }
            IntroTick::Finish | IntroTick::Idle => true,
        };

        if finished {
            log::debug!("Intro finished at frame {}", self.cursor.current());
            self.phase = ViewerPhase::Interactive;
        }
        Ok(finished)
    }

    /// Move the cursor one step and redraw. `Step::Stay` redraws in place.
    pub fn advance(&mut self, step: Step) -> Result<usize, ViewerError> {
        let frame = self.cursor.advance(step);
        let icon_size = self.icon.as_ref().map(|icon| icon.size_f64());
        let result = render_frame(&self.layout, frame, icon_size);
        self.paint(&result)?;
        Ok(frame)
    }

    /// Primary pointer or first touch went down at `x`.
    pub fn pointer_down(&mut self, x: f64) {
        if self.phase == ViewerPhase::Interactive {
            self.gesture.pointer_down(x);
        }
    }

    /// Pointer moved to `x`. Returns the new frame index if a step happened.
    pub fn pointer_move(&mut self, x: f64) -> Result<Option<usize>, ViewerError> {
        if self.phase != ViewerPhase::Interactive {
            return Ok(None);
        }
        match self.gesture.pointer_move(x, self.layout.threshold) {
            Some(step) => self.advance(step).map(Some),
            None => Ok(None),
        }
    }

    pub fn pointer_up(&mut self) {
        self.gesture.pointer_up();
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Re-run the layout for a new container width.
    ///
    /// Returns `true` if the surface size changed. Once frames are on screen a
    /// size change repaints the current frame at the new scale.
    pub fn on_resize(&mut self, container_width: u32) -> Result<bool, ViewerError> {
        self.layout = SurfaceLayout::compute(
            container_width,
            self.config.width,
            self.config.height,
            self.config.count,
        );
        let resized = self.apply_layout();
        if resized {
            log::debug!(
                "Resized surface to {}x{}, threshold {}px",
                self.layout.width,
                self.layout.height,
                self.layout.threshold
            );
            if matches!(self.phase, ViewerPhase::Intro | ViewerPhase::Interactive) {
                self.advance(Step::Stay)?;
            }
        }
        Ok(resized)
    }

    fn apply_layout(&mut self) -> bool {
        let (current_width, current_height) = self.surface.size();
        if self.layout.needs_resize(current_width, current_height) {
            self.surface.set_size(self.layout.width, self.layout.height);
            true
        } else {
            false
        }
    }

    fn paint(&mut self, result: &RenderResult) -> Result<(), ViewerError> {
        for command in &result.commands {
            match *command {
                DrawCommand::Clear { width, height } => self.surface.clear_rect(width, height),
                DrawCommand::Image { image, x, y, width, height } => {
                    let asset = match image {
                        ImageRef::Frame(index) => self.frames.get(index),
                        ImageRef::Icon => self.icon.as_ref(),
                    };
                    let asset = asset.ok_or_else(|| {
                        ViewerError::Render(format!("{:?} is not loaded", image))
                    })?;
                    self.surface
                        .draw_image(&asset.image, x, y, width, height)
                        .map_err(ViewerError::Render)?;
                }
                DrawCommand::FillRect { x, y, width, height, color } => {
                    self.surface.fill_rect(x, y, width, height, color)
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AssetKind, LoadingPhase};

    #[derive(Clone, Debug, PartialEq)]
    enum Op {
        Clear,
        Draw(String, f64, f64, f64, f64),
        Fill(f64),
        Resize(u32, u32),
    }

    #[derive(Default)]
    struct RecordingSurface {
        width: u32,
        height: u32,
        ops: Vec<Op>,
    }

    impl RecordingSurface {
        fn redraws(&self) -> usize {
            self.ops.iter().filter(|op| **op == Op::Clear).count()
        }

        fn last_frame(&self) -> Option<&str> {
            self.ops.iter().rev().find_map(|op| match op {
                Op::Draw(name, ..) if name.starts_with('f') => Some(name.as_str()),
                _ => None,
            })
        }
    }

    impl Surface for RecordingSurface {
        type Image = String;

        fn clear_rect(&mut self, _width: f64, _height: f64) {
            self.ops.push(Op::Clear);
        }

        fn draw_image(
            &mut self,
            image: &String,
            x: f64,
            y: f64,
            w: f64,
            h: f64,
        ) -> Result<(), String> {
            self.ops.push(Op::Draw(image.clone(), x, y, w, h));
            Ok(())
        }

        fn fill_rect(&mut self, _x: f64, _y: f64, width: f64, _height: f64, _color: &str) {
            self.ops.push(Op::Fill(width));
        }

        fn size(&self) -> (u32, u32) {
            (self.width, self.height)
        }

        fn set_size(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
            self.ops.push(Op::Resize(width, height));
        }
    }

    fn config(count: usize, intro: bool) -> ViewerConfig {
        ViewerConfig {
            canvas: "#v".into(),
            count,
            prefix: "f".into(),
            intro,
            ..ViewerConfig::default()
        }
    }

    fn assets(count: usize, icon: Option<(u32, u32)>) -> LoadedAssets<String> {
        LoadedAssets {
            frames: (1..=count)
                .map(|i| LoadedAsset::new(format!("f{}", i), 600, 600))
                .collect(),
            icon: icon.map(|(w, h)| LoadedAsset::new("icon".to_string(), w, h)),
        }
    }

    #[test]
    fn test_new_sizes_surface() {
        let viewer = Viewer::new(config(4, false), RecordingSurface::default(), 300).unwrap();
        assert_eq!(viewer.surface().size(), (300, 300));
        assert_eq!(viewer.layout().threshold, 30);
        assert_eq!(viewer.phase(), ViewerPhase::Loading);
        assert_eq!(viewer.sequence().url(0), Some("f1"));
    }

    #[test]
    fn test_new_rejects_zero_frames() {
        let result = Viewer::new(config(0, false), RecordingSurface::default(), 300);
        assert!(matches!(result, Err(ViewerError::Config(_))));
    }

    #[test]
    fn test_progress_bar_painted_while_loading() {
        let mut viewer = Viewer::new(config(4, false), RecordingSurface::default(), 600).unwrap();
        viewer.on_frame_loaded(1, 4);
        viewer.on_frame_loaded(2, 4);
        // floor(2 * (300 - 20) / 4) = 140
        assert_eq!(viewer.surface().ops.last(), Some(&Op::Fill(140.0)));
        assert_eq!(viewer.load_state().frames_loaded(), 2);
    }

    #[test]
    fn test_progress_disabled() {
        let mut cfg = config(4, false);
        cfg.progress = false;
        let mut viewer = Viewer::new(cfg, RecordingSurface::default(), 600).unwrap();
        let ops_before = viewer.surface().ops.len();
        viewer.on_frame_loaded(1, 4);
        assert_eq!(viewer.surface().ops.len(), ops_before);
        assert_eq!(viewer.load_state().frames_loaded(), 1);
    }

    #[test]
    fn test_no_intro_hands_off_immediately() {
        let mut viewer = Viewer::new(config(4, false), RecordingSurface::default(), 600).unwrap();
        let handoff = viewer.on_load_complete(assets(4, None)).unwrap();
        assert_eq!(handoff, Some(Handoff::Navigate));
        assert_eq!(viewer.phase(), ViewerPhase::Interactive);
        assert_eq!(viewer.current_frame(), 0);
        assert_eq!(viewer.surface().last_frame(), Some("f1"));
        assert_eq!(viewer.load_state().phase(), LoadingPhase::Complete);
    }

    #[test]
    fn test_intro_plays_once_then_navigates() {
        let mut viewer = Viewer::new(config(5, true), RecordingSurface::default(), 600).unwrap();
        let handoff = viewer.on_load_complete(assets(5, None)).unwrap();
        assert_eq!(handoff, Some(Handoff::PlayIntro { interval_ms: 25 }));

        // Drag input ignored during the intro
        viewer.pointer_down(100.0);
        assert!(!viewer.is_dragging());

        let mut ticks = 0;
        while !viewer.tick_intro().unwrap() {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
        assert_eq!(viewer.current_frame(), 4);
        assert_eq!(viewer.phase(), ViewerPhase::Interactive);
        // One draw for the initial frame plus one per intro step
        assert_eq!(viewer.surface().redraws(), 5);
    }

    #[test]
    fn test_stay_redraws_without_moving() {
        let mut viewer = Viewer::new(config(4, false), RecordingSurface::default(), 600).unwrap();
        viewer.on_load_complete(assets(4, None)).unwrap();
        viewer.advance(Step::Forward).unwrap();

        let before = viewer.surface().redraws();
        assert_eq!(viewer.advance(Step::Stay).unwrap(), 1);
        assert_eq!(viewer.surface().redraws(), before + 1);
    }

    #[test]
    fn test_drag_scenario() {
        let mut viewer = Viewer::new(config(4, false), RecordingSurface::default(), 300).unwrap();
        viewer.on_load_complete(assets(4, None)).unwrap();

        viewer.pointer_down(200.0);
        assert_eq!(viewer.pointer_move(171.0).unwrap(), None);
        assert_eq!(viewer.pointer_move(169.0).unwrap(), Some(1));
        // Origin reset to 169: another 29 px does nothing
        assert_eq!(viewer.pointer_move(140.0).unwrap(), None);
        // Drag back to the right past the threshold
        assert_eq!(viewer.pointer_move(200.0).unwrap(), Some(0));
        assert_eq!(viewer.pointer_move(231.0).unwrap(), Some(3));

        viewer.pointer_up();
        assert_eq!(viewer.pointer_move(0.0).unwrap(), None);
        assert_eq!(viewer.current_frame(), 3);
    }

    #[test]
    fn test_icon_composited_on_top() {
        let mut viewer = Viewer::new(config(4, false), RecordingSurface::default(), 300).unwrap();
        viewer.on_load_complete(assets(4, Some((80, 40)))).unwrap();

        let ops = &viewer.surface().ops;
        assert_eq!(
            ops.last(),
            Some(&Op::Draw("icon".to_string(), 255.0, 275.0, 40.0, 20.0))
        );
    }

    #[test]
    fn test_failure_keeps_viewer_inert() {
        let mut viewer = Viewer::new(config(4, true), RecordingSurface::default(), 600).unwrap();
        let err = ViewerError::asset_load(AssetKind::Frame, "f3", "404");
        assert!(viewer.on_load_failed(err.clone()));
        assert!(!viewer.on_load_failed(err.clone()));
        assert_eq!(viewer.phase(), ViewerPhase::Failed);
        assert_eq!(viewer.load_state().error(), Some(&err));

        // No navigation, no intro, no frames drawn
        viewer.pointer_down(0.0);
        assert!(!viewer.is_dragging());
        assert!(!viewer.tick_intro().unwrap());
        assert_eq!(viewer.on_load_complete(assets(4, None)).unwrap(), None);
        assert_eq!(viewer.surface().last_frame(), None);
    }

    #[test]
    fn test_resize_redraws_only_when_size_changes() {
        let mut viewer = Viewer::new(config(4, false), RecordingSurface::default(), 600).unwrap();
        viewer.on_load_complete(assets(4, None)).unwrap();
        viewer.advance(Step::Forward).unwrap();
        let redraws = viewer.surface().redraws();

        // Wider container: still capped at nominal size
        assert!(!viewer.on_resize(900).unwrap());
        assert_eq!(viewer.surface().redraws(), redraws);

        assert!(viewer.on_resize(450).unwrap());
        assert_eq!(viewer.surface().size(), (450, 450));
        assert_eq!(viewer.surface().redraws(), redraws + 1);
        assert_eq!(viewer.current_frame(), 1);
        assert_eq!(viewer.surface().last_frame(), Some("f2"));
        // floor((450 / 2.5) / 4) = 45
        assert_eq!(viewer.layout().threshold, 45);
    }

    #[test]
    fn test_resize_while_loading_does_not_draw_frames() {
        let mut viewer = Viewer::new(config(4, false), RecordingSurface::default(), 600).unwrap();
        assert!(viewer.on_resize(300).unwrap());
        assert_eq!(viewer.surface().redraws(), 0);
    }
}
