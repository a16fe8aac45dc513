//! One-pass automatic rotation played after loading.

use crate::{FrameCursor, Step};

/// Current state of the intro.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroState {
    /// Not started yet
    Pending,
    /// Advancing one frame per tick
    Playing,
    /// Reached the last frame, or skipped; drag control may take over
    Finished,
}

/// What the caller should do after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntroTick {
    /// Redraw with this step and keep the timer running
    Advance(Step),
    /// Redraw with this step, stop the timer and attach drag navigation
    AdvanceAndFinish(Step),
    /// Stop the timer and attach drag navigation without drawing
    Finish,
    /// The intro is not running; nothing to do
    Idle,
}

/// Drives the intro rotation.
///
/// Like the playback controller it does not handle timing itself; the caller
/// invokes [`tick`](IntroPlayer::tick) every [`interval_ms`](IntroPlayer::interval_ms).
///
/// ## Example
///
/// ```rust
/// use spin360_view::{FrameCursor, IntroPlayer, IntroState, IntroTick, Step};
///
/// let mut cursor = FrameCursor::new(3);
/// let mut intro = IntroPlayer::new(true, 25);
/// intro.start();
///
/// assert_eq!(intro.tick(&cursor), IntroTick::Advance(Step::Forward));
/// cursor.advance(Step::Forward);
/// assert_eq!(intro.tick(&cursor), IntroTick::AdvanceAndFinish(Step::Forward));
/// cursor.advance(Step::Forward);
/// assert_eq!(intro.state(), IntroState::Finished);
/// ```
#[derive(Clone, Debug)]
pub struct IntroPlayer {
    enabled: bool,
    interval_ms: u32,
    state: IntroState,
}

impl IntroPlayer {
    pub fn new(enabled: bool, interval_ms: u32) -> Self {
        Self {
            enabled,
            interval_ms: interval_ms.max(1),
            state: IntroState::Pending,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Timer interval between intro steps.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    #[inline]
    pub fn state(&self) -> IntroState {
        self.state
    }

    /// Begin the intro.
    ///
    /// Returns `true` if the caller should schedule ticks. A disabled intro,
    /// or one that already ran, goes straight to `Finished` and returns `false`.
    pub fn start(&mut self) -> bool {
        if self.state != IntroState::Pending {
            return false;
        }
        if self.enabled {
            self.state = IntroState::Playing;
            true
        } else {
            self.state = IntroState::Finished;
            false
        }
    }

    /// Decide the next intro step given the cursor position.
    pub fn tick(&mut self, cursor: &FrameCursor) -> IntroTick {
        if self.state != IntroState::Playing {
            return IntroTick::Idle;
        }

        if cursor.is_at_last() {
            self.state = IntroState::Finished;
            return IntroTick::Finish;
        }

        if cursor.current() + 1 == cursor.last() {
            self.state = IntroState::Finished;
            IntroTick::AdvanceAndFinish(Step::Forward)
        } else {
            IntroTick::Advance(Step::Forward)
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.state == IntroState::Finished
    }
}
