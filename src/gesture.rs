//! Drag gesture to frame step mapping.

use crate::Step;

/// Tracks a single-pointer horizontal drag.
///
/// Distance is measured incrementally: each time the drag crosses the
/// threshold the origin moves to the current pointer position, so one long
/// drag yields several discrete steps.
///
/// ## Example
///
/// ```rust
/// use spin360_view::{GestureController, Step};
///
/// let mut gesture = GestureController::new();
/// gesture.pointer_down(100.0);
/// assert_eq!(gesture.pointer_move(71.0, 30), None);
/// assert_eq!(gesture.pointer_move(69.0, 30), Some(Step::Forward));
/// gesture.pointer_up();
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureController {
    dragging: bool,
    origin_x: f64,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag at horizontal position `x`.
    pub fn pointer_down(&mut self, x: f64) {
        self.origin_x = x;
        self.dragging = true;
    }

    /// Feed a pointer move.
    ///
    /// Returns a step when the distance from the origin exceeds `threshold`
    /// pixels. Moving the pointer left (towards smaller `x`) steps forward.
    pub fn pointer_move(&mut self, x: f64, threshold: u32) -> Option<Step> {
        if !self.dragging {
            return None;
        }

        let dx = self.origin_x - x;
        if dx.abs() > threshold as f64 {
            self.origin_x = x;
            Some(if dx > 0.0 { Step::Forward } else { Step::Backward })
        } else {
            None
        }
    }

    /// End the drag.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Position the next step is measured from.
    #[inline]
    pub fn origin_x(&self) -> f64 {
        self.origin_x
    }
}
