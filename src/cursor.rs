//! Wrap-around index of the displayed frame.

/// Direction of a single cursor step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Previous frame, wrapping from 0 to the last frame
    Backward,
    /// Stay on the current frame and redraw it
    Stay,
    /// Next frame, wrapping from the last frame to 0
    Forward,
}

impl Step {
    /// Reduce an arbitrary signed delta to a single step.
    #[inline]
    pub fn from_delta(delta: i64) -> Self {
        match delta.signum() {
            -1 => Step::Backward,
            1 => Step::Forward,
            _ => Step::Stay,
        }
    }

    #[inline]
    pub fn delta(self) -> i64 {
        match self {
            Step::Backward => -1,
            Step::Stay => 0,
            Step::Forward => 1,
        }
    }
}

/// Bounded, circular frame index.
///
/// The cursor does not draw anything itself; every call to [`advance`]
/// corresponds to exactly one redraw by the caller.
///
/// [`advance`]: FrameCursor::advance
///
/// ## Example
///
/// ```rust
/// use spin360_view::{FrameCursor, Step};
///
/// let mut cursor = FrameCursor::new(4);
/// assert_eq!(cursor.advance(Step::Backward), 3);
/// assert_eq!(cursor.advance(Step::Forward), 0);
/// assert_eq!(cursor.advance(Step::Stay), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameCursor {
    current: usize,
    frame_count: usize,
}

impl FrameCursor {
    /// Create a cursor at frame 0 over `frame_count` frames.
    pub fn new(frame_count: usize) -> Self {
        Self {
            current: 0,
            frame_count,
        }
    }

    /// Current frame index.
    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Total number of frames.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Index of the last frame.
    #[inline]
    pub fn last(&self) -> usize {
        self.frame_count.saturating_sub(1)
    }

    /// Returns `true` when the cursor sits on the last frame.
    #[inline]
    pub fn is_at_last(&self) -> bool {
        self.current == self.last()
    }

    /// Move one step and return the new index.
    ///
    /// `cursor = (cursor + delta + N) mod N`. With no frames the cursor stays at 0.
    pub fn advance(&mut self, step: Step) -> usize {
        if self.frame_count == 0 {
            self.current = 0;
            return 0;
        }
        let n = self.frame_count as i64;
        self.current = ((self.current as i64 + step.delta() + n) % n) as usize;
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_wraps_to_zero() {
        let mut cursor = FrameCursor::new(3);
        assert_eq!(cursor.advance(Step::Forward), 1);
        assert_eq!(cursor.advance(Step::Forward), 2);
        assert!(cursor.is_at_last());
        assert_eq!(cursor.advance(Step::Forward), 0);
    }

    #[test]
    fn test_backward_wraps_to_last() {
        let mut cursor = FrameCursor::new(5);
        assert_eq!(cursor.advance(Step::Backward), 4);
        assert_eq!(cursor.advance(Step::Backward), 3);
    }

    #[test]
    fn test_stay_does_not_move() {
        let mut cursor = FrameCursor::new(5);
        cursor.advance(Step::Forward);
        assert_eq!(cursor.advance(Step::Stay), 1);
        assert_eq!(cursor.current(), 1);
    }

    #[test]
    fn test_single_frame() {
        let mut cursor = FrameCursor::new(1);
        assert!(cursor.is_at_last());
        assert_eq!(cursor.advance(Step::Forward), 0);
        assert_eq!(cursor.advance(Step::Backward), 0);
    }

    #[test]
    fn test_zero_frames_is_guarded() {
        let mut cursor = FrameCursor::new(0);
        assert_eq!(cursor.advance(Step::Forward), 0);
        assert_eq!(cursor.advance(Step::Backward), 0);
    }

    #[test]
    fn test_wrap_around_law() {
        // Deterministic pseudo-random step sequences for several sizes.
        let mut seed: u64 = 0x9e37_79b9_7f4a_7c15;
        for n in 1..=40usize {
            let mut cursor = FrameCursor::new(n);
            let mut sum: i64 = 0;
            for _ in 0..500 {
                seed ^= seed << 13;
                seed ^= seed >> 7;
                seed ^= seed << 17;
                let step = if seed & 1 == 0 { Step::Forward } else { Step::Backward };
                sum += step.delta();
                let idx = cursor.advance(step);
                assert!(idx < n);
                assert_eq!(idx as i64, sum.rem_euclid(n as i64));
            }
        }
    }

    #[test]
    fn test_step_from_delta() {
        assert_eq!(Step::from_delta(-7), Step::Backward);
        assert_eq!(Step::from_delta(0), Step::Stay);
        assert_eq!(Step::from_delta(31), Step::Forward);
    }
}
