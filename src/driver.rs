use log::warn;

/// Frame accumulator that releases at most one simulation step per host frame.
///
/// Frame deltas are in host frames (1.0 is one frame at the nominal rate).
/// A step fires once the accumulated frames exceed the current speed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameGate {
    accumulated: f32,
}

impl FrameGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `frame_delta` and reports whether a step is due. Non-positive or
    /// non-finite deltas are ignored.
    pub fn advance(&mut self, frame_delta: f32, speed: u32) -> bool {
        if !frame_delta.is_finite() {
            warn!("ignoring non-finite frame delta {frame_delta}");
            return false;
        }
        if frame_delta <= 0.0 {
            return false;
        }

        self.accumulated += frame_delta;
        if self.accumulated > speed as f32 {
            self.accumulated = 0.0;
            return true;
        }
        false
    }

    /// Frames accumulated towards the next step.
    #[must_use]
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }
}

#[cfg(test)]
mod tests {
    use super::FrameGate;

    #[test]
    fn fires_once_counter_exceeds_speed() {
        let mut gate = FrameGate::new();

        let fired: Vec<bool> = (0..9).map(|_| gate.advance(1.0, 8)).collect();

        assert_eq!(fired.iter().filter(|fired| **fired).count(), 1);
        assert!(fired[8]);
        assert_eq!(gate.accumulated(), 0.0);
    }

    #[test]
    fn large_delta_still_fires_only_once() {
        let mut gate = FrameGate::new();

        assert!(gate.advance(100.0, 4));
        assert!(!gate.advance(1.0, 4));
    }

    #[test]
    fn non_positive_and_non_finite_deltas_are_ignored() {
        let mut gate = FrameGate::new();

        assert!(!gate.advance(0.0, 0));
        assert!(!gate.advance(-3.0, 0));
        assert!(!gate.advance(f32::NAN, 0));
        assert!(!gate.advance(f32::INFINITY, 0));
        assert_eq!(gate.accumulated(), 0.0);
    }

    #[test]
    fn fractional_frames_accumulate() {
        let mut gate = FrameGate::new();

        assert!(!gate.advance(0.5, 1));
        assert!(!gate.advance(0.5, 1));
        assert!(gate.advance(0.5, 1));
    }
}
