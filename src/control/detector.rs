//! Drum-pass detection from ultrasonic range samples.
//!
//! A drum is counted when a range sample falls strictly inside the detection
//! window and enough time has passed since the previous accepted detection.
//! The debounce timer only restarts on *accepted* detections, so a drum
//! sitting inside the window does not keep pushing the deadline out.

/// Debounced window detector for the conveyor's ultrasonic ranger.
#[derive(Debug, Clone)]
pub struct DrumPassDetector {
    min_cm: f32,
    max_cm: f32,
    debounce_ms: u32,
    last_accept_ms: Option<u64>,
}

impl DrumPassDetector {
    pub fn new(min_cm: f32, max_cm: f32, debounce_ms: u32) -> Self {
        Self {
            min_cm,
            max_cm,
            debounce_ms,
            last_accept_ms: None,
        }
    }

    /// Feed one range sample; returns `true` when the sample is accepted as
    /// a drum passing the sensor.
    ///
    /// A `distance_cm` of `0.0` is the ranger's timeout sentinel and never
    /// matches the window (the window's lower bound is exclusive).
    pub fn observe(&mut self, distance_cm: f32, now_ms: u64) -> bool {
        if !(distance_cm > self.min_cm && distance_cm < self.max_cm) {
            return false;
        }
        if let Some(last) = self.last_accept_ms {
            if now_ms.saturating_sub(last) < u64::from(self.debounce_ms) {
                return false;
            }
        }
        self.last_accept_ms = Some(now_ms);
        true
    }

    /// Forget detection history (used by the full-reset command).
    pub fn reset(&mut self) {
        self.last_accept_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> DrumPassDetector {
        DrumPassDetector::new(2.0, 8.0, 500)
    }

    #[test]
    fn accepts_in_window_sample() {
        let mut d = detector();
        assert!(d.observe(5.0, 0));
    }

    #[test]
    fn window_bounds_are_exclusive() {
        let mut d = detector();
        assert!(!d.observe(2.0, 0));
        assert!(!d.observe(8.0, 0));
        assert!(d.observe(2.01, 0));
    }

    #[test]
    fn timeout_sentinel_never_detects() {
        let mut d = detector();
        assert!(!d.observe(0.0, 0));
    }

    #[test]
    fn debounce_rejects_rapid_repeat() {
        let mut d = detector();
        assert!(d.observe(5.0, 1000));
        assert!(!d.observe(5.0, 1300));
        // Rejected sample must not restart the debounce timer.
        assert!(d.observe(5.0, 1500));
    }

    #[test]
    fn debounce_boundary_is_inclusive() {
        let mut d = detector();
        assert!(d.observe(5.0, 0));
        assert!(!d.observe(5.0, 499));
        assert!(d.observe(5.0, 500));
    }

    #[test]
    fn reset_clears_history() {
        let mut d = detector();
        assert!(d.observe(5.0, 1000));
        d.reset();
        assert!(d.observe(5.0, 1001));
    }
}
