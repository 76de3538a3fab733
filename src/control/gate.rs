//! Non-blocking gate cycle state machine.
//!
//! After a drum is counted the gate runs a three-phase cycle:
//!
//! ```text
//! Idle --begin()--> Clearing --(clearing elapsed)--> Open --(hold elapsed)--> Idle
//!                                  |                           |
//!                              OpenGate                    CloseGate
//! ```
//!
//! The machine is polled from the control loop and never sleeps, so sensing
//! and MQTT stay live while a drum is being released.

/// Reported gate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Open,
    Closed,
}

impl GateState {
    /// Wire representation used on the `block/state` topic.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "close",
        }
    }
}

/// Actuator command produced by a cycle phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateAction {
    /// Drive the gate servo to the open angle and report `open`.
    OpenGate,
    /// Drive the gate servo to the closed angle and report `close`.
    CloseGate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Waiting for the drum to clear the ultrasonic sensor.
    Clearing { started_ms: u64 },
    /// Gate is open, waiting out the hold time.
    Open { opened_ms: u64 },
}

/// Timer-driven release cycle for the blocking gate.
#[derive(Debug, Clone)]
pub struct GateCycle {
    clearing_ms: u32,
    open_hold_ms: u32,
    phase: Phase,
}

impl GateCycle {
    pub fn new(clearing_ms: u32, open_hold_ms: u32) -> Self {
        Self {
            clearing_ms,
            open_hold_ms,
            phase: Phase::Idle,
        }
    }

    /// Start a release cycle.  Ignored if one is already in progress; the
    /// control loop prevents this by not accepting detections mid-cycle.
    pub fn begin(&mut self, now_ms: u64) {
        if matches!(self.phase, Phase::Idle) {
            self.phase = Phase::Clearing { started_ms: now_ms };
        }
    }

    /// Advance the cycle; at most one phase transition per call.
    pub fn poll(&mut self, now_ms: u64) -> Option<GateAction> {
        match self.phase {
            Phase::Idle => None,
            Phase::Clearing { started_ms } => {
                if now_ms.saturating_sub(started_ms) >= u64::from(self.clearing_ms) {
                    self.phase = Phase::Open { opened_ms: now_ms };
                    Some(GateAction::OpenGate)
                } else {
                    None
                }
            }
            Phase::Open { opened_ms } => {
                if now_ms.saturating_sub(opened_ms) >= u64::from(self.open_hold_ms) {
                    self.phase = Phase::Idle;
                    Some(GateAction::CloseGate)
                } else {
                    None
                }
            }
        }
    }

    /// Whether a release cycle is currently running.
    pub fn in_progress(&self) -> bool {
        !matches!(self.phase, Phase::Idle)
    }

    /// Abort any in-flight cycle (full-reset command).  The caller is
    /// responsible for driving the servo closed.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle() -> GateCycle {
        GateCycle::new(500, 1000)
    }

    #[test]
    fn idle_cycle_produces_nothing() {
        let mut c = cycle();
        assert!(!c.in_progress());
        assert_eq!(c.poll(12345), None);
    }

    #[test]
    fn full_cycle_opens_then_closes() {
        let mut c = cycle();
        c.begin(1000);
        assert!(c.in_progress());

        assert_eq!(c.poll(1100), None);
        assert_eq!(c.poll(1499), None);
        assert_eq!(c.poll(1500), Some(GateAction::OpenGate));

        assert_eq!(c.poll(2000), None);
        assert_eq!(c.poll(2499), None);
        assert_eq!(c.poll(2500), Some(GateAction::CloseGate));

        assert!(!c.in_progress());
        assert_eq!(c.poll(3000), None);
    }

    #[test]
    fn begin_during_cycle_is_ignored() {
        let mut c = cycle();
        c.begin(0);
        assert_eq!(c.poll(500), Some(GateAction::OpenGate));
        // A second begin() must not restart the clearing phase.
        c.begin(600);
        assert_eq!(c.poll(1500), Some(GateAction::CloseGate));
    }

    #[test]
    fn late_poll_still_transitions_once() {
        // Loop jitter: a poll long after the deadline must emit exactly one
        // transition per call.
        let mut c = cycle();
        c.begin(0);
        assert_eq!(c.poll(10_000), Some(GateAction::OpenGate));
        assert_eq!(c.poll(30_000), Some(GateAction::CloseGate));
        assert_eq!(c.poll(60_000), None);
    }

    #[test]
    fn reset_aborts_cycle() {
        let mut c = cycle();
        c.begin(0);
        c.reset();
        assert!(!c.in_progress());
        assert_eq!(c.poll(5000), None);
    }
}
