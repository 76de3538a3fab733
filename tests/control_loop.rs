//! Integration tests: AppService → control logic → actuators.
//!
//! Drives the service through mock ports exactly the way main.rs does,
//! checking the end-to-end behaviour of drum counting, the gate release
//! cycle, wheel control, and the inbound command path.

use smartfactory::app::commands::AppCommand;
use smartfactory::app::events::AppEvent;
use smartfactory::app::ports::{ActuatorPort, EventSink, SensorPort, SensorSnapshot};
use smartfactory::app::service::AppService;
use smartfactory::config::SystemConfig;
use smartfactory::control::GateState;
use smartfactory::router;

// ── Mock implementations ──────────────────────────────────────

struct MockHw {
    distance_cm: f32,
    button_down: bool,
    gate_angles: Vec<u8>,
    gear_angles: Vec<u8>,
}

impl MockHw {
    fn new() -> Self {
        Self {
            distance_cm: 20.0,
            button_down: false,
            gate_angles: Vec::new(),
            gear_angles: Vec::new(),
        }
    }
}

impl SensorPort for MockHw {
    fn read_all(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            distance_cm: self.distance_cm,
            temperature_c: Some(25.0),
            illuminance_lux: Some(500.0),
        }
    }

    fn button_pressed(&mut self) -> bool {
        self.button_down
    }
}

impl ActuatorPort for MockHw {
    fn set_gate_angle(&mut self, angle: u8) {
        self.gate_angles.push(angle);
    }

    fn set_gear_angle(&mut self, angle: u8) {
        self.gear_angles.push(angle);
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

impl RecordingSink {
    fn counts(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::DrumCounted(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    fn gate_changes(&self) -> Vec<GateState> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::GateChanged(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    fn positions(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::PositionChanged(p) => Some(*p),
                _ => None,
            })
            .collect()
    }
}

fn setup() -> (AppService, MockHw, RecordingSink) {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHw::new();
    let mut sink = RecordingSink::default();
    app.start(&mut hw, &mut sink);
    (app, hw, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn startup_publishes_state_burst_and_homes_actuators() {
    let (app, hw, sink) = setup();

    assert_eq!(sink.counts(), vec![0]);
    assert_eq!(sink.gate_changes(), vec![GateState::Closed]);
    assert_eq!(sink.positions(), vec![0]);
    assert!(matches!(sink.events.last(), Some(AppEvent::Started)));

    // Home pose: wheel at table[0], gate closed.
    assert_eq!(hw.gear_angles, vec![180]);
    assert_eq!(hw.gate_angles, vec![0]);
    assert_eq!(app.count(), 0);
    assert_eq!(app.position(), 0);
    assert_eq!(app.gate_state(), GateState::Closed);
}

// ── Drum detection and gate cycle ─────────────────────────────

#[test]
fn drum_pass_counts_once_and_runs_full_gate_cycle() {
    let (mut app, mut hw, mut sink) = setup();
    sink.events.clear();
    hw.gate_angles.clear();

    // Distance sequence [10, 5, 5, 10] with ≥500 ms gaps.
    let samples = [(0u64, 10.0f32), (600, 5.0), (1200, 5.0), (1800, 10.0)];
    for (t, d) in samples {
        hw.distance_cm = d;
        app.tick(t, &mut hw, &mut sink);
    }
    // Let the open-hold timer expire.
    hw.distance_cm = 10.0;
    app.tick(2400, &mut hw, &mut sink);

    // Exactly one count, one open, one close.
    assert_eq!(sink.counts(), vec![1]);
    assert_eq!(sink.gate_changes(), vec![GateState::Open, GateState::Closed]);
    assert_eq!(hw.gate_angles, vec![75, 0]);
    assert_eq!(app.count(), 1);
    assert_eq!(app.gate_state(), GateState::Closed);
    assert!(!app.cycle_in_progress());
}

#[test]
fn second_eligible_sample_during_cycle_is_not_counted() {
    let (mut app, mut hw, mut sink) = setup();
    sink.events.clear();

    hw.distance_cm = 5.0;
    app.tick(1000, &mut hw, &mut sink);
    // 300 ms later the drum is still in front of the sensor.
    app.tick(1300, &mut hw, &mut sink);

    assert_eq!(sink.counts(), vec![1]);
    assert_eq!(app.count(), 1);
}

#[test]
fn window_bounds_do_not_trigger() {
    let (mut app, mut hw, mut sink) = setup();

    for (t, d) in [(0u64, 2.0f32), (600, 8.0), (1200, 0.0), (1800, 30.0)] {
        hw.distance_cm = d;
        app.tick(t, &mut hw, &mut sink);
    }

    assert_eq!(app.count(), 0);
    assert!(!app.cycle_in_progress());
}

#[test]
fn sensing_continues_while_gate_cycle_runs() {
    let (mut app, mut hw, mut sink) = setup();

    hw.distance_cm = 5.0;
    app.tick(0, &mut hw, &mut sink);
    assert!(app.cycle_in_progress());

    // The loop keeps ticking during the cycle; a button release mid-cycle
    // still advances the wheel.
    hw.distance_cm = 10.0;
    hw.button_down = true;
    app.tick(100, &mut hw, &mut sink);
    hw.button_down = false;
    app.tick(200, &mut hw, &mut sink);

    assert_eq!(app.position(), 1);
    assert!(app.cycle_in_progress());
}

// ── Button ────────────────────────────────────────────────────

#[test]
fn button_advances_on_release_edge_only() {
    let (mut app, mut hw, mut sink) = setup();
    sink.events.clear();
    hw.gear_angles.clear();

    // Held down across several ticks: no advance yet.
    hw.button_down = true;
    for t in [0u64, 100, 200, 300] {
        app.tick(t, &mut hw, &mut sink);
    }
    assert_eq!(app.position(), 0);
    assert!(sink.positions().is_empty());

    // Release: one advance.
    hw.button_down = false;
    app.tick(400, &mut hw, &mut sink);
    assert_eq!(app.position(), 1);
    assert_eq!(sink.positions(), vec![1]);
    assert_eq!(hw.gear_angles, vec![138]);
}

#[test]
fn button_wraps_after_position_three() {
    let (mut app, mut hw, mut sink) = setup();

    for i in 0..4u64 {
        hw.button_down = true;
        app.tick(i * 200, &mut hw, &mut sink);
        hw.button_down = false;
        app.tick(i * 200 + 100, &mut hw, &mut sink);
    }

    assert_eq!(app.position(), 0);
    assert_eq!(hw.gear_angles.last(), Some(&180));
}

// ── Inbound commands through the router ───────────────────────

#[test]
fn inbound_position_five_wraps_to_one() {
    let (mut app, mut hw, mut sink) = setup();
    sink.events.clear();
    hw.gear_angles.clear();

    let topics = app.config().topics.clone();
    let cmd = router::route(&topics, "pos", b"5").unwrap();
    app.handle_command(cmd, &mut hw, &mut sink);

    assert_eq!(app.position(), 1);
    assert_eq!(sink.positions(), vec![1]);
    assert_eq!(hw.gear_angles, vec![138]);
}

#[test]
fn inbound_gate_open_then_junk_closes() {
    let (mut app, mut hw, mut sink) = setup();
    sink.events.clear();
    hw.gate_angles.clear();

    let topics = app.config().topics.clone();
    let open = router::route(&topics, "block", b"open").unwrap();
    app.handle_command(open, &mut hw, &mut sink);
    let junk = router::route(&topics, "block", b"anything-else").unwrap();
    app.handle_command(junk, &mut hw, &mut sink);

    assert_eq!(hw.gate_angles, vec![75, 0]);
    assert_eq!(sink.gate_changes(), vec![GateState::Open, GateState::Closed]);
}

#[test]
fn gate_command_mid_cycle_aborts_cycle() {
    let (mut app, mut hw, mut sink) = setup();

    hw.distance_cm = 5.0;
    app.tick(0, &mut hw, &mut sink);
    assert!(app.cycle_in_progress());

    app.handle_command(AppCommand::SetGate(GateState::Closed), &mut hw, &mut sink);
    assert!(!app.cycle_in_progress());

    // The aborted cycle must not fire later.
    sink.events.clear();
    hw.distance_cm = 20.0;
    app.tick(5000, &mut hw, &mut sink);
    assert!(sink.gate_changes().is_empty());
}

#[test]
fn reset_restores_initial_state_and_republishes() {
    let (mut app, mut hw, mut sink) = setup();

    // Disturb everything: one counted drum, wheel at 2, gate open.
    hw.distance_cm = 5.0;
    app.tick(0, &mut hw, &mut sink);
    app.handle_command(AppCommand::SetPosition(2), &mut hw, &mut sink);
    app.handle_command(AppCommand::SetGate(GateState::Open), &mut hw, &mut sink);
    assert_eq!(app.count(), 1);

    sink.events.clear();
    hw.gate_angles.clear();
    hw.gear_angles.clear();

    let topics = app.config().topics.clone();
    let cmd = router::route(&topics, "reset", b"reset").unwrap();
    app.handle_command(cmd, &mut hw, &mut sink);

    assert_eq!(app.count(), 0);
    assert_eq!(app.position(), 0);
    assert_eq!(app.gate_state(), GateState::Closed);
    assert_eq!(sink.counts(), vec![0]);
    assert_eq!(sink.gate_changes(), vec![GateState::Closed]);
    assert_eq!(sink.positions(), vec![0]);
    assert_eq!(hw.gear_angles, vec![180]);
    assert_eq!(hw.gate_angles, vec![0]);
}

#[test]
fn reset_clears_debounce_history() {
    let (mut app, mut hw, mut sink) = setup();

    hw.distance_cm = 5.0;
    app.tick(1000, &mut hw, &mut sink);
    assert_eq!(app.count(), 1);

    app.handle_command(AppCommand::Reset, &mut hw, &mut sink);

    // Immediately after reset a drum in the window counts again.
    app.tick(1100, &mut hw, &mut sink);
    assert_eq!(app.count(), 1);
}

#[test]
fn sensor_type_request_emits_event() {
    let (mut app, mut hw, mut sink) = setup();
    sink.events.clear();

    let topics = app.config().topics.clone();
    let cmd = router::route(&topics, "get_sensor_type", b"").unwrap();
    app.handle_command(cmd, &mut hw, &mut sink);

    assert!(matches!(sink.events.as_slice(), [AppEvent::SensorTypes]));
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_snapshot_tracks_live_state() {
    let (mut app, mut hw, mut sink) = setup();

    hw.distance_cm = 5.0;
    app.tick(0, &mut hw, &mut sink);
    app.handle_command(AppCommand::SetPosition(3), &mut hw, &mut sink);

    sink.events.clear();
    app.report(&mut sink);

    match sink.events.as_slice() {
        [AppEvent::Telemetry(t)] => {
            assert_eq!(t.count, 1);
            assert_eq!(t.position, 3);
            assert!((t.distance_cm - 5.0).abs() < f32::EPSILON);
        }
        other => panic!("expected one telemetry event, got {other:?}"),
    }
}
