//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the drum detector, the gate cycle, the index wheel
//! and the running count.  It exposes a clean, hardware-agnostic API; all
//! I/O flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │          AppService           │
//! ActuatorPort ◀──│ detector · gate cycle · wheel │
//!                 └──────────────────────────────┘
//! ```

use core::fmt::Write as _;

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::{DrumPassDetector, GateAction, GateCycle, GateState, IndexWheel};

use super::commands::AppCommand;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, EventSink, SensorPort, SensorSnapshot};

/// One OLED line, sized for the kit's 128-px display at the default font.
pub type DisplayLine = heapless::String<24>;

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    detector: DrumPassDetector,
    cycle: GateCycle,
    wheel: IndexWheel,
    count: u32,
    gate: GateState,
    sensors: SensorSnapshot,
    button_was_down: bool,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware — call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let detector = DrumPassDetector::new(
            config.detect_min_cm,
            config.detect_max_cm,
            config.debounce_ms,
        );
        let cycle = GateCycle::new(config.gate_clearing_ms, config.gate_open_hold_ms);
        let wheel = IndexWheel::new(config.gear_angles);
        Self {
            config,
            detector,
            cycle,
            wheel,
            count: 0,
            gate: GateState::Closed,
            sensors: SensorSnapshot::default(),
            button_was_down: false,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive the actuators to their power-on pose and publish the initial
    /// state burst.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.apply_initial_state(hw, sink);
        sink.emit(&AppEvent::Started);
        info!("AppService started ({})", self.config.firmware_version);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: read sensors → button → detection →
    /// gate cycle.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u64,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) {
        // 1. Read sensors via SensorPort
        self.sensors = hw.read_all();

        // 2. Button release edge advances the index wheel
        let down = hw.button_pressed();
        if self.button_was_down && !down {
            let pos = self.wheel.advance();
            hw.set_gear_angle(self.wheel.angle());
            sink.emit(&AppEvent::PositionChanged(pos));
        }
        self.button_was_down = down;

        // 3. Drum detection.  Suppressed while a release cycle is running
        // so one drum produces exactly one count and one gate cycle.
        if !self.cycle.in_progress() && self.detector.observe(self.sensors.distance_cm, now_ms) {
            self.count += 1;
            sink.emit(&AppEvent::DrumCounted(self.count));
            self.cycle.begin(now_ms);
        }

        // 4. Advance the gate cycle
        if let Some(action) = self.cycle.poll(now_ms) {
            self.apply_gate(action_state(action), hw, sink);
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process an external command (from MQTT or serial).
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            AppCommand::SetPosition(requested) => {
                let pos = self.wheel.set(requested);
                hw.set_gear_angle(self.wheel.angle());
                sink.emit(&AppEvent::PositionChanged(pos));
                info!("Index wheel moved to {} (requested {})", pos, requested);
            }
            AppCommand::SetGate(state) => {
                // A direct gate command overrides any in-flight release
                // cycle rather than fighting it.
                if self.cycle.in_progress() {
                    warn!("Gate command received mid-cycle, aborting cycle");
                    self.cycle.reset();
                }
                self.apply_gate(state, hw, sink);
            }
            AppCommand::Reset => {
                info!("Full state reset requested");
                self.count = 0;
                self.wheel.reset();
                self.detector.reset();
                self.cycle.reset();
                self.apply_initial_state(hw, sink);
            }
            AppCommand::ReportSensorTypes => {
                sink.emit(&AppEvent::SensorTypes);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current state.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            distance_cm: self.sensors.distance_cm,
            temperature_c: self.sensors.temperature_c,
            illuminance_lux: self.sensors.illuminance_lux,
            count: self.count,
            position: self.wheel.position(),
            gate: self.gate,
        }
    }

    /// Emit a periodic telemetry event (long-cadence reporting).
    pub fn report(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
    }

    /// Render the three status lines for the display port.
    pub fn display_lines(&self) -> [DisplayLine; 3] {
        let mut version = DisplayLine::new();
        let mut count = DisplayLine::new();
        let mut pos = DisplayLine::new();
        let _ = write!(version, "{}", self.config.firmware_version);
        let _ = write!(count, "count: {}", self.count);
        let _ = write!(pos, "pos: {}", self.wheel.position());
        [version, count, pos]
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn position(&self) -> u8 {
        self.wheel.position()
    }

    pub fn gate_state(&self) -> GateState {
        self.gate
    }

    /// Whether a gate release cycle is currently running.
    pub fn cycle_in_progress(&self) -> bool {
        self.cycle.in_progress()
    }

    /// Live configuration (adapters read topic names and intervals here).
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    // ── Internal ──────────────────────────────────────────────

    /// Home pose plus the count/gate/position publish burst.  Shared by
    /// startup and the reset command.
    fn apply_initial_state(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        self.gate = GateState::Closed;
        hw.set_gear_angle(self.wheel.angle());
        hw.set_gate_angle(self.config.gate_closed_angle);
        sink.emit(&AppEvent::DrumCounted(self.count));
        sink.emit(&AppEvent::GateChanged(self.gate));
        sink.emit(&AppEvent::PositionChanged(self.wheel.position()));
    }

    /// Drive the gate servo and report the new state.
    fn apply_gate(
        &mut self,
        state: GateState,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let angle = match state {
            GateState::Open => self.config.gate_open_angle,
            GateState::Closed => self.config.gate_closed_angle,
        };
        hw.set_gate_angle(angle);
        self.gate = state;
        sink.emit(&AppEvent::GateChanged(state));
    }
}

fn action_state(action: GateAction) -> GateState {
    match action {
        GateAction::OpenGate => GateState::Open,
        GateAction::CloseGate => GateState::Closed,
    }
}
