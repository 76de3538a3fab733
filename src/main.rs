//! Smart-factory kit firmware — main entry point.
//!
//! Hexagonal architecture: the control loop below owns only adapters and
//! timing; everything the kit *does* lives in [`AppService`] behind port
//! traits.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter   LogEventSink    NvsAdapter            │
//! │  (Sensor+Actuator) (EventSink)     (ConfigPort)          │
//! │  MqttEventSink     ConsoleDisplay  BoardClock            │
//! │  (EventSink)       (DisplayPort)   (time)                │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ─────────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)             │      │
//! │  │  drum detector · gate cycle · index wheel      │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::mpsc;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use smartfactory::adapters::display::ConsoleDisplay;
use smartfactory::adapters::hardware::HardwareAdapter;
use smartfactory::adapters::log_sink::LogEventSink;
use smartfactory::adapters::mqtt::{EspMqttTransport, MqttEventSink};
use smartfactory::adapters::nvs::NvsAdapter;
use smartfactory::adapters::time::BoardClock;
use smartfactory::adapters::wifi;
use smartfactory::app::events::AppEvent;
use smartfactory::app::ports::{ConfigPort, DisplayPort, EventSink};
use smartfactory::app::service::AppService;
use smartfactory::config::SystemConfig;
use smartfactory::drivers::hw_init;
use smartfactory::router;

// ── Event sink fan-out ────────────────────────────────────────
//
// Every event goes to the serial log; MQTT is best-effort and absent
// entirely when the kit runs offline.

struct AppSinks {
    log: LogEventSink,
    mqtt: Option<MqttEventSink<EspMqttTransport>>,
}

impl EventSink for AppSinks {
    fn emit(&mut self, event: &AppEvent) {
        self.log.emit(event);
        if let Some(mqtt) = self.mqtt.as_mut() {
            mqtt.emit(event);
        }
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("smartfactory v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Hardware peripherals ───────────────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Load config from NVS (or defaults) ─────────────────
    let nvs = match NvsAdapter::new() {
        Ok(n) => Some(n),
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults and no persistence", e);
            None
        }
    };
    let config = match nvs.as_ref().map(ConfigPort::load) {
        Some(Ok(cfg)) => {
            info!("Config loaded from NVS");
            cfg
        }
        Some(Err(e)) => {
            warn!("NVS config load failed ({}), using defaults", e);
            SystemConfig::default()
        }
        None => SystemConfig::default(),
    };

    // ── 4. Connectivity (best effort, kit works offline) ──────
    let sysloop = esp_idf_svc::eventloop::EspSystemEventLoop::take()?;
    let nvs_partition = esp_idf_svc::nvs::EspDefaultNvsPartition::take()?;
    let peripherals = esp_idf_svc::hal::peripherals::Peripherals::take()?;

    let (inbound_tx, inbound_rx) = mpsc::channel();
    let mut wifi_session = None;
    let mqtt_sink = match wifi::connect_station(
        peripherals.modem,
        sysloop,
        nvs_partition,
        &config.wifi_ssid,
        &config.wifi_password,
    ) {
        Ok(session) => {
            wifi_session = Some(session);
            match EspMqttTransport::connect(&config.mqtt_broker_url, "smartfactory", inbound_tx) {
                Ok(mut transport) => {
                    let inbound_topics = [
                        config.topics.pos.as_str(),
                        config.topics.block.as_str(),
                        config.topics.reset.as_str(),
                        config.topics.get_sensor_type.as_str(),
                    ];
                    for topic in inbound_topics {
                        if let Err(e) = transport.subscribe(topic) {
                            warn!("MQTT: subscribe '{}' failed: {}", topic, e);
                        }
                    }
                    Some(MqttEventSink::new(
                        config.topics.clone(),
                        config.report,
                        transport,
                    ))
                }
                Err(e) => {
                    warn!("MQTT connect failed ({}), running offline", e);
                    None
                }
            }
        }
        Err(e) => {
            warn!("WiFi connect failed ({}), running offline", e);
            None
        }
    };

    let mut sinks = AppSinks {
        log: LogEventSink::new(),
        mqtt: mqtt_sink,
    };

    // ── 5. Adapters and app service ───────────────────────────
    let clock = BoardClock::new();
    let mut hw = HardwareAdapter::new();
    let mut display = ConsoleDisplay::new();
    let mut app = AppService::new(config.clone());

    app.start(&mut hw, &mut sinks);
    {
        let lines = app.display_lines();
        display.render(&[lines[0].as_str(), lines[1].as_str(), lines[2].as_str()]);
    }

    // Keeps the WiFi session alive for the lifetime of the control loop.
    let _wifi_session = wifi_session;

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    let mut last_display_ms = 0u64;
    let mut last_report_ms = 0u64;

    loop {
        let now_ms = clock.uptime_ms();

        // Sensing, detection, gate cycle.
        app.tick(now_ms, &mut hw, &mut sinks);

        // Inbound MQTT commands, drained at loop cadence.
        while let Ok((topic, payload)) = inbound_rx.try_recv() {
            match router::route(&config.topics, &topic, &payload) {
                Some(cmd) => app.handle_command(cmd, &mut hw, &mut sinks),
                None => info!("Ignoring message on '{}'", topic),
            }
        }

        // Short periodic: display refresh.
        if now_ms.saturating_sub(last_display_ms) >= u64::from(config.display_interval_ms) {
            last_display_ms = now_ms;
            let lines = app.display_lines();
            display.render(&[lines[0].as_str(), lines[1].as_str(), lines[2].as_str()]);
        }

        // Long periodic: telemetry.
        if now_ms.saturating_sub(last_report_ms) >= u64::from(config.report_interval_ms) {
            last_report_ms = now_ms;
            app.report(&mut sinks);
        }

        std::thread::sleep(Duration::from_millis(u64::from(
            config.control_loop_interval_ms,
        )));
    }
}
