//! MQTT messaging adapter.
//!
//! [`MqttEventSink`] maps [`AppEvent`]s onto the kit's wire scheme:
//!
//! - key/value publishes land on `"<topic>/<key>"` with the bare value as
//!   payload (`drum/count`, `block/state`, `pos/state`),
//! - telemetry is either the key/value scheme plus a JSON sensor-data
//!   document, or a single `{"pos": <int>}` cloud publish, per
//!   [`ReportProfile`],
//! - sensor-type descriptors are JSON with non-ASCII characters escaped to
//!   `\uXXXX`, which the classroom server requires.
//!
//! The raw client is abstracted behind [`MqttTransport`] so every mapping
//! rule is testable on the host; the ESP-IDF transport lives at the bottom
//! of this module behind the usual cfg gate.

use core::fmt::Write as _;

use log::warn;

use crate::app::events::{AppEvent, SensorTypeInfo, TelemetryData, SENSOR_TYPES};
use crate::app::ports::EventSink;
use crate::config::{ReportProfile, Topics};
use crate::error::CommsError;

// ───────────────────────────────────────────────────────────────
// Transport boundary
// ───────────────────────────────────────────────────────────────

/// Raw publish capability of an MQTT client.
pub trait MqttTransport {
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink
// ───────────────────────────────────────────────────────────────

/// Event sink that publishes application events over MQTT.
pub struct MqttEventSink<T> {
    topics: Topics,
    report: ReportProfile,
    transport: T,
}

impl<T: MqttTransport> MqttEventSink<T> {
    pub fn new(topics: Topics, report: ReportProfile, transport: T) -> Self {
        Self {
            topics,
            report,
            transport,
        }
    }

    pub fn transport(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Key/value publish in the kit's `"<topic>/<key>"` scheme.
    fn send_data(&mut self, topic: &str, key: &str, value: &str) {
        // Topic names are short and config-controlled; 96 bytes is ample.
        let mut full = heapless::String::<96>::new();
        if write!(full, "{}/{}", topic, key).is_err() {
            warn!("MQTT: topic '{}/{}' too long, dropped", topic, key);
            return;
        }
        if let Err(e) = self.transport.publish(&full, value.as_bytes()) {
            warn!("MQTT: publish to '{}' failed: {}", full, e);
        }
    }

    fn publish_json(&mut self, topic: &str, payload: &str) {
        if let Err(e) = self.transport.publish(topic, payload.as_bytes()) {
            warn!("MQTT: publish to '{}' failed: {}", topic, e);
        }
    }

    fn publish_sensor_types(&mut self) {
        let topics_topic = self.topics.sensor_types.clone();
        for info in &SENSOR_TYPES {
            let payload = sensor_type_payload(info);
            self.send_data(&topics_topic, info.sensor_id, &payload);
        }
    }

    fn publish_telemetry(&mut self, t: &TelemetryData) {
        match self.report {
            ReportProfile::KeyValue => {
                let mut doc = serde_json::Map::new();
                doc.insert("distance".into(), t.distance_cm.into());
                doc.insert("count".into(), t.count.into());
                // Analog channels are omitted when a divider read at a rail.
                if let Some(temp) = t.temperature_c {
                    doc.insert("temp".into(), temp.into());
                }
                if let Some(lux) = t.illuminance_lux {
                    doc.insert("lux".into(), lux.into());
                }
                let doc = serde_json::Value::Object(doc);
                let sensor_data = self.topics.sensor_data.clone();
                self.publish_json(&sensor_data, &doc.to_string());

                let (drum, pos, block) = (
                    self.topics.drum.clone(),
                    self.topics.pos.clone(),
                    self.topics.block.clone(),
                );
                self.send_data(&drum, "count", itoa(t.count).as_str());
                self.send_data(&pos, "state", itoa(u32::from(t.position)).as_str());
                self.send_data(&block, "state", t.gate.as_str());
            }
            ReportProfile::CloudJson => {
                let doc = serde_json::json!({ "pos": t.position });
                let cloud = self.topics.cloud.clone();
                self.publish_json(&cloud, &doc.to_string());
            }
        }
    }
}

impl<T: MqttTransport> EventSink for MqttEventSink<T> {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::DrumCounted(count) => {
                let drum = self.topics.drum.clone();
                self.send_data(&drum, "count", itoa(*count).as_str());
            }
            AppEvent::GateChanged(state) => {
                let block = self.topics.block.clone();
                self.send_data(&block, "state", state.as_str());
            }
            AppEvent::PositionChanged(pos) => {
                let topic = self.topics.pos.clone();
                self.send_data(&topic, "state", itoa(u32::from(*pos)).as_str());
            }
            AppEvent::Telemetry(t) => self.publish_telemetry(t),
            AppEvent::SensorTypes => self.publish_sensor_types(),
            // Lifecycle marker, serial-log only.
            AppEvent::Started => {}
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Payload helpers
// ───────────────────────────────────────────────────────────────

/// Decimal formatting without a heap allocation.
fn itoa(value: u32) -> heapless::String<10> {
    let mut s = heapless::String::new();
    // u32 always fits in 10 decimal digits.
    let _ = write!(s, "{}", value);
    s
}

/// Escape every non-ASCII character as `\uXXXX` (UTF-16 code units), the
/// form the classroom server's JSON parser expects.
pub fn escape_non_ascii(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                let _ = write!(out, "\\u{:04x}", unit);
            }
        }
    }
    out
}

/// Serialise one sensor-type descriptor, non-ASCII escaped.
pub fn sensor_type_payload(info: &SensorTypeInfo) -> String {
    let doc = serde_json::json!({
        "sensorId": info.sensor_id,
        "sensorType": info.sensor_type,
        "sensorNicNm": info.nickname,
        "channelCode": info.channel_code,
        "collectUnit": info.collect_unit,
    });
    escape_non_ascii(&doc.to_string())
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF transport
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub use esp_transport::EspMqttTransport;

#[cfg(target_os = "espidf")]
mod esp_transport {
    use std::sync::mpsc::Sender;

    use esp_idf_svc::mqtt::client::{
        EspMqttClient, EventPayload, MqttClientConfiguration, QoS,
    };
    use log::{info, warn};

    use super::MqttTransport;
    use crate::error::CommsError;

    /// Inbound message delivered by the client's event thread.
    pub type InboundMessage = (String, Vec<u8>);

    /// Transport over the ESP-IDF MQTT client.
    ///
    /// The client's connection events are drained on a dedicated thread;
    /// received messages are forwarded through an mpsc channel so the
    /// control loop can consume them at its own pace.
    pub struct EspMqttTransport {
        client: EspMqttClient<'static>,
    }

    impl EspMqttTransport {
        pub fn connect(
            broker_url: &str,
            client_id: &str,
            inbound: Sender<InboundMessage>,
        ) -> Result<Self, CommsError> {
            let conf = MqttClientConfiguration {
                client_id: Some(client_id),
                ..Default::default()
            };
            let (client, mut connection) = EspMqttClient::new(broker_url, &conf)
                .map_err(|_| CommsError::MqttConnectFailed)?;

            std::thread::spawn(move || {
                while let Ok(event) = connection.next() {
                    match event.payload() {
                        EventPayload::Received {
                            topic: Some(topic),
                            data,
                            ..
                        } => {
                            if inbound.send((topic.to_string(), data.to_vec())).is_err() {
                                // Control loop is gone; nothing left to do.
                                break;
                            }
                        }
                        EventPayload::Connected(_) => info!("MQTT: connected"),
                        EventPayload::Disconnected => warn!("MQTT: disconnected"),
                        _ => {}
                    }
                }
            });

            Ok(Self { client })
        }

        pub fn subscribe(&mut self, topic: &str) -> Result<(), CommsError> {
            self.client
                .subscribe(topic, QoS::AtMostOnce)
                .map(|_| ())
                .map_err(|_| CommsError::MqttSubscribeFailed)
        }
    }

    impl MqttTransport for EspMqttTransport {
        fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
            self.client
                .enqueue(topic, QoS::AtMostOnce, false, payload)
                .map(|_| ())
                .map_err(|_| CommsError::MqttPublishFailed)
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::GateState;

    #[derive(Default)]
    struct RecordingTransport {
        published: Vec<(String, String)>,
    }

    impl MqttTransport for RecordingTransport {
        fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
            self.published
                .push((topic.to_string(), String::from_utf8_lossy(payload).into()));
            Ok(())
        }
    }

    fn sink(report: ReportProfile) -> MqttEventSink<RecordingTransport> {
        MqttEventSink::new(Topics::default(), report, RecordingTransport::default())
    }

    #[test]
    fn count_goes_to_drum_count() {
        let mut s = sink(ReportProfile::KeyValue);
        s.emit(&AppEvent::DrumCounted(3));
        assert_eq!(
            s.transport().published,
            vec![("drum/count".to_string(), "3".to_string())]
        );
    }

    #[test]
    fn gate_state_uses_wire_words() {
        let mut s = sink(ReportProfile::KeyValue);
        s.emit(&AppEvent::GateChanged(GateState::Open));
        s.emit(&AppEvent::GateChanged(GateState::Closed));
        let payloads: Vec<&str> = s
            .transport()
            .published
            .iter()
            .map(|(_, p)| p.as_str())
            .collect();
        assert_eq!(payloads, vec!["open", "close"]);
    }

    #[test]
    fn keyvalue_telemetry_republishes_state() {
        let mut s = sink(ReportProfile::KeyValue);
        s.emit(&AppEvent::Telemetry(TelemetryData {
            distance_cm: 5.5,
            temperature_c: Some(24.0),
            illuminance_lux: None,
            count: 2,
            position: 1,
            gate: GateState::Closed,
        }));
        let topics: Vec<&str> = s
            .transport()
            .published
            .iter()
            .map(|(t, _)| t.as_str())
            .collect();
        assert_eq!(
            topics,
            vec!["sensor_data", "drum/count", "pos/state", "block/state"]
        );
    }

    #[test]
    fn cloud_telemetry_is_single_pos_document() {
        let mut s = sink(ReportProfile::CloudJson);
        s.emit(&AppEvent::Telemetry(TelemetryData {
            distance_cm: 0.0,
            temperature_c: None,
            illuminance_lux: None,
            count: 9,
            position: 2,
            gate: GateState::Closed,
        }));
        assert_eq!(
            s.transport().published,
            vec![("aws/etboard".to_string(), "{\"pos\":2}".to_string())]
        );
    }

    #[test]
    fn sensor_types_publish_under_their_ids() {
        let mut s = sink(ReportProfile::KeyValue);
        s.emit(&AppEvent::SensorTypes);
        let topics: Vec<&str> = s
            .transport()
            .published
            .iter()
            .map(|(t, _)| t.as_str())
            .collect();
        assert_eq!(topics, vec!["sensor_types/distance", "sensor_types/count"]);
    }

    #[test]
    fn escape_leaves_ascii_untouched() {
        assert_eq!(escape_non_ascii(r#"{"a":1}"#), r#"{"a":1}"#);
    }

    #[test]
    fn escape_encodes_hangul() {
        // '거' is U+AC70, '리' is U+B9AC
        assert_eq!(escape_non_ascii("거리"), "\\uac70\\ub9ac");
    }

    #[test]
    fn sensor_type_payload_is_pure_ascii() {
        for info in &SENSOR_TYPES {
            let payload = sensor_type_payload(info);
            assert!(payload.is_ascii(), "payload not ASCII: {payload}");
            assert!(payload.contains("\"sensorId\""));
            assert!(payload.contains("\"channelCode\":\"01\""));
        }
    }

    #[test]
    fn distance_descriptor_escapes_nickname() {
        let payload = sensor_type_payload(&SENSOR_TYPES[0]);
        assert!(payload.contains("\\uac70\\ub9ac"), "got {payload}");
    }
}
