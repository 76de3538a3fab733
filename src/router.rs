//! Inbound message routing.
//!
//! Translates raw MQTT topic/payload pairs into [`AppCommand`]s.  Kept free
//! of any MQTT client type so the dispatch rules can be tested on the host.

use log::warn;

use crate::app::commands::AppCommand;
use crate::config::Topics;
use crate::control::GateState;

/// Map an inbound message to a command, or `None` when the topic is not
/// handled or the payload is unusable.
pub fn route(topics: &Topics, topic: &str, payload: &[u8]) -> Option<AppCommand> {
    let text = match core::str::from_utf8(payload) {
        Ok(s) => s.trim(),
        Err(_) => {
            warn!("Non-UTF8 payload on '{}', dropping", topic);
            return None;
        }
    };

    if topic == topics.pos {
        match text.parse::<u8>() {
            Ok(requested) => Some(AppCommand::SetPosition(requested)),
            Err(_) => {
                warn!("Unparseable position '{}', dropping", text);
                None
            }
        }
    } else if topic == topics.block {
        // Anything but an explicit "open" closes the gate, matching the
        // kit's fail-closed convention.
        if text == "open" {
            Some(AppCommand::SetGate(GateState::Open))
        } else {
            Some(AppCommand::SetGate(GateState::Closed))
        }
    } else if topic == topics.reset {
        if text == "reset" {
            Some(AppCommand::Reset)
        } else {
            None
        }
    } else if topic == topics.get_sensor_type {
        Some(AppCommand::ReportSensorTypes)
    } else {
        None
    }
}
