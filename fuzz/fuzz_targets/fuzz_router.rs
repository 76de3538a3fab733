//! Fuzz target: `router::route`
//!
//! Splits arbitrary input into a topic string and a raw payload and asserts
//! that dispatch never panics, whatever the broker delivers.
//!
//! cargo fuzz run fuzz_router

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartfactory::config::Topics;
use smartfactory::router;

fuzz_target!(|data: &[u8]| {
    let topics = Topics::default();

    // First byte picks the split point between topic and payload.
    let Some((&split, rest)) = data.split_first() else {
        return;
    };
    let split = usize::from(split).min(rest.len());
    let (topic_bytes, payload) = rest.split_at(split);

    if let Ok(topic) = core::str::from_utf8(topic_bytes) {
        let _ = router::route(&topics, topic, payload);
    }

    // The known topics must also survive any payload.
    for topic in ["pos", "block", "reset", "get_sensor_type"] {
        let _ = router::route(&topics, topic, payload);
    }
});
