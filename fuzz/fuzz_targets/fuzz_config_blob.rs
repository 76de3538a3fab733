//! Fuzz target: configuration blob decoding
//!
//! Feeds arbitrary bytes through the postcard deserializer used for the
//! NVS config blob.  Decoding must never panic, and anything that decodes
//! must re-encode losslessly.
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use smartfactory::config::SystemConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(cfg) = postcard::from_bytes::<SystemConfig>(data) {
        let bytes = postcard::to_allocvec(&cfg).expect("re-encode");
        let again: SystemConfig = postcard::from_bytes(&bytes).expect("re-decode");
        // Byte-level comparison sidesteps NaN != NaN on the float fields.
        assert_eq!(bytes, postcard::to_allocvec(&again).expect("re-encode"));
    }
});
