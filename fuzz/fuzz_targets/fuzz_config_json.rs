//! Fuzz target: `ControllerConfig::from_json`
//!
//! Feeds arbitrary UTF-8 to the config loader.  Verifies:
//! - No panics under any document
//! - Every accepted config also passes `validate()`
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use intersection::config::ControllerConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = ControllerConfig::from_json(text) {
        assert!(config.validate().is_ok());
        assert!(config.timing.init_ms > 0);
        assert!(config.timing.yellow_ms > 0);
    }
});
