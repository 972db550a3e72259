#![no_main]

use libfuzzer_sys::fuzz_target;
use topic_tenancy::TenancyPlugin;

fuzz_target!(|data: &[u8]| {
    if data.len() > 256 {
        return;
    }
    if let Ok(pattern) = std::str::from_utf8(data) {
        // Invalid patterns must be reported, never panic
        let _ = TenancyPlugin::from_options([("regex", pattern)]);
    }
});
