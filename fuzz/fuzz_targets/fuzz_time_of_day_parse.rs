#![no_main]

use libfuzzer_sys::fuzz_target;
use rustpump_core::types::TimeOfDay;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = core::str::from_utf8(data) {
        if let Ok(t) = TimeOfDay::parse(s) {
            assert_eq!(t.to_string(), s);
        }
    }
});
