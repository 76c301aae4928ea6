#![no_main]

use libfuzzer_sys::fuzz_target;
use rustpump_core::encoding::PackedFormat;
use rustpump_core::types::TimeOfDay;

fuzz_target!(|data: &[u8]| {
    for format in PackedFormat::ALL {
        if let Ok(t) = format.decode(data) {
            assert_eq!(data.len(), format.width());
            let _ = TimeOfDay::since_midnight(&t);
        }
    }
});
