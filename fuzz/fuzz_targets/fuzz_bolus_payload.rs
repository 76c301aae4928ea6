#![no_main]

use libfuzzer_sys::fuzz_target;
use rustpump_core::services::bolus::BolusRequest;
use rustpump_core::types::{DeviceFamily, Insulin, StrokeTable};

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }
    let amount = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let req = BolusRequest::new(Insulin(amount), DeviceFamily(data[4]));
    if let Ok(payload) = req.payload(&StrokeTable::default()) {
        assert!(!payload.is_empty() && payload.len() <= 2);
    }
});
