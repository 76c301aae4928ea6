use chrono::{NaiveDate, NaiveDateTime};
use rustpump_core::encoding::{decode_cgm_time, decode_date, decode_time, PackedFormat};
use rustpump_core::services::bolus::BolusRequest;
use rustpump_core::types::{DeviceFamily, Insulin, StrokeTable, TimeOfDay};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

#[test]
fn history_timestamp_matches_fixture() {
    assert_eq!(
        decode_time(&[0x1F, 0x40, 0x00, 0x01, 0x05]).unwrap(),
        at(2005, 1, 1, 0, 0, 31)
    );
    assert_eq!(
        decode_time(&[0x75, 0xB7, 0x13, 0x04, 0x10]).unwrap(),
        at(2016, 6, 4, 19, 55, 53)
    );
    assert_eq!(
        decode_time(&[0x5D, 0xB3, 0x0F, 0x06, 0x10]).unwrap(),
        at(2016, 6, 6, 15, 51, 29)
    );
}

#[test]
fn history_date_matches_fixture() {
    assert_eq!(
        decode_date(&[0xBF, 0x0F]).unwrap(),
        at(2015, 10, 31, 0, 0, 0)
    );
    assert_eq!(
        decode_date(&[0x78, 0x10]).unwrap(),
        at(2016, 6, 24, 0, 0, 0)
    );
}

#[test]
fn cgm_timestamp_matches_fixture() {
    assert_eq!(
        decode_cgm_time(&[0x8D, 0x9B, 0x1D, 0x0C]).unwrap(),
        at(2012, 10, 29, 13, 27, 0)
    );
    assert_eq!(
        decode_cgm_time(&[0x14, 0xB6, 0x28, 0x10]).unwrap(),
        at(2016, 2, 8, 20, 54, 0)
    );
}

#[test]
fn decoded_timestamp_feeds_time_of_day() {
    let t = PackedFormat::Full
        .decode(&[0x75, 0xB7, 0x13, 0x04, 0x10])
        .unwrap();
    assert_eq!(TimeOfDay::since_midnight(&t).to_string(), "19:55");
}

#[test]
fn bolus_payloads_match_fixture() {
    let table = StrokeTable::default();
    let cases: [(i32, u8, &[u8]); 4] = [
        (1000, 22, &[0x0A]),
        (25_000, 22, &[0xFA]),
        (1000, 23, &[0x28, 0x00]),
        (10_050, 54, &[0x92, 0x01]),
    ];
    for (amount, family, want) in cases {
        let payload = BolusRequest::new(Insulin(amount), DeviceFamily(family))
            .payload(&table)
            .unwrap();
        assert_eq!(payload.as_bytes(), want, "{amount} mU on family {family}");
    }
}
