#[path = "../common/mod.rs"]
mod common;

use eepcheck::protocol::{crc8, crc8_update};
use proptest::prelude::*;

#[test]
fn crc8_reference_values() {
    assert_eq!(crc8(b"123456789"), 0xF4);
    assert_eq!(crc8(&[]), 0x00);
    // read-base-ID header: len_hi len_lo opt_len type
    assert_eq!(crc8(&[0x00, 0x01, 0x00, 0x05]), 0x70);
    assert_eq!(crc8(&[0x08]), 0x38);
}

#[test]
fn header_crc_of_4bs_frame() {
    let frame = common::fixtures::four_bs_frame();
    assert_eq!(crc8(&frame[1..5]), frame[5]);
    assert_eq!(crc8(&frame[6..23]), frame[23]);
}

#[test]
fn crc8_is_order_sensitive() {
    let data = [0xA5, 0x00, 0xFA, 0xFA, 0x08];
    let mut reversed = data;
    reversed.reverse();
    assert_ne!(crc8(&data), crc8(&reversed));
}

proptest! {
    #[test]
    fn crc8_matches_running_update(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let running = data.iter().fold(0u8, |acc, &b| crc8_update(acc, b));
        prop_assert_eq!(running, crc8(&data));
    }

    #[test]
    fn appended_crc_folds_to_zero(data in proptest::collection::vec(any::<u8>(), 1..64)) {
        let mut framed = data.clone();
        framed.push(crc8(&data));
        prop_assert_eq!(crc8(&framed), 0);
    }
}
