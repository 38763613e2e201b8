// eepcheck/src/protocol/checksum.rs

/// CRC8 generator polynomial x^8 + x^2 + x + 1 (no reflection, init 0)
pub const CRC8_POLYNOMIAL: u8 = 0x07;

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ CRC8_POLYNOMIAL
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Lookup table, computed at compile time.
pub static CRC8_TABLE: [u8; 256] = build_table();

/// Fold one byte into a running CRC8 accumulator.
#[inline]
pub fn crc8_update(accumulator: u8, byte: u8) -> u8 {
    CRC8_TABLE[(accumulator ^ byte) as usize]
}

/// CRC8 over a byte range, seeded with 0.
pub fn crc8(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, &b| crc8_update(acc, b))
}

/// CRC8 over several ranges treated as one contiguous sequence
/// (data ++ optional data).
pub fn crc8_chain(parts: &[&[u8]]) -> u8 {
    parts
        .iter()
        .flat_map(|p| p.iter())
        .fold(0u8, |acc, &b| crc8_update(acc, b))
}
