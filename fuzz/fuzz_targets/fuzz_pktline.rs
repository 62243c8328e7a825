//! Fuzz target for pkt-line framing.
//!
//! The reader must reject malformed input with an error, never a panic, and
//! anything it accepts must encode back to the bytes it was read from.

#![no_main]

use gitgate_git::PktLineReader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut reader = PktLineReader::new(data);
    let mut consumed = Vec::new();

    for _ in 0..256 {
        match reader.read() {
            Ok(Some(pkt)) => pkt.encode_into(&mut consumed),
            Ok(None) | Err(_) => break,
        }
    }

    // Lengths may be upper-case hex on input but encode lower-case.
    assert!(data.len() >= consumed.len());
    assert!(data[..consumed.len()].eq_ignore_ascii_case(&consumed));
});
