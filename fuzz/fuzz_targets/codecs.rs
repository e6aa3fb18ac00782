#![no_main]
use libfuzzer_sys::fuzz_target;
use signet::encoding::{b64_decode, b64_encode, bytes_to_int, int_to_bytes};

fuzz_target!(|data: &[u8]| {
    // Encoded output always decodes back to the input.
    let encoded = b64_encode(data);
    assert_eq!(
        b64_decode(&encoded).expect("own output must decode"),
        data,
        "base64 roundtrip mismatch"
    );

    // Decoding arbitrary text must never panic, and anything it accepts
    // must re-encode to the same text.
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(bytes) = b64_decode(text) {
            assert_eq!(b64_encode(&bytes), text, "decode accepted non-canonical text");
        }
    }

    // Compact integers: any accepted byte width must round-trip through
    // the minimal encoding of the value it decodes to.
    if let Ok(n) = bytes_to_int(data) {
        assert_eq!(bytes_to_int(&int_to_bytes(n)).expect("minimal width"), n);
    }
});
