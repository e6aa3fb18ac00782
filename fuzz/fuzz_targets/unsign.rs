#![no_main]
use libfuzzer_sys::fuzz_target;
use signet::{KeyDerivation, Signer, TimestampSigner};

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let signer = Signer::new("fuzz-secret")
        .with_salt("fuzz")
        .with_key_derivation(KeyDerivation::Hmac);

    // Arbitrary input must never panic, and must only verify if it is
    // exactly what sign() produces.
    if let Ok(value) = signer.unsign(input) {
        assert_eq!(signer.sign(&value), input, "unsign accepted a non-token");
    }

    let timed = TimestampSigner::new(
        Signer::new("fuzz-secret")
            .with_salt("fuzz")
            .with_key_derivation(KeyDerivation::Hmac),
        3600,
    );
    let _ = timed.unsign_at(input, 1_700_000_000);
});
