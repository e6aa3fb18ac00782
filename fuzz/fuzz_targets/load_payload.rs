#![no_main]
use libfuzzer_sys::fuzz_target;
use signet::{JsonMarshaller, KeyDerivation, Signer, UrlSafeSerializer};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let serializer = UrlSafeSerializer::new(
        JsonMarshaller,
        Signer::new("fuzz-secret")
            .with_salt("fuzz")
            .with_key_derivation(KeyDerivation::Hmac),
    );

    // Arbitrary payload text: marked-or-not, decoding and inflating must
    // fail cleanly, never panic.
    let _ = serializer.load_payload(text);

    // Full token path, signature and all.
    let _ = serializer.loads::<serde_json::Value>(text);
});
