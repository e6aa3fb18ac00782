//! Regression tests pinning token output against stored vectors.
//! If any test here fails, the token format has changed and tokens
//! issued by existing deployments will stop verifying.

use signet::{Digest, KeyDerivation, Signer, TimestampSigner};

use signet::encoding::{bytes_to_int, int_to_bytes};

/// Load test vectors from testdata/vectors.json.
fn load_vectors() -> serde_json::Value {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/vectors.json");
    let data = std::fs::read_to_string(path).expect("failed to read test vectors file");
    serde_json::from_str(&data).expect("failed to parse test vectors JSON")
}

/// Find a vector by name.
fn find_vector(vectors: &serde_json::Value, name: &str) -> serde_json::Value {
    vectors["vectors"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["name"].as_str().unwrap() == name)
        .unwrap_or_else(|| panic!("test vector '{name}' not found"))
        .clone()
}

/// Build the signer a vector describes.
fn signer_for(v: &serde_json::Value) -> Signer {
    let digest = match v["digest"].as_str().unwrap() {
        "sha1" => Digest::Sha1,
        "sha256" => Digest::Sha256,
        "sha512" => Digest::Sha512,
        other => panic!("unknown digest in vector: {other}"),
    };
    let derivation = match v["key_derivation"].as_str().unwrap() {
        "concat" => KeyDerivation::Concat,
        "django-concat" => KeyDerivation::DjangoConcat,
        "hmac" => KeyDerivation::Hmac,
        "none" => KeyDerivation::None,
        other => panic!("unknown key derivation in vector: {other}"),
    };
    Signer::new(v["secret"].as_str().unwrap())
        .with_salt(v["salt"].as_str().unwrap())
        .with_digest(digest)
        .with_key_derivation(derivation)
}

#[test]
fn signing_vectors_match() {
    let vectors = load_vectors();
    for name in [
        "hmac_sha1_cookie_session",
        "default_configuration",
        "concat_derivation",
        "none_derivation",
        "hmac_sha256_cookie_session",
        "hmac_sha512_cookie_session",
    ] {
        let v = find_vector(&vectors, name);
        let signer = signer_for(&v);
        let value = v["value"].as_str().unwrap();
        let token = v["token"].as_str().unwrap();

        assert_eq!(signer.sign(value), token, "{name}: token mismatch");
        assert_eq!(
            signer.unsign(token).unwrap(),
            value,
            "{name}: unsign mismatch"
        );
    }
}

#[test]
fn derived_key_vectors_match() {
    let vectors = load_vectors();
    for name in ["hmac_sha1_cookie_session", "concat_derivation"] {
        let v = find_vector(&vectors, name);
        let signer = signer_for(&v);
        assert_eq!(
            hex::encode(signer.derive_key().as_slice()),
            v["derived_key_hex"].as_str().unwrap(),
            "{name}: derived key mismatch"
        );
    }
}

#[test]
fn timestamped_vector_matches() {
    let vectors = load_vectors();
    let v = find_vector(&vectors, "timestamped_at_1700000000");
    let timestamp = v["timestamp"].as_u64().unwrap();
    let token = v["token"].as_str().unwrap();

    assert_eq!(
        signet::encoding::b64_encode(&int_to_bytes(timestamp)),
        v["encoded_timestamp"].as_str().unwrap()
    );

    let signer = TimestampSigner::new(signer_for(&v), 0);
    assert_eq!(signer.sign_at(v["value"].as_str().unwrap(), timestamp), token);

    let (value, recovered) = signer
        .unsign_with_timestamp(token, timestamp + 10)
        .unwrap();
    assert_eq!(value, v["value"].as_str().unwrap());
    assert_eq!(recovered, timestamp);
}

#[test]
fn url_safe_vector_matches() {
    let vectors = load_vectors();
    let v = find_vector(&vectors, "url_safe_uncompressed_list");
    let serializer = signet::UrlSafeSerializer::new(signet::JsonMarshaller, signer_for(&v));

    let payload: Vec<String> =
        serde_json::from_str(v["payload_json"].as_str().unwrap()).unwrap();
    let token = v["token"].as_str().unwrap();

    assert_eq!(
        serializer.dump_payload(&payload).unwrap(),
        v["payload_text"].as_str().unwrap()
    );
    assert_eq!(serializer.dumps(&payload).unwrap(), token);
    assert_eq!(serializer.loads::<Vec<String>>(token).unwrap(), payload);
}

#[test]
fn compact_int_vectors_match() {
    let vectors = load_vectors();
    for v in vectors["compact_ints"].as_array().unwrap() {
        let n = v["n"].as_u64().unwrap();
        let expected = v["hex"].as_str().unwrap();
        assert_eq!(hex::encode(int_to_bytes(n)), expected, "encode {n}");
        assert_eq!(
            bytes_to_int(&hex::decode(expected).unwrap()).unwrap(),
            n,
            "decode {expected}"
        );
    }
}

#[test]
fn forged_signature_vector_is_rejected() {
    let vectors = load_vectors();
    let v = find_vector(&vectors, "hmac_sha1_cookie_session");
    let signer = signer_for(&v);
    assert!(signer.unsign("hello.AAAA").is_err());
}
