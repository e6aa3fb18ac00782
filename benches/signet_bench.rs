#![allow(clippy::expect_used)]

use criterion::{criterion_group, criterion_main, Criterion};

use signet::{
    Digest, JsonMarshaller, KeyDerivation, Signer, TimestampSigner, UrlSafeSerializer,
};

fn make_signer(digest: Digest) -> Signer {
    Signer::new("bench-secret-key")
        .with_salt("bench")
        .with_digest(digest)
        .with_key_derivation(KeyDerivation::Hmac)
}

fn bench_signer(c: &mut Criterion) {
    for (label, digest) in [("sha1", Digest::Sha1), ("sha256", Digest::Sha256)] {
        let signer = make_signer(digest);
        let token = signer.sign("a session value of realistic length, say a user id");

        c.bench_function(&format!("sign_{label}"), |b| {
            b.iter(|| signer.sign("a session value of realistic length, say a user id"));
        });
        c.bench_function(&format!("unsign_{label}"), |b| {
            b.iter(|| signer.unsign(&token).expect("unsign"));
        });
    }
}

fn bench_timestamp_signer(c: &mut Criterion) {
    let signer = TimestampSigner::new(make_signer(Digest::Sha256), 3600);
    let token = signer.sign("a session value");
    let now = TimestampSigner::current_timestamp();

    c.bench_function("timed_sign", |b| {
        b.iter(|| signer.sign_at("a session value", now));
    });
    c.bench_function("timed_unsign", |b| {
        b.iter(|| signer.unsign_at(&token, now).expect("unsign"));
    });
}

fn bench_url_safe_serializer(c: &mut Criterion) {
    let serializer = UrlSafeSerializer::new(JsonMarshaller, make_signer(Digest::Sha256));
    let small = vec!["alpha", "beta", "gamma"];
    let large = "x".repeat(4096);

    let small_token = serializer.dumps(&small).expect("dumps");
    let large_token = serializer.dumps(&large).expect("dumps");

    c.bench_function("urlsafe_dumps_small", |b| {
        b.iter(|| serializer.dumps(&small).expect("dumps"));
    });
    c.bench_function("urlsafe_dumps_compressible", |b| {
        b.iter(|| serializer.dumps(&large).expect("dumps"));
    });
    c.bench_function("urlsafe_loads_small", |b| {
        b.iter(|| serializer.loads::<Vec<String>>(&small_token).expect("loads"));
    });
    c.bench_function("urlsafe_loads_compressible", |b| {
        b.iter(|| serializer.loads::<String>(&large_token).expect("loads"));
    });
}

criterion_group!(
    benches,
    bench_signer,
    bench_timestamp_signer,
    bench_url_safe_serializer
);
criterion_main!(benches);
