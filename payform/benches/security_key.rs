//! Benchmark suite for security key computation and callback verification.
//!
//! Measures:
//! - Request and callback security key digests
//! - Redirect URL construction
//! - Full callback parse and verification
//!
//! Run with: `cargo bench --bench security_key`

#![allow(clippy::let_underscore_must_use, reason = "Criterion benchmarks ignore results")]
#![allow(missing_docs, reason = "Benchmark functions are self-documenting")]

use std::hint::black_box;

use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use payform::{
    callback::CallbackVerifier,
    model::{Language, MerchantAccount, Order, PaymentMethod},
    redirect::PaymentUrlBuilder,
    signing::SecurityKey,
};
use rust_decimal::Decimal;

const CALLBACK: &str = "DateTime=2016-12-31+23%3a59%3a59&TransactionID=1234567890\
                        &OrderId=0987654321qwe&Amount=123.45&Currency=EUR\
                        &SecurityKey=036c0215b7197e33308c2a2cf219fbbf\
                        &RebillAnchor=4587fh8fhYTF5ftfytf%3d&PaymentAmount=123.45\
                        &PaymentCurrency=EUR&CardHolder=TEST+CARDHOLDER\
                        &CardNumber=411111******1111&Country=US&City=New-York&ECI=7\
                        &Code=5205&ErrorCode=3&Zip=12700&Address=Test&Phone=555-444-11-44\
                        &Email=test@cardholder.com&BankName=Chase&ThreedsEnrollment=0\
                        &IpCountry=RU&BinCountry=US&AuthCode=666555\
                        &GatewayTransactionId=BankTrId1&IpAddress=127.0.0.1\
                        &SpecialConditions=Validation+Required";

/// Setup test data for benchmarks
fn setup_merchant() -> MerchantAccount {
    MerchantAccount::new(12345, "3844908d-4c2a-42e1-9be0-91bb5d068d22").unwrap()
}

fn setup_order(description_len: usize) -> Order {
    Order::new("56789", Decimal::new(999, 2), "USD")
        .unwrap()
        .with_description("x".repeat(description_len))
        .with_valid_until(Utc.with_ymd_and_hms(2010, 1, 29, 16, 10, 0).unwrap())
}

/// Benchmark request key digests for growing descriptions
fn bench_request_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_security_key");
    let merchant = setup_merchant();

    for len in &[0usize, 64, 1024] {
        let order = setup_order(*len);
        group.bench_with_input(BenchmarkId::new("description_len", len), &order, |b, order| {
            b.iter(|| SecurityKey::for_request(black_box(&merchant), black_box(order)));
        });
    }

    group.finish();
}

fn bench_callback_key(c: &mut Criterion) {
    let merchant = setup_merchant();
    let order = setup_order(0);
    let time = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();

    c.bench_function("callback_security_key", |b| {
        b.iter(|| {
            SecurityKey::for_callback(
                black_box(&merchant),
                black_box(&order),
                black_box(123_456_789),
                black_box(time),
            )
        });
    });
}

fn bench_build_url(c: &mut Criterion) {
    let merchant = setup_merchant();
    let order = setup_order(12);

    c.bench_function("build_payment_url", |b| {
        b.iter(|| {
            let origin = "https://secure.payonlinesystem.com";
            let url = PaymentUrlBuilder::new(origin, &merchant, &order)
                .map(|builder| {
                    builder
                        .payment_method(PaymentMethod::Select)
                        .language(Language::English)
                        .custom_param("email", "test@test.test")
                })
                .and_then(|builder| builder.build());
            black_box(url)
        });
    });
}

/// Benchmark full callback parsing and verification
fn bench_verify_callback(c: &mut Criterion) {
    let _ = tracing_subscriber::fmt().with_max_level(tracing::Level::ERROR).try_init();
    let verifier = CallbackVerifier::new(setup_merchant());

    c.bench_function("verify_callback", |b| {
        b.iter(|| black_box(verifier.verify_query(black_box(CALLBACK))));
    });
}

criterion_group!(
    benches,
    bench_request_key,
    bench_callback_key,
    bench_build_url,
    bench_verify_callback
);
criterion_main!(benches);
