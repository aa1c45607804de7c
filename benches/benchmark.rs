//! Benchmarks for cardcheck.
//!
//! Run with: cargo bench

use cardcheck::catalog::{issuer, Catalog};
use cardcheck::classify::{classify, normalize};
use cardcheck::{luhn, Pipeline, ValidationRequest, YearMonth};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// Test card numbers
const VISA_16: &str = "4111111111111111";
const VISA_16_FORMATTED: &str = "4111-1111-1111-1111";
const MASTERCARD: &str = "5500000000000004";
const AMEX: &str = "378282246310005";

const VISA_DIGITS: [u8; 16] = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];

const NOW: YearMonth = YearMonth {
    year: 2024,
    month: 6,
};

fn request(number: &str) -> ValidationRequest {
    ValidationRequest::new(number)
        .holder("John Smith")
        .expiry(11, 2030)
        .cvv("123")
}

/// Full pipeline, including issuer detection and secondary checks
fn bench_pipeline(c: &mut Criterion) {
    let pipeline = Pipeline::new();
    let mut group = c.benchmark_group("pipeline");

    group.bench_function("visa_16_raw", |b| {
        let req = request(VISA_16);
        b.iter(|| pipeline.validate_at(black_box(&req), NOW))
    });

    group.bench_function("visa_16_formatted", |b| {
        let req = request(VISA_16_FORMATTED);
        b.iter(|| pipeline.validate_at(black_box(&req), NOW))
    });

    group.bench_function("mastercard", |b| {
        let req = request(MASTERCARD);
        b.iter(|| pipeline.validate_at(black_box(&req), NOW))
    });

    group.bench_function("amex_with_override", |b| {
        let req = request(AMEX).issuer(issuer::AMEX);
        b.iter(|| pipeline.validate_at(black_box(&req), NOW))
    });

    group.finish();
}

/// Classification alone: first-match scan over the ordered catalog
fn bench_classify(c: &mut Criterion) {
    let catalog = Catalog::builtin();
    let mut group = c.benchmark_group("classify");

    // First catalog positions match early; UnionPay is last
    group.bench_function("electron_first_entry", |b| {
        b.iter(|| classify(black_box("4026000000000002"), catalog))
    });

    group.bench_function("unionpay_last_entry", |b| {
        b.iter(|| classify(black_box("6212345678901234"), catalog))
    });

    group.bench_function("no_match", |b| {
        b.iter(|| classify(black_box("1234567812345678"), catalog))
    });

    group.finish();
}

/// Checksum and normalization primitives
fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("luhn_digits", |b| {
        b.iter(|| luhn::validate(black_box(&VISA_DIGITS)))
    });

    group.bench_function("luhn_str", |b| {
        b.iter(|| luhn::validate_str(black_box(VISA_16)))
    });

    group.bench_function("normalize", |b| {
        b.iter(|| normalize(black_box(" 4111-1111 1111 1111")))
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_classify, bench_primitives);
criterion_main!(benches);
