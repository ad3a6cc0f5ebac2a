#![allow(clippy::unwrap_used)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use cbor_item::{decode_value, encode_canonical, encode_value, Value};

fn sample_small() -> Vec<u8> {
    vec![0xa1, 0x61, 0x61, 0x01] // {"a":1}
}

fn sample_medium() -> Value {
    let mut entries = Vec::new();
    for i in 0..64_i64 {
        entries.push((Value::from(format!("k{i:03}")), Value::from_int(i)));
    }
    entries.push((
        Value::from("floats"),
        Value::Array(vec![
            Value::Double(1.5),
            Value::Double(100_000.0),
            Value::Double(1.1),
        ]),
    ));
    Value::Map(entries)
}

fn bench_codec(c: &mut Criterion) {
    let small = sample_small();
    c.bench_function("decode_small", |b| {
        b.iter(|| {
            let v = decode_value(black_box(&small)).unwrap();
            black_box(v);
        })
    });

    let medium = sample_medium();
    let medium_bytes = encode_value(&medium).unwrap();

    c.bench_function("decode_medium", |b| {
        b.iter(|| {
            let v = decode_value(black_box(&medium_bytes)).unwrap();
            black_box(v);
        })
    });

    c.bench_function("encode_medium", |b| {
        b.iter(|| {
            let bytes = encode_value(black_box(&medium)).unwrap();
            black_box(bytes);
        })
    });

    c.bench_function("encode_canonical_medium", |b| {
        b.iter(|| {
            let bytes = encode_canonical(black_box(&medium)).unwrap();
            black_box(bytes);
        })
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
