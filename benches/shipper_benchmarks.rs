//! Criterion benchmarks for log_shipper

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use log_shipper::prelude::*;
use log_shipper::transport::payload;
use log_shipper::RecordBuffer;
use serde_json::json;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

struct NullTransport;

impl Transport for NullTransport {
    fn send(&self, _payload: Vec<u8>) -> DeliveryOutcome {
        DeliveryOutcome::Delivered(200)
    }

    fn endpoint(&self) -> &str {
        "memory://null"
    }

    fn name(&self) -> &str {
        "null"
    }
}

struct NullEcho;

impl EchoSink for NullEcho {
    fn write_line(&self, _level: LogLevel, _line: &str) {}

    fn name(&self) -> &str {
        "null"
    }
}

fn bench_shipper(bulk: bool) -> LogShipper {
    LogShipper::builder("bench")
        .bulk(bulk)
        .buffer_capacity(500)
        .flush_interval(Duration::from_millis(100))
        .transport(NullTransport)
        .echo(NullEcho)
        .on_fatal(Arc::new(|| {}))
        .build()
        .unwrap()
}

// ============================================================================
// Record Formatting Benchmarks
// ============================================================================

fn bench_record_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_formatting");
    group.throughput(Throughput::Elements(1));

    let data = json!({"user_id": 12345, "path": "/api/v1/orders", "ok": true});

    group.bench_function("format_plain", |b| {
        b.iter(|| {
            LogRecord::format::<serde_json::Value>(black_box("request handled"), LogLevel::Info, None)
        });
    });

    group.bench_function("format_with_metadata", |b| {
        b.iter(|| LogRecord::format(black_box("request handled"), LogLevel::Info, Some(&data)));
    });

    let record = LogRecord::new(LogLevel::Warn, "line one\nline two", Some(data.clone()));
    group.bench_function("echo_line", |b| {
        b.iter(|| black_box(&record).echo_line());
    });

    group.finish();
}

// ============================================================================
// Payload Encoding Benchmarks
// ============================================================================

fn bench_payload_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("payload_encoding");

    for size in [1usize, 100, 1000] {
        let records: Vec<LogRecord> = (0..size)
            .map(|i| LogRecord::new(LogLevel::Info, format!("event {}", i), Some(json!({"i": i}))))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("encode_batch", size), &records, |b, records| {
            b.iter(|| payload::encode_batch(black_box(records)));
        });
    }

    group.finish();
}

// ============================================================================
// Buffer Benchmarks
// ============================================================================

fn bench_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer");
    group.throughput(Throughput::Elements(1));

    let buffer = RecordBuffer::with_capacity(1024);
    let record = LogRecord::new(LogLevel::Info, "buffered", None);

    group.bench_function("append_and_drain", |b| {
        b.iter(|| {
            if buffer.append(record.clone()) >= 1000 {
                black_box(buffer.drain_snapshot());
            }
        });
    });

    group.finish();
}

// ============================================================================
// Logging Call Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let immediate = bench_shipper(false);
    group.bench_function("immediate_info", |b| {
        b.iter(|| immediate.info(black_box("Info message")));
    });

    let bulk = bench_shipper(true);
    group.bench_function("bulk_info", |b| {
        b.iter(|| bulk.info(black_box("Info message")));
    });

    group.bench_function("filtered_debug", |b| {
        b.iter(|| bulk.debug(black_box("Debug message")));
    });

    group.finish();
    immediate.shutdown(Duration::from_secs(5));
    bulk.shutdown(Duration::from_secs(5));
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for threads in [2usize, 4] {
        group.throughput(Throughput::Elements((threads * 100) as u64));
        group.bench_with_input(BenchmarkId::new("bulk", threads), &threads, |b, &threads| {
            let shipper = Arc::new(bench_shipper(true));
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|_| {
                        let shipper = Arc::clone(&shipper);
                        thread::spawn(move || {
                            for _ in 0..100 {
                                shipper.info("concurrent message");
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
            shipper.shutdown(Duration::from_secs(5));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_record_formatting,
    bench_payload_encoding,
    bench_buffer,
    bench_logging,
    bench_concurrent_logging,
);
criterion_main!(benches);
