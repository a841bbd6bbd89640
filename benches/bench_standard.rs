#![feature(test)]

extern crate sinklog;
extern crate test;

use sinklog::{values, LogLevel, Registry, Sink};
use std::sync::{Arc, OnceLock};
use test::Bencher;

fn file_sink() -> &'static Arc<Sink> {
    static SINK: OnceLock<Arc<Sink>> = OnceLock::new();
    SINK.get_or_init(|| {
        let sink = Registry::new().create_file("bench", "bench_standard.log", "log_files", true);
        sink.set_threshold(LogLevel::Info);
        sink
    })
}

#[bench]
fn b10_initialize_sink(_: &mut Bencher) {
    file_sink();
}

#[bench]
fn b20_relevant_logs(b: &mut Bencher) {
    let sink = file_sink();
    b.iter(|| use_error(sink));
}

#[bench]
fn b30_relevant_logs_with_values(b: &mut Bencher) {
    let sink = file_sink();
    b.iter(|| use_error_with(sink));
}

#[bench]
fn b40_suppressed_logs(b: &mut Bencher) {
    let sink = file_sink();
    b.iter(|| use_trace(sink));
}

fn use_error(sink: &Sink) {
    for _ in 1..100 {
        sink.error("This is an error message");
    }
}
fn use_error_with(sink: &Sink) {
    for i in 1..100 {
        sink.error_with("This is error message {} of {}", &values![i, 100]);
    }
}
fn use_trace(sink: &Sink) {
    for _ in 1..100 {
        sink.trace("This is a trace message");
    }
}
