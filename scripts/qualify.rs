#!/usr/bin/env rust-script
//! Builds, lints and tests sinklog in each feature combination, then removes test output.
//!
//! ```cargo
//! [dependencies]
//! yansi = "0.5"
//! ```
extern crate yansi;
use std::process::Command;

// benches need nightly and are only compiled, below
const FEATURE_FLAGS: [&str; 3] = ["--no-default-features", "", "--all-features"];

fn run(cmd: &str) {
    println!("\n> {}", yansi::Paint::yellow(cmd));
    let mut words = cmd.split_whitespace();
    let status = Command::new(words.next().unwrap())
        .args(words)
        .status()
        .unwrap();
    if !status.success() {
        println!("> {}", yansi::Paint::red("qualification failed"));
        std::process::exit(-1);
    }
}

fn main() {
    run("cargo fmt -- --check");

    for flags in FEATURE_FLAGS {
        run(&format!("cargo clippy --tests {flags} -- -D warnings"));
        run(&format!("cargo test {flags}"));
    }
    run("cargo +1.85.0 build --all-features");
    run("cargo +nightly bench --no-run");
    run("cargo doc --all-features --no-deps");

    run("cargo script ./scripts/cleanup.rs");
    println!("\n> {}", yansi::Paint::green("sinklog is qualified"));
}
