#!/usr/bin/env rust-script
//! Cleans up all files and folders that were produced by test runs and doc examples.
//!
//! ```cargo
//! [dependencies]
//! glob = "*"
//! ```
extern crate glob;

fn main() {
    for pattern in &["./*.log", "./log_files/**/*.log", "./log_files/**/*.err"] {
        for globresult in glob::glob(pattern).unwrap() {
            match globresult {
                Err(e) => eprintln!("Evaluating pattern {:?} produced error {}", pattern, e),
                Ok(pathbuf) => {
                    std::fs::remove_file(&pathbuf).unwrap();
                }
            }
        }
    }

    let dirs: Vec<std::path::PathBuf> = glob::glob("./log_files/**")
        .unwrap()
        .filter_map(|r| match r {
            Err(e) => {
                eprintln!("Searching for folders produced error {}", e);
                None
            }
            Ok(pathbuf) => Some(pathbuf),
        })
        .collect();
    for pathbuf in dirs.iter().rev() {
        std::fs::remove_dir(pathbuf).unwrap_or_else(|_| panic!("folder not empty? {:?}", pathbuf));
    }

    std::fs::remove_dir("./log_files/").ok();
}
