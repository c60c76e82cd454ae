#![allow(dead_code)]

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub fn read_lines(path: &Path) -> Vec<String> {
    let f = File::open(path)
        .unwrap_or_else(|e| panic!("cannot open file {} due to {e}", path.display()));
    BufReader::new(f)
        .lines()
        .map(|line| line.unwrap())
        .collect()
}

pub fn file_contains(path: &Path, needle: &str) -> bool {
    read_lines(path).iter().any(|line| line.contains(needle))
}

pub fn count_lines(path: &Path) -> usize {
    read_lines(path).len()
}
