#![allow(dead_code)]
use mmg_signals::prelude::*;

#[derive(Clone, Copy, Signals)]
enum S {
    #[signal(params("x: value"))]
    Orphan,
}

fn main() {}
