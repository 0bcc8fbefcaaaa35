#![allow(dead_code)]
use mmg_signals::prelude::*;

#[derive(SignalEmitter)]
struct Plain {
    registry: Registry,
}

fn main() {}
