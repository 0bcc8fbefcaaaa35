use mmg_signals::prelude::*;

#[derive(Clone, Copy, Signals)]
enum Hook {
    /// Ready.
    #[signal(name = "ready")]
    Ready,
}

#[derive(SignalEmitter)]
struct Widget(#[signals] Registry);

fn main() {
    let w = Widget(Registry::new());
    w.add_signal(Hook::Ready).unwrap();
    w.emit(Hook::Ready, &[]).unwrap();
}
