//! Compile-fail UI tests for #[derive(Signals)] / #[derive(SignalEmitter)]

#[test]
fn ui_signal_without_name_fails() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/signal_without_name.rs");
}

#[test]
fn ui_emitter_without_field_fails() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/ui/emitter_without_field.rs");
}

#[test]
fn ui_derive_happy_min_ok() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/happy_min.rs");
}
