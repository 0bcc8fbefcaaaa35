use proc_macro::TokenStream;

mod codegen;

/// Typed signal-name enum.
///
/// Every variant needs `#[signal(name = "...")]` and may list its positional
/// arguments with `params("name: description", ...)`. The variant's doc
/// comment becomes the signal summary in `mmg_signals::catalog`. The enum
/// must be `Copy` to satisfy `SignalSet`.
///
/// ```ignore
/// #[derive(Clone, Copy, mmg_signals::Signals)]
/// enum PlayerSignal {
///     /// Track changed.
///     #[signal(name = "track-changed", params("title: new track title"))]
///     TrackChanged,
/// }
/// ```
#[proc_macro_derive(Signals, attributes(signal))]
pub fn derive_signals(input: TokenStream) -> TokenStream {
    codegen::derive_signals(input)
}

/// Implements `SignalEmitter` by delegating to the one field marked `#[signals]`.
#[proc_macro_derive(SignalEmitter, attributes(signals))]
pub fn derive_signal_emitter(input: TokenStream) -> TokenStream {
    codegen::derive_signal_emitter(input)
}
