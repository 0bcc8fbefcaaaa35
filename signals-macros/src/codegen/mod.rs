mod emit_emitter;
mod emit_signals;
mod msgs;
mod parse;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

pub fn derive_signals(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    emit_signals::expand(&input).into()
}

pub fn derive_signal_emitter(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    emit_emitter::expand(&input).into()
}

// 合并多条诊断，一次性报告
fn combine_errors(errors: Vec<syn::Error>) -> Option<syn::Error> {
    let mut it = errors.into_iter();
    let mut first = it.next()?;
    for e in it {
        first.combine(e);
    }
    Some(first)
}
