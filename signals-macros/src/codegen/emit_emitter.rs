use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Member};

use super::combine_errors;
use super::msgs::{ERR_EMITTER_MULTI_FIELD, ERR_EMITTER_NEED_FIELD, ERR_EMITTER_TARGET};
use super::parse::parse_signals_marker;

pub fn expand(input: &DeriveInput) -> TokenStream {
    let ident = &input.ident;
    let Data::Struct(data) = &input.data else {
        return syn::Error::new_spanned(ident, ERR_EMITTER_TARGET).to_compile_error();
    };

    let mut member: Option<Member> = None;
    let mut errors: Vec<syn::Error> = Vec::new();
    let fields: Vec<&syn::Field> = match &data.fields {
        Fields::Named(f) => f.named.iter().collect(),
        Fields::Unnamed(f) => f.unnamed.iter().collect(),
        Fields::Unit => Vec::new(),
    };
    for (i, field) in fields.into_iter().enumerate() {
        let mut marked = false;
        for a in &field.attrs {
            match parse_signals_marker(a) {
                Some(Ok(())) => marked = true,
                Some(Err(e)) => errors.push(e),
                None => {}
            }
        }
        if !marked {
            continue;
        }
        if member.is_some() {
            errors.push(syn::Error::new_spanned(field, ERR_EMITTER_MULTI_FIELD));
            continue;
        }
        member = Some(match &field.ident {
            Some(id) => Member::Named(id.clone()),
            None => Member::Unnamed(syn::Index::from(i)),
        });
    }
    if let Some(err) = combine_errors(errors) {
        return err.to_compile_error();
    }
    let Some(member) = member else {
        return syn::Error::new_spanned(ident, ERR_EMITTER_NEED_FIELD).to_compile_error();
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    quote! {
        impl #impl_generics ::mmg_signals::emitter::SignalEmitter for #ident #ty_generics #where_clause {
            fn signals(&self) -> &::mmg_signals::registry::Registry {
                &self.#member
            }
        }
    }
}
