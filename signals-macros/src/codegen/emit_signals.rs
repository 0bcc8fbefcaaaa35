use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields};

use super::msgs::{
    ERR_SIGNALS_EMPTY, ERR_SIGNALS_FIELDS, ERR_SIGNALS_GENERICS, ERR_SIGNALS_TARGET,
    ERR_SIGNAL_DUP_NAME,
};
use super::parse::{parse_variant, VariantSpec};
use super::combine_errors;

pub fn expand(input: &DeriveInput) -> TokenStream {
    let ident = &input.ident;
    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(ident, ERR_SIGNALS_TARGET).to_compile_error();
    };
    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(&input.generics, ERR_SIGNALS_GENERICS).to_compile_error();
    }
    if data.variants.is_empty() {
        return syn::Error::new_spanned(ident, ERR_SIGNALS_EMPTY).to_compile_error();
    }

    let mut specs: Vec<VariantSpec> = Vec::new();
    let mut errors: Vec<syn::Error> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for v in &data.variants {
        if !matches!(v.fields, Fields::Unit) {
            errors.push(syn::Error::new_spanned(v, ERR_SIGNALS_FIELDS));
            continue;
        }
        match parse_variant(v) {
            Ok(spec) => {
                if !seen.insert(spec.name.value()) {
                    errors.push(syn::Error::new_spanned(&spec.name, ERR_SIGNAL_DUP_NAME));
                    continue;
                }
                specs.push(spec);
            }
            Err(e) => errors.push(e),
        }
    }
    if let Some(err) = combine_errors(errors) {
        return err.to_compile_error();
    }

    // 逐变体预生成片段（quote 重复中不能混用非迭代变量）
    let all_items: Vec<TokenStream> = specs
        .iter()
        .map(|s| {
            let v = &s.ident;
            quote! { #ident::#v }
        })
        .collect();
    let name_arms: Vec<TokenStream> = specs
        .iter()
        .map(|s| {
            let v = &s.ident;
            let n = &s.name;
            quote! { #ident::#v => #n }
        })
        .collect();
    let parse_arms: Vec<TokenStream> = specs
        .iter()
        .map(|s| {
            let v = &s.ident;
            let n = &s.name;
            quote! { #n => ::core::result::Result::Ok(#ident::#v) }
        })
        .collect();
    let docs: Vec<TokenStream> = specs
        .iter()
        .map(|s| {
            let n = &s.name;
            let summary = &s.summary;
            let params = &s.params;
            quote! {
                ::mmg_signals::__private::inventory::submit! {
                    ::mmg_signals::catalog::SignalDoc {
                        name: #n,
                        summary: #summary,
                        params: &[#(#params),*],
                        owner: __owner,
                    }
                }
            }
        })
        .collect();

    quote! {
        impl #ident {
            pub const ALL: &'static [#ident] = &[#(#all_items),*];

            pub const fn name(&self) -> &'static str {
                match self {
                    #(#name_arms,)*
                }
            }
        }

        impl ::mmg_signals::catalog::SignalSet for #ident {
            const ALL: &'static [Self] = #ident::ALL;
            fn name(self) -> &'static str {
                #ident::name(&self)
            }
        }

        impl ::core::convert::AsRef<str> for #ident {
            fn as_ref(&self) -> &str {
                #ident::name(self)
            }
        }

        impl ::core::fmt::Display for #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(#ident::name(self))
            }
        }

        impl ::core::str::FromStr for #ident {
            type Err = ::mmg_signals::catalog::ParseSignalError;
            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                match s {
                    #(#parse_arms,)*
                    other => ::core::result::Result::Err(::mmg_signals::catalog::ParseSignalError {
                        name: ::std::string::ToString::to_string(other),
                    }),
                }
            }
        }

        const _: () = {
            fn __owner() -> &'static str {
                ::core::any::type_name::<#ident>()
            }
            #(#docs)*
        };
    }
}
