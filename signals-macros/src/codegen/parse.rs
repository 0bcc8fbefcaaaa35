use super::msgs::{
    ERR_EMITTER_NO_ARGS, ERR_SIGNAL_EMPTY_NAME, ERR_SIGNAL_MULTI_ATTR, ERR_SIGNAL_NEED_NAME,
    ERR_SIGNAL_UNKNOWN_KEY,
};
use syn::parse::Parse;
use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta, Token, Variant};

// 低层解析辅助

pub struct VariantSpec {
    pub ident: syn::Ident,
    pub name: LitStr,
    pub params: Vec<LitStr>,
    pub summary: String,
}

pub fn parse_variant(v: &Variant) -> syn::Result<VariantSpec> {
    let mut name: Option<LitStr> = None;
    let mut params: Vec<LitStr> = Vec::new();
    let mut seen = false;
    for a in &v.attrs {
        if !a.path().is_ident("signal") {
            continue;
        }
        if seen {
            return Err(syn::Error::new_spanned(a, ERR_SIGNAL_MULTI_ATTR));
        }
        seen = true;
        a.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new_spanned(&lit, ERR_SIGNAL_EMPTY_NAME));
                }
                name = Some(lit);
                Ok(())
            } else if meta.path.is_ident("params") {
                let content;
                syn::parenthesized!(content in meta.input);
                let list = content.parse_terminated(<LitStr as Parse>::parse, Token![,])?;
                params.extend(list);
                Ok(())
            } else {
                Err(meta.error(ERR_SIGNAL_UNKNOWN_KEY))
            }
        })?;
    }
    let Some(name) = name else {
        return Err(syn::Error::new_spanned(&v.ident, ERR_SIGNAL_NEED_NAME));
    };
    Ok(VariantSpec {
        ident: v.ident.clone(),
        name,
        params,
        summary: doc_summary(&v.attrs),
    })
}

// 取文档注释的第一段作为摘要
pub fn doc_summary(attrs: &[Attribute]) -> String {
    let mut lines: Vec<String> = Vec::new();
    for a in attrs {
        if !a.path().is_ident("doc") {
            continue;
        }
        if let Meta::NameValue(nv) = &a.meta {
            if let Expr::Lit(ExprLit { lit: Lit::Str(s), .. }) = &nv.value {
                let line = s.value().trim().to_string();
                if line.is_empty() {
                    if lines.is_empty() {
                        continue;
                    }
                    break;
                }
                lines.push(line);
            }
        }
    }
    lines.join(" ")
}

/// `Some(Ok(()))` for a well-formed `#[signals]`, `None` for other attributes.
pub fn parse_signals_marker(a: &Attribute) -> Option<syn::Result<()>> {
    if !a.path().is_ident("signals") {
        return None;
    }
    match a.meta.require_path_only() {
        Ok(_) => Some(Ok(())),
        Err(_) => Some(Err(syn::Error::new_spanned(a, ERR_EMITTER_NO_ARGS))),
    }
}
