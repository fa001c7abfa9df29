use crate::utils::{apply_derives, parse_bool};
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Item, Result, Token, parse::Parse, parse::ParseStream, parse_macro_input};

/// #[value_object] 宏实现
/// - 支持结构体（具名或 tuple）与枚举
/// - 合并/追加派生：Default, Clone, Serialize, Deserialize, PartialEq, Eq, Hash
/// - 参数：
///   - `debug = true|false`，默认 true
///   - `ord = true|false`，默认 false；为 true 时追加 PartialOrd, Ord
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as ValueObjectAttrConfig);
    let mut input = parse_macro_input!(item as Item);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Default),
        syn::parse_quote!(Clone),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
        syn::parse_quote!(PartialEq),
        syn::parse_quote!(Eq),
        syn::parse_quote!(Hash),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    if cfg.derive_ord.unwrap_or(false) {
        required.push(syn::parse_quote!(PartialOrd));
        required.push(syn::parse_quote!(Ord));
    }

    match &mut input {
        Item::Struct(st) => {
            apply_derives(&mut st.attrs, required);
            TokenStream::from(quote! { #st })
        }
        Item::Enum(en) => {
            apply_derives(&mut en.attrs, required);
            TokenStream::from(quote! { #en })
        }
        other => syn::Error::new(other.span(), "#[value_object] only supports struct or enum")
            .to_compile_error()
            .into(),
    }
}

// -------- parsing --------

#[derive(Default)]
struct ValueObjectAttrConfig {
    derive_debug: Option<bool>,
    derive_ord: Option<bool>,
}

impl Parse for ValueObjectAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut cfg = Self::default();

        if input.is_empty() {
            return Ok(cfg);
        }

        let pairs: Punctuated<syn::MetaNameValue, Token![,]> =
            Punctuated::parse_terminated(input)?;

        for kv in pairs {
            let slot = if kv.path.is_ident("debug") {
                &mut cfg.derive_debug
            } else if kv.path.is_ident("ord") {
                &mut cfg.derive_ord
            } else {
                return Err(syn::Error::new(
                    kv.path.span(),
                    "unknown key in attribute; expected 'debug' | 'ord'",
                ));
            };

            if slot.is_some() {
                return Err(syn::Error::new(
                    kv.path.span(),
                    "duplicate key in attribute",
                ));
            }

            let key = if kv.path.is_ident("debug") { "debug" } else { "ord" };
            *slot = Some(parse_bool(kv.value, key)?);
        }

        Ok(cfg)
    }
}
