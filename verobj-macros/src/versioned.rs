use crate::utils::{apply_derives, ensure_leading_field, parse_bool};
use proc_macro::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{
    Item, Result, Token, Type, parse::Parse, parse::ParseStream, parse_macro_input,
};

/// #[versioned] 宏实现
/// - 若缺失则追加字段 `meta: ::verobj_core::record::RecordMeta`，并置于字段最前；
///   已声明的 `meta` 字段会被复用（保留用户书写的属性）
/// - 合并派生：Debug（可关闭）、Clone、Default、Serialize、Deserialize
/// - 实现 `::verobj_core::record::Versioned`
pub(crate) fn expand(attr: TokenStream, item: TokenStream) -> TokenStream {
    let cfg = parse_macro_input!(attr as VersionedAttrConfig);
    let input = parse_macro_input!(item as Item);

    let mut st = match input {
        Item::Struct(s) => s,
        other => {
            return syn::Error::new(other.span(), "#[versioned] only on struct")
                .to_compile_error()
                .into();
        }
    };

    // 仅支持具名字段结构体：元数据需要一个稳定的字段名参与序列化
    let fields_named = match &mut st.fields {
        syn::Fields::Named(f) => f,
        _ => {
            return syn::Error::new(st.span(), "#[versioned] only supports named-field struct")
                .to_compile_error()
                .into();
        }
    };

    let meta_ty: Type = syn::parse_quote! { ::verobj_core::record::RecordMeta };
    ensure_leading_field(fields_named, "meta", &meta_ty);

    let mut required: Vec<syn::Path> = vec![
        syn::parse_quote!(Clone),
        syn::parse_quote!(Default),
        syn::parse_quote!(serde::Serialize),
        syn::parse_quote!(serde::Deserialize),
    ];
    if cfg.derive_debug.unwrap_or(true) {
        required.insert(0, syn::parse_quote!(Debug));
    }
    apply_derives(&mut st.attrs, required);

    let ident = &st.ident;
    let generics = st.generics.clone();
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        #st

        impl #impl_generics ::verobj_core::record::Versioned for #ident #ty_generics #where_clause {
            fn meta(&self) -> &::verobj_core::record::RecordMeta { &self.meta }

            fn meta_mut(&mut self) -> &mut ::verobj_core::record::RecordMeta { &mut self.meta }

            fn from_meta(meta: ::verobj_core::record::RecordMeta) -> Self {
                Self { meta, ..::core::default::Default::default() }
            }
        }
    };

    TokenStream::from(expanded)
}

// -------- parsing --------

struct VersionedAttrConfig {
    derive_debug: Option<bool>,
}

impl Parse for VersionedAttrConfig {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut derive_debug: Option<bool> = None;

        if input.is_empty() {
            return Ok(Self { derive_debug });
        }

        let pairs: Punctuated<syn::MetaNameValue, Token![,]> =
            Punctuated::parse_terminated(input)?;

        for kv in pairs {
            if !kv.path.is_ident("debug") {
                return Err(syn::Error::new(
                    kv.path.span(),
                    "unknown key in attribute; expected 'debug'",
                ));
            }
            if derive_debug.is_some() {
                return Err(syn::Error::new(
                    kv.path.span(),
                    "duplicate key 'debug' in attribute",
                ));
            }
            derive_debug = Some(parse_bool(kv.value, "debug")?);
        }

        Ok(Self { derive_debug })
    }
}
