use quote::ToTokens;
use syn::{Attribute, Field, FieldsNamed, Token, Type, punctuated::Punctuated};

// 拆分 derive 与其他属性，返回（保留的属性, 已有 derive 路径）
fn split_derives(attrs: &[Attribute]) -> (Vec<Attribute>, Vec<syn::Path>) {
    let mut retained = Vec::new();
    let mut existing = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident("derive") {
            retained.push(attr.clone());
            continue;
        }
        if let Ok(list) = attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)
        {
            existing.extend(list);
        }
    }
    (retained, existing)
}

// 归一化 derive 的 key，避免 Serialize 与 serde::Serialize 重复
fn derive_key(p: &syn::Path) -> String {
    match p.segments.last() {
        Some(last) => {
            let ident = last.ident.to_string();
            match ident.as_str() {
                "Serialize" | "Deserialize" => format!("serde::{ident}"),
                _ => ident,
            }
        }
        None => p.to_token_stream().to_string(),
    }
}

/// 把 required 派生合并进已有 derive（去重，required 在前），其余属性保持原顺序
pub(crate) fn apply_derives(attrs: &mut Vec<Attribute>, required: Vec<syn::Path>) {
    let (retained, existing) = split_derives(attrs);

    let mut seen = std::collections::HashSet::new();
    let merged: Vec<syn::Path> = required
        .into_iter()
        .chain(existing)
        .filter(|p| seen.insert(derive_key(p)))
        .collect();

    let derive: Attribute = syn::parse_quote!(#[derive(#(#merged),*)]);
    *attrs = std::iter::once(derive).chain(retained).collect();
}

/// 确保具名字段结构体以 `name: ty` 开头：
/// 已存在则复用用户的定义（保留其属性与可见性）并移到最前，否则新建。
pub(crate) fn ensure_leading_field(fields_named: &mut FieldsNamed, name: &str, ty: &Type) {
    let is_target = |f: &Field| f.ident.as_ref().map(|i| i == name).unwrap_or(false);

    let leading: Field = match fields_named.named.iter().find(|f| is_target(f)) {
        Some(existing) => existing.clone(),
        None => {
            let ident = syn::Ident::new(name, proc_macro2::Span::call_site());
            syn::parse_quote! { #ident: #ty }
        }
    };

    let mut new_named: Punctuated<Field, Token![,]> = Punctuated::new();
    new_named.push(leading);
    for f in fields_named.named.iter().filter(|f| !is_target(f)) {
        new_named.push(f.clone());
    }

    fields_named.named = new_named;
}

/// 解析 `key = true|false` 形式的布尔参数值
pub(crate) fn parse_bool(expr: syn::Expr, key: &str) -> syn::Result<bool> {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: syn::Lit::Bool(b),
            ..
        }) => Ok(b.value()),
        other => Err(syn::Error::new_spanned(
            other,
            format!("expected boolean literal for '{key}'"),
        )),
    }
}
