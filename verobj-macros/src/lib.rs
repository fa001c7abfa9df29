//! verobj 过程宏
//!
//! - `#[versioned]`：让业务结构体以组合方式接入版本化持久化；
//! - `#[value_object]`：为小型值类型补齐常用派生。
//!
use proc_macro::TokenStream;

mod utils;
mod value_object;
mod versioned;

/// 版本化记录宏
/// - 若缺失则追加字段 `meta: RecordMeta`，并置于字段最前
/// - 自动实现 `::verobj_core::record::Versioned`（meta/meta_mut/from_meta）
/// - 参数：`#[versioned(debug = true|false)]`，默认派生 Debug
#[proc_macro_attribute]
pub fn versioned(attr: TokenStream, item: TokenStream) -> TokenStream {
    versioned::expand(attr, item)
}

/// 值对象宏
/// - 合并/追加派生：Default, Clone, Serialize, Deserialize, PartialEq, Eq, Hash
/// - 参数：`#[value_object(debug = true|false, ord = true|false)]`
#[proc_macro_attribute]
pub fn value_object(attr: TokenStream, item: TokenStream) -> TokenStream {
    value_object::expand(attr, item)
}
