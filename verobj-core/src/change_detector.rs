//! 变更检测（Change Detector）
//!
//! 对记录的规范化序列化结果计算 SHA-256，与上次保存时的版本比较，
//! 以决定是否需要写入。
//!
//! 规范化表示：
//! - 在记录的独立副本上清空 `version` 与 `modified_at`，它们不参与自身的哈希；
//! - 先转换为 `serde_json::Value`，逐层把对象键按字典序重排，再编码为紧凑 JSON 字节；
//!   重排不依赖 `serde_json::Map` 的底层实现（开启 `preserve_order` 时它保留插入顺序）；
//! - 其余全部可序列化字段（entity、group、created_at 与业务字段）均参与哈希。
//!
//! 检测过程只读，不会修改调用方的记录。
//!
use crate::error::ObjectResult;
use crate::record::Versioned;
use crate::value_object::ContentVersion;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

/// 检测结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// 内容与上次保存一致
    Unchanged,
    /// 内容已变化，携带新的内容版本
    Changed(ContentVersion),
}

impl Change {
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed(_))
    }
}

/// 记录的规范化字节表示（不含 version / modified_at）
pub fn canonical_bytes<R: Versioned>(record: &R) -> ObjectResult<Vec<u8>> {
    let mut snapshot = record.clone();
    snapshot.meta_mut().clear_volatile();

    let value = sort_keys(serde_json::to_value(&snapshot)?);
    Ok(serde_json::to_vec(&value)?)
}

// 递归按键排序；HashMap 等无序容器的迭代顺序因此不影响摘要
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, sort_keys(v)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// 计算记录当前内容的版本
pub fn content_version<R: Versioned>(record: &R) -> ObjectResult<ContentVersion> {
    debug!(kind = record.meta().kind(), id = record.meta().id(), "serializing object for hashing");
    let bytes = canonical_bytes(record)?;
    Ok(ContentVersion::from_digest(&Sha256::digest(&bytes)))
}

/// 与记录上已保存的版本比较
pub fn detect<R: Versioned>(record: &R) -> ObjectResult<Change> {
    let current = content_version(record)?;
    if &current == record.meta().version() {
        return Ok(Change::Unchanged);
    }
    Ok(Change::Changed(current))
}
