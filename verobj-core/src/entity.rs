//! 实体标识（Entity）
//!
//! `(kind, id)` 二元组标识一条记录；kind 与 id 同时为空的“零实体”
//! 没有键，用于表达“无父分组”。
//!
use crate::key::Key;
use verobj_macros::value_object;

#[value_object(ord = true)]
pub struct Entity {
    /// 记录类型名
    pub kind: String,
    /// kind 命名空间内唯一；首次保存前为空
    pub id: String,
}

impl Entity {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// 零实体：kind 与 id 均为空
    pub fn is_zero(&self) -> bool {
        self.kind.is_empty() && self.id.is_empty()
    }

    /// 派生无父键；零实体没有键
    pub fn key(&self) -> Option<Key> {
        if self.is_zero() {
            return None;
        }
        Some(Key::builder().kind(&self.kind).id(&self.id).build())
    }
}
