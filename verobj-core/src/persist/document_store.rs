//! 文档存储协议
//!
//! 外部层级键值文档存储需要提供的最小原语：按键读取、按键写入、按 kind 分配唯一 ID。
//! 版本化层只依赖该协议，不关心具体存储引擎。
//!
use crate::key::Key;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// 存储层错误，由版本化层原样透传
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document not found: {key}")]
    NotFound { key: String },

    #[error("id allocation failed: kind={kind}, reason={reason}")]
    Allocation { kind: String, reason: String },

    #[error("transaction error: {reason}")]
    Transaction { reason: String },

    #[error("store backend error: {reason}")]
    Backend { reason: String },
}

impl StoreError {
    pub fn not_found(key: &Key) -> Self {
        Self::NotFound {
            key: key.to_string(),
        }
    }

    pub fn backend(reason: impl Into<String>) -> Self {
        Self::Backend {
            reason: reason.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// 读取键对应的文档；不存在时返回 `StoreError::NotFound`
    async fn get(&self, key: &Key) -> StoreResult<Value>;

    /// 写入（覆盖）键对应的文档
    async fn put(&self, key: &Key, doc: Value) -> StoreResult<()>;

    /// 分配在 kind 命名空间内唯一的 ID，其文本形式由存储决定
    async fn allocate_id(&self, kind: &str) -> StoreResult<String>;
}

#[async_trait]
impl<T> DocumentStore for Arc<T>
where
    T: DocumentStore + ?Sized,
{
    async fn get(&self, key: &Key) -> StoreResult<Value> {
        (**self).get(key).await
    }

    async fn put(&self, key: &Key, doc: Value) -> StoreResult<()> {
        (**self).put(key, doc).await
    }

    async fn allocate_id(&self, kind: &str) -> StoreResult<String> {
        (**self).allocate_id(kind).await
    }
}

#[async_trait]
impl<'s, T> DocumentStore for &'s T
where
    T: DocumentStore + ?Sized,
{
    async fn get(&self, key: &Key) -> StoreResult<Value> {
        (**self).get(key).await
    }

    async fn put(&self, key: &Key, doc: Value) -> StoreResult<()> {
        (**self).put(key, doc).await
    }

    async fn allocate_id(&self, kind: &str) -> StoreResult<String> {
        (**self).allocate_id(kind).await
    }
}
