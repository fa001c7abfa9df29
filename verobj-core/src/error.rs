//! 统一错误定义
//!
//! 版本化持久化层只区分三类失败：序列化、寻址（key 不完整）与存储后端错误。
//! “内容未变化”不是错误，由 `SaveOutcome::Unchanged` 表达。
//!
use crate::persist::StoreError;
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ObjectError {
    // --- 序列化 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },

    // --- 寻址 ---
    #[error("invalid key: {reason}")]
    InvalidKey { reason: String },

    // --- 值对象校验 ---
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },

    // --- 存储后端（原样透传）---
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ObjectError {
    pub fn invalid_key(reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            reason: reason.into(),
        }
    }

    pub fn invalid_value(reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }

    /// 是否为存储层的“未找到”
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Store(StoreError::NotFound { .. }))
    }
}

/// 统一 Result 类型别名
pub type ObjectResult<T> = Result<T, ObjectError>;
