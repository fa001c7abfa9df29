//! 值对象（Value Object）
//!
//! 无标识、以值相等为准的对象，用于封装不可变的概念性值与校验逻辑。
//!
use std::fmt;

use crate::error::{ObjectError, ObjectResult};
use verobj_macros::value_object;

/// 值对象抽象
pub trait ValueObject {
    /// 业务校验失败时的错误类型
    type Error;

    /// 创建值对象时进行验证
    fn validate(&self) -> Result<(), Self::Error>;
}

/// SHA-256 十六进制摘要的长度
pub const CONTENT_VERSION_LEN: usize = 64;

/// 内容版本号
///
/// 记录内容在上一次成功保存时的 SHA-256 摘要（64 位小写十六进制）。
/// 首次保存前为空。与递增的整数版本不同，它只表达“内容是否相同”，没有先后顺序。
///
/// # 示例
///
/// ```
/// use verobj_core::value_object::ContentVersion;
///
/// let v = ContentVersion::default();
/// assert!(v.is_empty());
///
/// let hex = "a".repeat(64);
/// let v = ContentVersion::parse(&hex).unwrap();
/// assert_eq!(v.as_str(), hex);
///
/// assert!(ContentVersion::parse("not-a-digest").is_err());
/// ```
#[value_object]
#[serde(try_from = "String", into = "String")]
pub struct ContentVersion(String);

impl ContentVersion {
    /// 由摘要字节构造（内部使用，字节长度由哈希算法保证）
    pub(crate) fn from_digest(digest: &[u8]) -> Self {
        Self(hex::encode(digest))
    }

    /// 从文本解析并校验
    pub fn parse(value: &str) -> ObjectResult<Self> {
        Self::try_from(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 是否尚未计算过版本（从未保存）
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ValueObject for ContentVersion {
    type Error = ObjectError;

    fn validate(&self) -> Result<(), Self::Error> {
        if self.0.is_empty() {
            return Ok(());
        }
        if self.0.len() != CONTENT_VERSION_LEN {
            return Err(ObjectError::invalid_value(format!(
                "content version must be {CONTENT_VERSION_LEN} hex chars, got {}",
                self.0.len()
            )));
        }
        if !self
            .0
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(ObjectError::invalid_value(
                "content version must be lowercase hex",
            ));
        }
        Ok(())
    }
}

// 反序列化同样经过校验
impl TryFrom<String> for ContentVersion {
    type Error = ObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let v = Self(value);
        v.validate()?;
        Ok(v)
    }
}

impl From<ContentVersion> for String {
    fn from(v: ContentVersion) -> Self {
        v.0
    }
}

impl fmt::Display for ContentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContentVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
