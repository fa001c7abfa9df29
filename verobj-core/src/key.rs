//! 层级键（Key）
//!
//! 外部文档存储的寻址方式：`(kind, id, 可选父键)`。
//! 键由记录元数据派生，不单独存储。
//!
use bon::Builder;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Builder)]
pub struct Key {
    #[builder(into)]
    kind: String,
    #[builder(into)]
    id: String,
    parent: Option<Box<Key>>,
}

impl Key {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn parent(&self) -> Option<&Key> {
        self.parent.as_deref()
    }

    /// 自身及全部祖先的 kind 与 id 均非空时才能用于读写
    pub fn is_complete(&self) -> bool {
        !self.kind.is_empty()
            && !self.id.is_empty()
            && self.parent().is_none_or(Key::is_complete)
    }
}

/// 以路径形式展示，祖先在前：`/testGroup,tg/testObject,1`
impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = self.parent() {
            write!(f, "{parent}")?;
        }
        write!(f, "/{},{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_without_parent() {
        let key = Key::builder().kind("testObject").id("1").build();
        assert_eq!(key.kind(), "testObject");
        assert_eq!(key.id(), "1");
        assert!(key.parent().is_none());
        assert!(key.is_complete());
        assert_eq!(key.to_string(), "/testObject,1");
    }

    #[test]
    fn nested_display_lists_ancestors_first() {
        let group = Key::builder().kind("testGroup").id("tg").build();
        let key = Key::builder()
            .kind("testObject")
            .id("2a")
            .parent(Box::new(group.clone()))
            .build();

        assert_eq!(key.parent(), Some(&group));
        assert_eq!(key.to_string(), "/testGroup,tg/testObject,2a");
    }

    #[test]
    fn incomplete_keys() {
        assert!(!Key::builder().kind("testObject").id("").build().is_complete());
        assert!(!Key::builder().kind("").id("1").build().is_complete());
    }

    // 父键不完整时整个键不完整
    #[test]
    fn incomplete_parent_makes_key_incomplete() {
        let half_group = Key::builder().kind("testGroup").id("").build();
        let key = Key::builder()
            .kind("testObject")
            .id("1")
            .parent(Box::new(half_group))
            .build();
        assert!(!key.is_complete());

        let grandparent = Key::builder().kind("").id("root").build();
        let parent = Key::builder()
            .kind("testGroup")
            .id("tg")
            .parent(Box::new(grandparent))
            .build();
        let key = Key::builder()
            .kind("testObject")
            .id("1")
            .parent(Box::new(parent))
            .build();
        assert!(!key.is_complete());
    }
}
