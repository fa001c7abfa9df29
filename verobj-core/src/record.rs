//! 版本化记录（Versioned Record）
//!
//! 业务结构体通过组合 `RecordMeta` 并实现 `Versioned` 接入版本化持久化：
//! - `RecordMeta` 承载标识（entity）、父分组（group）、内容版本与时间戳；
//! - `Versioned` 暴露元数据的读写入口，供 get/save 编排使用；
//! - 通常使用 `#[versioned]` 宏自动注入 `meta` 字段并实现该 trait。
//!
use crate::entity::Entity;
use crate::key::Key;
use crate::value_object::ContentVersion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// 记录元数据
///
/// `version`、`created_at`、`modified_at` 只由保存流程写入，调用方只读。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    entity: Entity,
    #[serde(default)]
    group: Entity,
    #[serde(default)]
    version: ContentVersion,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    modified_at: Option<DateTime<Utc>>,
}

impl RecordMeta {
    /// 以 (kind, id) 构造；id 可为空，表示首次保存时再分配
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            entity: Entity::new(kind, id),
            ..Default::default()
        }
    }

    /// 指定父分组
    pub fn with_group(mut self, group: Entity) -> Self {
        self.group = group;
        self
    }

    pub fn set_group(&mut self, group: Entity) {
        self.group = group;
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    pub fn kind(&self) -> &str {
        &self.entity.kind
    }

    pub fn id(&self) -> &str {
        &self.entity.id
    }

    pub fn group(&self) -> &Entity {
        &self.group
    }

    pub fn version(&self) -> &ContentVersion {
        &self.version
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn modified_at(&self) -> Option<DateTime<Utc>> {
        self.modified_at
    }

    /// 派生层级键：父键为分组的键，零分组时无父键
    pub fn key(&self) -> Key {
        Key::builder()
            .kind(&self.entity.kind)
            .id(&self.entity.id)
            .maybe_parent(self.group.key().map(Box::new))
            .build()
    }

    pub(crate) fn assign_id(&mut self, id: String) {
        debug_assert!(self.entity.id.is_empty(), "id is assigned at most once");
        self.entity.id = id;
    }

    pub(crate) fn mark_created(&mut self, at: DateTime<Utc>) {
        if self.created_at.is_none() {
            self.created_at = Some(at);
        }
    }

    /// 写入新版本并推进修改时间；保证 modified_at 严格递增且不早于 created_at
    pub(crate) fn stamp(&mut self, version: ContentVersion, now: DateTime<Utc>) {
        let mut at = self.created_at.map_or(now, |created| now.max(created));
        if let Some(prev) = self.modified_at
            && at <= prev
        {
            at = prev + chrono::Duration::microseconds(1);
        }
        self.version = version;
        self.modified_at = Some(at);
    }

    /// 清空不参与哈希的易变字段
    pub(crate) fn clear_volatile(&mut self) {
        self.version = ContentVersion::default();
        self.modified_at = None;
    }
}

/// 具备版本化元数据的记录
pub trait Versioned: Clone + Serialize + DeserializeOwned + Send + Sync {
    fn meta(&self) -> &RecordMeta;

    fn meta_mut(&mut self) -> &mut RecordMeta;

    /// 以元数据构造记录，其余字段取默认值
    fn from_meta(meta: RecordMeta) -> Self;

    fn key(&self) -> Key {
        self.meta().key()
    }
}
