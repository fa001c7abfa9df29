//! 版本化记录的读写编排（Get / Save）
//!
//! Save 的标准流程：
//! 1. 在记录的暂存副本上补齐缺失的 ID（向存储申请）与创建时间；
//! 2. 通过变更检测比较内容版本，未变化则不写入并返回 `SaveOutcome::Unchanged`；
//! 3. 变化时写入新版本与修改时间，按派生键写入存储；
//! 4. 写入成功后才把暂存副本回写到调用方的记录。
//!
//! 任一步失败（分配 ID、序列化、写入）都会原样返回错误，调用方的记录保持调用前的状态。
//!
use crate::change_detector::{self, Change};
use crate::error::{ObjectError, ObjectResult};
use crate::persist::{DocumentStore, StoreError};
use crate::record::Versioned;
use chrono::Utc;
use tracing::debug;

/// Save 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// 内容变化，已写入新版本
    Written,
    /// 内容与已保存版本一致，未执行写入
    Unchanged,
}

impl SaveOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written)
    }
}

/// 按记录的派生键读取，并整体覆盖 `dst`
///
/// 调用前需要预先填好 kind、id（嵌套记录还需 group）。
pub async fn get<S, R>(store: &S, dst: &mut R) -> ObjectResult<()>
where
    S: DocumentStore + ?Sized,
    R: Versioned,
{
    let key = dst.key();
    if !key.is_complete() {
        return Err(ObjectError::invalid_key(format!(
            "cannot get object with incomplete key {key}"
        )));
    }

    debug!(key = %key, "getting object");
    let doc = store.get(&key).await?;
    *dst = serde_json::from_value(doc)?;
    Ok(())
}

/// 保存记录；仅当内容变化时写入
pub async fn save<S, R>(store: &S, src: &mut R) -> ObjectResult<SaveOutcome>
where
    S: DocumentStore + ?Sized,
    R: Versioned,
{
    let kind = src.meta().kind().to_string();
    if kind.is_empty() {
        return Err(ObjectError::invalid_key("cannot save object without kind"));
    }
    if let Some(parent) = src.meta().group().key()
        && !parent.is_complete()
    {
        return Err(ObjectError::invalid_key(format!(
            "cannot save object under incomplete group key {parent}"
        )));
    }
    debug!(kind = %kind, id = src.meta().id(), "saving object");

    let mut staged = src.clone();

    if staged.meta().id().is_empty() {
        debug!(kind = %kind, "allocating new id");
        let id = store.allocate_id(&kind).await?;
        if id.is_empty() {
            return Err(StoreError::Allocation {
                kind,
                reason: "allocator returned an empty id".to_string(),
            }
            .into());
        }
        staged.meta_mut().assign_id(id);
    }

    // 同一次保存只取一次当前时间：首次保存时 created_at == modified_at
    let now = Utc::now();
    staged.meta_mut().mark_created(now);

    let version = match change_detector::detect(&staged)? {
        Change::Unchanged => {
            debug!(kind = %kind, id = staged.meta().id(), "object not changed, skipping write");
            return Ok(SaveOutcome::Unchanged);
        }
        Change::Changed(version) => version,
    };
    staged.meta_mut().stamp(version, now);

    let key = staged.key();
    let doc = serde_json::to_value(&staged)?;

    debug!(key = %key, version = %staged.meta().version(), "storing modified object");
    store.put(&key, doc).await?;

    *src = staged;
    Ok(SaveOutcome::Written)
}

/// 绑定一个文档存储的版本化记录仓储
///
/// 存储可以是拥有的实例、`Arc` 或引用（包括事务句柄）。
#[derive(Debug, Clone)]
pub struct ObjectRepository<S> {
    store: S,
}

impl<S> ObjectRepository<S>
where
    S: DocumentStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub async fn get<R: Versioned>(&self, dst: &mut R) -> ObjectResult<()> {
        get(&self.store, dst).await
    }

    pub async fn save<R: Versioned>(&self, src: &mut R) -> ObjectResult<SaveOutcome> {
        save(&self.store, src).await
    }
}
