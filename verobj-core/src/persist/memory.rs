//! 内存版文档存储（InMemoryDocumentStore）
//!
//! 满足 `DocumentStore` 与 `TransactionalStore` 协议的轻量实现：
//! - 文档以 `BTreeMap<Key, Value>` 保存，读写由 `tokio::sync::RwLock` 保护；
//! - ID 按 kind 独立分配，默认从 1 开始递增并以十六进制文本表示；
//! - 事务缓存写入，提交时在一次写锁内整体生效，未提交即丢弃。
//!
//! 典型用途：测试环境、示例与本地开发。句柄可廉价克隆，克隆间共享同一份数据。

use crate::key::Key;
use crate::persist::{DocumentStore, StoreError, StoreResult, TransactionalStore};
use async_trait::async_trait;
use bon::Builder;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// ID 分配方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdScheme {
    /// 每个 kind 独立计数，十六进制文本：1, 2, …, a, b, …
    #[default]
    Hex,
    /// 随机 UUID v4
    Uuid,
}

/// 内存存储配置
#[derive(Debug, Clone, Default, Builder)]
pub struct MemoryStoreConfig {
    #[builder(default)]
    id_scheme: IdScheme,
}

impl MemoryStoreConfig {
    pub fn id_scheme(&self) -> IdScheme {
        self.id_scheme
    }
}

#[derive(Debug, Default)]
struct Inner {
    config: MemoryStoreConfig,
    docs: RwLock<BTreeMap<Key, Value>>,
    counters: DashMap<String, u64>,
}

impl Inner {
    fn allocate(&self, kind: &str) -> StoreResult<String> {
        if kind.is_empty() {
            return Err(StoreError::Allocation {
                kind: String::new(),
                reason: "kind must not be empty".to_string(),
            });
        }

        match self.config.id_scheme {
            IdScheme::Hex => {
                let mut counter = self.counters.entry(kind.to_string()).or_insert(0);
                *counter += 1;
                Ok(format!("{:x}", *counter))
            }
            IdScheme::Uuid => Ok(uuid::Uuid::new_v4().to_string()),
        }
    }
}

fn ensure_complete(key: &Key) -> StoreResult<()> {
    if key.is_complete() {
        return Ok(());
    }
    Err(StoreError::backend(format!("incomplete key {key}")))
}

/// 内存文档存储
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    inner: Arc<Inner>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MemoryStoreConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                ..Default::default()
            }),
        }
    }

    /// 当前已提交的文档数量
    pub async fn len(&self) -> usize {
        self.inner.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn contains(&self, key: &Key) -> bool {
        self.inner.docs.read().await.contains_key(key)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, key: &Key) -> StoreResult<Value> {
        self.inner
            .docs
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::not_found(key))
    }

    async fn put(&self, key: &Key, doc: Value) -> StoreResult<()> {
        ensure_complete(key)?;
        self.inner.docs.write().await.insert(key.clone(), doc);
        Ok(())
    }

    async fn allocate_id(&self, kind: &str) -> StoreResult<String> {
        self.inner.allocate(kind)
    }
}

/// 内存存储事务：写入缓存在本地，读取优先命中本地缓存
#[derive(Debug)]
pub struct MemoryTransaction {
    inner: Arc<Inner>,
    pending: Mutex<BTreeMap<Key, Value>>,
}

#[async_trait]
impl DocumentStore for MemoryTransaction {
    async fn get(&self, key: &Key) -> StoreResult<Value> {
        if let Some(doc) = self.pending.lock().await.get(key) {
            return Ok(doc.clone());
        }
        self.inner
            .docs
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| StoreError::not_found(key))
    }

    async fn put(&self, key: &Key, doc: Value) -> StoreResult<()> {
        ensure_complete(key)?;
        self.pending.lock().await.insert(key.clone(), doc);
        Ok(())
    }

    // ID 分配不回滚：事务丢弃后已分配的 ID 不会被复用
    async fn allocate_id(&self, kind: &str) -> StoreResult<String> {
        self.inner.allocate(kind)
    }
}

#[async_trait]
impl TransactionalStore for InMemoryDocumentStore {
    type Transaction = MemoryTransaction;

    async fn begin(&self) -> StoreResult<Self::Transaction> {
        Ok(MemoryTransaction {
            inner: Arc::clone(&self.inner),
            pending: Mutex::new(BTreeMap::new()),
        })
    }

    async fn commit(&self, tx: Self::Transaction) -> StoreResult<()> {
        if !Arc::ptr_eq(&self.inner, &tx.inner) {
            return Err(StoreError::Transaction {
                reason: "transaction belongs to another store".to_string(),
            });
        }

        let pending = tx.pending.into_inner();
        let mut docs = self.inner.docs.write().await;
        docs.extend(pending);
        Ok(())
    }
}
