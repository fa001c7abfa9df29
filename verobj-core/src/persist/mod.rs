//! 持久化（persist）
//!
//! 定义外部文档存储协议与版本化记录的读写编排：
//! - 文档存储协议（`DocumentStore`）与可选事务协议（`TransactionalStore`）；
//! - Get / Save 编排（`get`、`save`、`ObjectRepository`）；
//! - 内存版实现（`InMemoryDocumentStore`，需开启 `memory` 特性）。
//!
//! 该模块聚焦协议与装配逻辑，具体存储后端由上层提供实现并注入。
//!
mod document_store;
#[cfg(feature = "memory")]
mod memory;
mod object_repository;
mod transaction;

pub use document_store::{DocumentStore, StoreError, StoreResult};
#[cfg(feature = "memory")]
pub use memory::{IdScheme, InMemoryDocumentStore, MemoryStoreConfig, MemoryTransaction};
pub use object_repository::{ObjectRepository, SaveOutcome, get, save};
pub use transaction::{TransactionFuture, TransactionalStore, run_in_transaction};
