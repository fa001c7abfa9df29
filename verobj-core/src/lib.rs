//! 版本化对象持久化基础库（verobj-core）
//!
//! 为层级键值文档存储中的记录附加“内容版本”，核心能力：
//! - 由实体（`entity`）与父分组派生稳定的层级键（`key`）；
//! - 以规范化序列化的 SHA-256 判断内容是否真正变化（`change_detector`）；
//! - 仅在内容变化时写入新版本与修改时间（`persist`）。
//!
//! 本 crate 只依赖外部存储提供的按键读写与 ID 分配原语（`persist::DocumentStore`），
//! 不实现存储引擎、查询、删除或跨对象事务；开启 `memory` 特性可获得内存版实现。
//!
//! 典型用法：
//! 1. 用 `#[versioned]` 标注业务结构体，或手动组合 `RecordMeta` 并实现 `Versioned`；
//! 2. 以 `RecordMeta::new(kind, id)` 构造记录，id 为空时首次保存会自动分配；
//! 3. 调用 `persist::save` / `persist::get`（或 `ObjectRepository`）读写。
//!
//! ```
//! use verobj_core::persist::{InMemoryDocumentStore, SaveOutcome, save};
//! use verobj_core::record::{RecordMeta, Versioned};
//! use verobj_core::versioned;
//!
//! #[versioned]
//! struct Article {
//!     title: String,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let store = InMemoryDocumentStore::new();
//! let mut article = Article::from_meta(RecordMeta::new("article", ""));
//! article.title = "hello".into();
//!
//! assert_eq!(save(&store, &mut article).await.unwrap(), SaveOutcome::Written);
//! assert_eq!(save(&store, &mut article).await.unwrap(), SaveOutcome::Unchanged);
//! # }
//! ```
//!
pub mod change_detector;
pub mod entity;
pub mod error;
pub mod key;
pub mod persist;
pub mod record;
pub mod value_object;

pub use verobj_macros::{value_object, versioned};

// 允许在本 crate 内部通过 ::verobj_core 进行自引用，
// 以便过程宏在本 crate 的单元测试中也能解析到 ::verobj_core 路径。
extern crate self as verobj_core;
