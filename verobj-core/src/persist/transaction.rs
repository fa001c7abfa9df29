//! 事务协议（可选）
//!
//! 需要“与父分组一同原子创建”的调用方，把保存包裹在存储事务中执行。
//! 版本化层自身不加锁、不提供事务语义，只负责装配 begin → 闭包 → commit。
//!
use crate::error::ObjectResult;
use crate::persist::{DocumentStore, StoreResult};
use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;

/// 事务闭包返回的 Future
pub type TransactionFuture<'a, T> = Pin<Box<dyn Future<Output = ObjectResult<T>> + Send + 'a>>;

#[async_trait]
pub trait TransactionalStore: DocumentStore {
    /// 事务句柄本身也是一个文档存储：读可见自身未提交的写
    type Transaction: DocumentStore;

    async fn begin(&self) -> StoreResult<Self::Transaction>;

    /// 原子提交事务内的全部写入
    async fn commit(&self, tx: Self::Transaction) -> StoreResult<()>;
}

/// 在事务中执行 `f`：
/// - `f` 返回错误时丢弃事务（不写入任何内容）并原样返回错误；
/// - 否则提交事务，提交失败同样返回错误。
pub async fn run_in_transaction<S, F, T>(store: &S, f: F) -> ObjectResult<T>
where
    S: TransactionalStore,
    F: for<'a> FnOnce(&'a S::Transaction) -> TransactionFuture<'a, T>,
{
    let tx = store.begin().await?;
    let value = f(&tx).await?;
    store.commit(tx).await?;
    Ok(value)
}
