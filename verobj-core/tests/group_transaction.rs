use anyhow::Result as AnyResult;
use verobj_core::entity::Entity;
use verobj_core::error::ObjectError;
use verobj_core::persist::{
    InMemoryDocumentStore, TransactionalStore, get, run_in_transaction, save,
};
use verobj_core::record::{RecordMeta, Versioned};
use verobj_core::versioned;

#[versioned]
struct TestGroup {
    name: String,
}

#[versioned]
struct TestObject {
    foo: String,
    bar: String,
}

fn group_entity() -> Entity {
    Entity::new("testGroup", "tg")
}

// 在事务中保存分组下的对象，提交后可按分组键读回
#[tokio::test]
async fn save_in_group_transaction() -> AnyResult<()> {
    let store = InMemoryDocumentStore::new();

    let mut to1 = TestObject::from_meta(RecordMeta::new("testObject", "").with_group(group_entity()));
    to1.foo = "foo".into();
    to1.bar = "bar".into();

    let to1 = run_in_transaction(&store, move |tx| {
        Box::pin(async move {
            let mut to1 = to1;
            save(tx, &mut to1).await?;
            Ok::<_, ObjectError>(to1)
        })
    })
    .await?;

    let mut to2 = TestObject::from_meta(
        RecordMeta::new("testObject", to1.meta().id()).with_group(group_entity()),
    );
    get(&store, &mut to2).await?;
    assert_eq!(to2.foo, "foo");
    assert_eq!(to2.meta().version(), to1.meta().version());
    Ok(())
}

// 分组与子对象在同一事务中创建：要么都写入，要么都不写入
#[tokio::test]
async fn group_and_child_commit_together() -> AnyResult<()> {
    let store = InMemoryDocumentStore::new();
    let tx = store.begin().await?;

    let mut group = TestGroup::from_meta(RecordMeta::new("testGroup", ""));
    group.name = "inbox".into();
    save(&tx, &mut group).await?;

    let mut child = TestObject::from_meta(
        RecordMeta::new("testObject", "").with_group(group.meta().entity().clone()),
    );
    child.foo = "foo".into();
    save(&tx, &mut child).await?;

    // 事务内可读到自己的写入，外部尚不可见
    let mut seen = TestObject::from_meta(
        RecordMeta::new("testObject", child.meta().id()).with_group(group.meta().entity().clone()),
    );
    get(&tx, &mut seen).await?;
    assert_eq!(seen.foo, "foo");
    assert!(store.is_empty().await);

    store.commit(tx).await?;
    assert_eq!(store.len().await, 2);
    assert!(store.contains(&group.key()).await);
    assert!(store.contains(&child.key()).await);
    Ok(())
}

#[tokio::test]
async fn failed_transaction_writes_nothing() -> AnyResult<()> {
    let store = InMemoryDocumentStore::new();
    let to = TestObject::from_meta(RecordMeta::new("testObject", "").with_group(group_entity()));

    let result = run_in_transaction(&store, move |tx| {
        Box::pin(async move {
            let mut to = to;
            save(tx, &mut to).await?;
            Err::<(), _>(ObjectError::invalid_value("rolled back"))
        })
    })
    .await;

    assert!(matches!(result, Err(ObjectError::InvalidValue { .. })));
    assert!(store.is_empty().await);
    Ok(())
}
