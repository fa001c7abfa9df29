use async_trait::async_trait;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::sync::Mutex;
use verobj_core::error::ObjectError;
use verobj_core::key::Key;
use verobj_core::persist::{DocumentStore, SaveOutcome, StoreError, StoreResult, save};
use verobj_core::record::{RecordMeta, Versioned};
use verobj_core::versioned;

#[versioned]
#[derive(PartialEq)]
struct TestObject {
    foo: String,
}

/// 可按需注入失败的存储
#[derive(Default)]
struct FlakyStore {
    fail_allocate: bool,
    fail_put: bool,
    puts: Mutex<Vec<(Key, Value)>>,
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn get(&self, key: &Key) -> StoreResult<Value> {
        self.puts
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .ok_or_else(|| StoreError::not_found(key))
    }

    async fn put(&self, key: &Key, doc: Value) -> StoreResult<()> {
        if self.fail_put {
            return Err(StoreError::backend("disk full"));
        }
        self.puts.lock().unwrap().push((key.clone(), doc));
        Ok(())
    }

    async fn allocate_id(&self, kind: &str) -> StoreResult<String> {
        if self.fail_allocate {
            return Err(StoreError::Allocation {
                kind: kind.to_string(),
                reason: "quota exceeded".to_string(),
            });
        }
        Ok("2a".to_string())
    }
}

fn new_object() -> TestObject {
    let mut o = TestObject::from_meta(RecordMeta::new("testObject", ""));
    o.foo = "foo".into();
    o
}

#[tokio::test]
async fn allocation_failure_is_propagated_and_record_untouched() {
    let store = FlakyStore {
        fail_allocate: true,
        ..Default::default()
    };
    let mut o = new_object();
    let before = o.clone();

    let err = save(&store, &mut o).await.unwrap_err();
    match err {
        ObjectError::Store(StoreError::Allocation { kind, .. }) => assert_eq!(kind, "testObject"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(o, before);
}

#[tokio::test]
async fn put_failure_is_propagated_and_record_untouched() {
    let store = FlakyStore {
        fail_put: true,
        ..Default::default()
    };
    let mut o = new_object();
    let before = o.clone();

    let err = save(&store, &mut o).await.unwrap_err();
    match err {
        ObjectError::Store(StoreError::Backend { reason }) => assert_eq!(reason, "disk full"),
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(o, before);
    assert!(o.meta().id().is_empty());
    assert!(o.meta().version().is_empty());
}

// ID 文本由分配器决定，版本化层不解析
#[tokio::test]
async fn allocator_defined_id_is_used_verbatim() {
    let store = FlakyStore::default();
    let mut o = new_object();

    assert_eq!(save(&store, &mut o).await.unwrap(), SaveOutcome::Written);
    assert_eq!(o.meta().id(), "2a");
    assert_eq!(store.puts.lock().unwrap().len(), 1);

    // 未变化时不触发写入
    assert_eq!(save(&store, &mut o).await.unwrap(), SaveOutcome::Unchanged);
    assert_eq!(store.puts.lock().unwrap().len(), 1);
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct Poison(bool);

impl Serialize for Poison {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 {
            return Err(serde::ser::Error::custom("poisoned payload"));
        }
        serializer.serialize_bool(false)
    }
}

#[versioned]
#[derive(PartialEq)]
struct Fragile {
    poison: Poison,
}

// 序列化失败：透出 Serde 错误，记录不变且不写入
#[tokio::test]
async fn serialization_failure_is_propagated_and_record_untouched() {
    let store = FlakyStore::default();
    let mut f = Fragile::from_meta(RecordMeta::new("fragile", ""));
    f.poison = Poison(true);
    let before = f.clone();

    let err = save(&store, &mut f).await.unwrap_err();
    assert!(matches!(err, ObjectError::Serde { .. }));
    assert_eq!(f, before);
    assert!(f.meta().id().is_empty());
    assert!(store.puts.lock().unwrap().is_empty());
}
