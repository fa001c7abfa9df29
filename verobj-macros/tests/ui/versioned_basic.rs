use verobj_core::entity::Entity;
use verobj_core::record::{RecordMeta, Versioned};
use verobj_macros::versioned;

#[versioned]
struct Article {
    title: String,
    tags: Vec<String>,
}

#[versioned(debug = false)]
struct Secret {
    payload: String,
}

fn main() {
    // 宏注入 meta 字段并实现 Versioned
    let mut a = Article::from_meta(RecordMeta::new("article", "1"));
    a.title = "hello".into();
    a.tags.push("rust".into());
    let _ = format!("{:?}", a);
    let _key = a.key();

    // Clone/Default 可用
    let _b = a.clone();
    let _ = Article::default();

    // debug = false 的不强制 Debug，只做构造与元数据读写
    let mut s = Secret::from_meta(RecordMeta::new("secret", ""));
    s.meta_mut().set_group(Entity::new("vault", "v1"));
    s.payload = "p".into();
    let _ = s.meta().group();
}
