use verobj_core::record::{RecordMeta, Versioned};
use verobj_macros::versioned;

// 已声明的 meta 字段被复用，用户派生与属性保留
#[versioned]
#[derive(PartialEq)]
#[serde(rename_all = "camelCase")]
struct Profile {
    display_name: String,
    #[serde(default)]
    meta: RecordMeta,
}

fn main() {
    let mut p = Profile::from_meta(RecordMeta::new("profile", "7"));
    p.display_name = "n".into();
    assert_eq!(p.clone(), p);
    assert_eq!(p.meta().id(), "7");
}
