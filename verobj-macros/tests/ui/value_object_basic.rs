use verobj_macros::value_object;

#[value_object]
struct Amount {
    value: i64,
}

#[value_object(debug = false)]
struct Opaque(i32);

#[value_object(ord = true)]
enum Level {
    #[default]
    Low,
    High,
}

fn main() {
    let _ = format!("{:?}", Amount { value: 0 });

    let a = Amount::default();
    let _eq = a.clone() == Amount { value: 0 };

    let _ = Opaque(1);

    // ord = true 追加 PartialOrd/Ord
    assert!(Level::Low < Level::High);
    let _lv: Level = Default::default();
}
