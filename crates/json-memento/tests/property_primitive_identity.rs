//! Plain trees without registered content pass through both directions
//! unchanged.

use json_memento::{Registry, Value};
use proptest::prelude::*;

fn plain_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        // Quarters survive JSON text exactly.
        (-1_000_000i32..1_000_000).prop_map(|n| Value::from(f64::from(n) / 4.0)),
        "[a-zA-Z0-9 .]{0,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Seq),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..6).prop_map(|entries| {
                Value::Map(
                    entries
                        .into_iter()
                        .map(|(k, v)| (Value::from(k), v))
                        .collect(),
                )
            }),
        ]
    })
}

fn registry() -> Registry {
    Registry::builder()
        .register_enum("Color", ["RED", "GREEN"])
        .build()
}

proptest! {
    #[test]
    fn property_plain_values_are_fixed_points(value in plain_value()) {
        let registry = registry();
        prop_assert_eq!(&registry.to_plain(&value).unwrap(), &value);
        prop_assert_eq!(&registry.from_plain(&value).unwrap(), &value);
    }

    #[test]
    fn property_json_text_round_trip(value in plain_value()) {
        let registry = registry();
        let text = registry.encode_json(&value).unwrap();
        prop_assert_eq!(&registry.decode_json(&text).unwrap(), &value);
    }
}
