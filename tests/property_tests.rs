//! Property-based tests for the codec's round-trip guarantees.
//!
//! Two invariants carry the format: `decode(encode(v))` equals `v` under
//! numeric-widening equality, and re-encoding a decoded document reproduces
//! it byte for byte.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use toon::{
    decode, encode, encode_with_options, from_str, to_string, Delimiter, EncodeOptions, Map,
    Value,
};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_][a-z0-9_]{0,8}",
        // Keys that force quoting.
        "[a-z ,:|#-]{1,8}",
    ]
}

fn arb_finite_float() -> impl Strategy<Value = f64> {
    prop_oneof![
        prop::num::f64::POSITIVE
            | prop::num::f64::NEGATIVE
            | prop::num::f64::NORMAL
            | prop::num::f64::SUBNORMAL
            | prop::num::f64::ZERO,
        (-1_000_000i64..1_000_000i64).prop_map(|n| n as f64),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        arb_finite_float().prop_map(Value::Float),
        any::<String>().prop_map(Value::Str),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((arb_key(), inner), 0..6).prop_map(|entries| {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key, value);
                }
                Value::Object(map)
            }),
        ]
    })
}

proptest! {
    // Serde-level round trips over primitive types and collections.
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }

    // Canonical round trip over generated value trees.
    #[test]
    fn prop_value_roundtrip(value in arb_value()) {
        let text = encode(&value).unwrap();
        let decoded = decode(&text).unwrap();
        prop_assert_eq!(decoded, value);
    }

    // Idempotent re-encode, byte for byte.
    #[test]
    fn prop_reencode_idempotent(value in arb_value()) {
        let first = encode(&value).unwrap();
        let second = encode(&decode(&first).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    // The round trip holds under every delimiter.
    #[test]
    fn prop_roundtrip_any_delimiter(value in arb_value()) {
        for delimiter in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
            let options = EncodeOptions::new().with_delimiter(delimiter);
            let text = encode_with_options(&value, options).unwrap();
            let decoded = decode(&text).unwrap();
            prop_assert_eq!(&decoded, &value);
        }
    }

    // Canonical number rendering never leaks exponents or stray zeros.
    #[test]
    fn prop_float_token_canonical(f in arb_finite_float()) {
        let text = encode(&Value::Float(f)).unwrap();
        prop_assert!(!text.contains('e') && !text.contains('E'), "exponent in {text}");
        prop_assert_ne!(&text, "-0");
        if let Some(fraction) = text.split('.').nth(1) {
            prop_assert!(!fraction.ends_with('0'), "trailing zero in {text}");
        }
    }
}
