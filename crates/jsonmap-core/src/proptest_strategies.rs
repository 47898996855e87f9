//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random source
//! values and matching templates for property tests of the mapping engine.

#![cfg(test)]

use crate::types::ValueType;
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for field names that can never collide with path keywords or indices
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

/// Strategy for JSON scalars
pub fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-zA-Z0-9 ]{0,16}".prop_map(Value::String),
    ]
}

/// Strategy for arbitrary JSON values of bounded depth
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..4).prop_map(Value::Array),
            btree_map(field_name_strategy(), inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

/// Strategy for non-empty JSON mappings
pub fn json_object_strategy() -> impl Strategy<Value = Map<String, Value>> {
    btree_map(field_name_strategy(), json_value_strategy(), 1..6)
        .prop_map(|m| m.into_iter().collect())
}

/// Strategy for declared value types
pub fn value_type_strategy() -> impl Strategy<Value = ValueType> {
    proptest::sample::select(ValueType::ALL.to_vec())
}
