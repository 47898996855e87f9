//! Path resolution
//!
//! Walks a descriptor's path through the source value, left to right. A
//! sequence met mid-path whose own keys (its indices) do not match the next
//! segment is fanned out: the remaining path is evaluated against every
//! element, and the branches come back fully nested and formatted.
//!
//! Copyright (c) 2025 Jsonmap Team
//! Licensed under the Apache-2.0 license

use super::descriptor::Descriptor;
use super::evaluator::evaluate_descriptor;
use super::outcome::Outcome;
use super::path::{Segment, KEYWORD_ROOT};
use crate::{Error, Result};
use serde_json::Value;
use std::borrow::Cow;
use tracing::{debug, trace};

/// What a path resolved to
#[derive(Debug)]
pub enum Resolution<'v> {
    /// Nothing there, and the field tolerates absence
    Missing,
    /// A raw value still subject to nested mapping and formatting
    Found(Cow<'v, Value>),
    /// A fully evaluated result (fan-out or `$ROOT` restart); nested mapping
    /// and formatting were already applied inside
    Settled(Outcome),
}

/// Resolve a descriptor's path against `source`
///
/// `root` is the outermost source value, used by `$ROOT`; `index` is the
/// position of `source` in its parent sequence, when there is one.
pub fn resolve<'v>(
    source: &'v Value,
    descriptor: &Descriptor<'_>,
    root: &'v Value,
    index: Option<usize>,
) -> Result<Resolution<'v>> {
    let segments = descriptor.path.segments();

    if segments.first() == Some(&Segment::Root) {
        let restarted = descriptor.with_segments(&segments[1..]);
        trace!(path = %descriptor.path, "restarting resolution from root");
        return Ok(Resolution::Settled(evaluate_descriptor(
            root,
            &restarted,
            root,
            index,
        )?));
    }

    let mut current = source;
    for (position, segment) in segments.iter().enumerate() {
        let name = match segment {
            Segment::Item => continue,
            Segment::Empty => return Ok(Resolution::Found(Cow::Borrowed(current))),
            Segment::Root => KEYWORD_ROOT,
            Segment::Field(name) => name.as_str(),
        };

        if let Some(child) = own_child(current, name) {
            current = child;
            continue;
        }

        if let Value::Array(items) = current {
            let remaining = if position == 0 && segments.len() > 1 {
                &segments[1..]
            } else {
                &segments[position..]
            };
            debug!(
                path = %descriptor.path,
                segment = %name,
                elements = items.len(),
                "fanning out over sequence"
            );
            return fan_out(items, &descriptor.with_segments(remaining), root);
        }

        return missing(descriptor, name);
    }

    Ok(Resolution::Found(Cow::Borrowed(current)))
}

/// Own keys of a mapping are its fields; own keys of a sequence are its indices
fn own_child<'v>(value: &'v Value, name: &str) -> Option<&'v Value> {
    match value {
        Value::Object(object) => object.get(name),
        Value::Array(items) => name.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn fan_out<'v>(
    items: &'v [Value],
    branch: &Descriptor<'_>,
    root: &'v Value,
) -> Result<Resolution<'v>> {
    let outcomes = items
        .iter()
        .enumerate()
        .map(|(i, item)| evaluate_descriptor(item, branch, root, Some(i)))
        .collect::<Result<Vec<_>>>()?;
    Ok(Resolution::Settled(Outcome::sequence(outcomes)))
}

fn missing<'v>(descriptor: &Descriptor<'_>, segment: &str) -> Result<Resolution<'v>> {
    if let Some(default_value) = descriptor.default_value {
        trace!(path = %descriptor.path, segment, "using default value");
        return Ok(Resolution::Found(Cow::Owned(default_value.clone())));
    }
    if !descriptor.required {
        return Ok(Resolution::Missing);
    }
    Err(Error::invalid_path(descriptor.path.text(), segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{normalize, FieldSpec, Formatter};
    use serde_json::json;

    fn resolve_found(source: &Value, spec: FieldSpec) -> Value {
        let descriptor = normalize(&spec).unwrap();
        match resolve(source, &descriptor, source, None).unwrap() {
            Resolution::Found(value) => value.into_owned(),
            other => panic!("expected a found value, got {:?}", other),
        }
    }

    async fn resolve_settled(source: &Value, spec: FieldSpec) -> Value {
        let descriptor = normalize(&spec).unwrap();
        match resolve(source, &descriptor, source, None).unwrap() {
            Resolution::Settled(outcome) => outcome.settle().await.unwrap().unwrap(),
            other => panic!("expected a settled value, got {:?}", other),
        }
    }

    #[test]
    fn test_basic_descent() {
        let source = json!({"field": "value"});
        assert_eq!(resolve_found(&source, "field".into()), json!("value"));

        let source = json!({"field1": {"field2": {"field3": "value"}}});
        assert_eq!(
            resolve_found(&source, "field1.field2.field3".into()),
            json!("value")
        );
    }

    #[test]
    fn test_last_segment_array_is_returned_whole() {
        let source = json!({"deep0": {"deep1": {"carrier": [1, 2, 3, 4]}}});
        assert_eq!(
            resolve_found(&source, "deep0.deep1.carrier".into()),
            json!([1, 2, 3, 4])
        );
    }

    #[test]
    fn test_numeric_segment_indexes_sequence() {
        let source = json!({"xs": [{"v": 1}, {"v": 2}]});
        assert_eq!(resolve_found(&source, "xs.1.v".into()), json!(2));
    }

    #[test]
    fn test_item_is_skipped() {
        let source = json!({"a": {"b": 1}});
        assert_eq!(resolve_found(&source, "a.$item.b".into()), json!(1));
    }

    #[test]
    fn test_empty_returns_current() {
        let source = json!({"a": {"b": 1}});
        assert_eq!(resolve_found(&source, "$EMPTY".into()), source);
        assert_eq!(resolve_found(&source, "a.$empty".into()), json!({"b": 1}));
    }

    #[tokio::test]
    async fn test_fan_out_over_top_level_sequence() {
        let source = json!([{"field": "value1"}, {"field": "value2"}, {"field": "value3"}]);
        assert_eq!(
            resolve_settled(&source, "field".into()).await,
            json!(["value1", "value2", "value3"])
        );
    }

    #[tokio::test]
    async fn test_fan_out_keeps_inner_sequences() {
        let source = json!([
            {"field": ["value1_1", "value1_2", "value1_3"]},
            {"field": ["value2"]},
            {"field": ["value3_1", "value3_2"]},
        ]);
        assert_eq!(
            resolve_settled(&source, "field".into()).await,
            json!([["value1_1", "value1_2", "value1_3"], ["value2"], ["value3_1", "value3_2"]])
        );
    }

    #[tokio::test]
    async fn test_fan_out_mid_path() {
        let source = json!({"deep0": [
            {"deep1": {"carrier": 1}},
            {"deep1": {"carrier": 2}},
            {"deep1": {"carrier": 3}},
        ]});
        assert_eq!(
            resolve_settled(&source, "deep0.deep1.carrier".into()).await,
            json!([1, 2, 3])
        );
    }

    #[tokio::test]
    async fn test_fan_out_missing_optional_branch_is_null() {
        let source = json!([{"field": 1}, {"other": 2}]);
        let spec = FieldSpec::builder("field").optional().build();
        assert_eq!(resolve_settled(&source, spec).await, json!([1, null]));
    }

    #[tokio::test]
    async fn test_fan_out_branch_uses_default() {
        let source = json!({"xs": [{"v": 1}, {}]});
        let spec = FieldSpec::builder("xs.v").default_value(0).build();
        assert_eq!(resolve_settled(&source, spec).await, json!([1, 0]));
    }

    #[test]
    fn test_missing_required_names_full_path() {
        let source = json!({"field1": {"field2": {"field3": "value"}}});
        let spec = FieldSpec::from("field1.field4.field3");
        let descriptor = normalize(&spec).unwrap();
        let err = resolve(&source, &descriptor, &source, None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid path field1.field4.field3 (field4)");
    }

    #[test]
    fn test_missing_inside_fan_out_aborts() {
        let source = json!([{"field": "value1"}, {"field1": "value2"}, {"field": "value3"}]);
        let spec = FieldSpec::from("field");
        let descriptor = normalize(&spec).unwrap();
        let err = resolve(&source, &descriptor, &source, None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid path field (field)");
    }

    #[test]
    fn test_missing_optional_and_default() {
        let source = json!({});
        let spec = FieldSpec::builder("x").optional().build();
        let descriptor = normalize(&spec).unwrap();
        assert!(matches!(
            resolve(&source, &descriptor, &source, None).unwrap(),
            Resolution::Missing
        ));

        let spec = FieldSpec::builder("x").optional().default_value("D").build();
        assert_eq!(resolve_found(&source, spec), json!("D"));
    }

    #[test]
    fn test_scalars_and_null_own_nothing() {
        let source = json!({"a": null, "s": "text"});
        let spec = FieldSpec::from("a.b");
        let descriptor = normalize(&spec).unwrap();
        assert!(resolve(&source, &descriptor, &source, None).is_err());
        let spec = FieldSpec::from("s.0");
        let descriptor = normalize(&spec).unwrap();
        assert!(resolve(&source, &descriptor, &source, None).is_err());
    }

    #[test]
    fn test_length_is_not_an_own_key() {
        let source = json!({"xs": [1, 2], "s": "text"});
        let spec = FieldSpec::from("xs.length");
        let descriptor = normalize(&spec).unwrap();
        let err = resolve(&source, &descriptor, &source, None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid path xs.length (length)");

        let spec = FieldSpec::from("s.length");
        let descriptor = normalize(&spec).unwrap();
        assert!(resolve(&source, &descriptor, &source, None).unwrap_err().is_invalid_path());
    }

    #[tokio::test]
    async fn test_root_restarts_from_root() {
        let root = json!({"a": {"b": 1}, "top": "t"});
        let spec = FieldSpec::from("$ROOT.top");
        let descriptor = normalize(&spec).unwrap();
        let inner = &root["a"];
        match resolve(inner, &descriptor, &root, None).unwrap() {
            Resolution::Settled(outcome) => {
                assert_eq!(outcome.settle().await.unwrap(), Some(json!("t")))
            }
            other => panic!("expected settled, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_root_alone_is_root_value() {
        let root = json!({"a": 1});
        assert_eq!(resolve_settled(&root, "$root".into()).await, root);
    }

    #[tokio::test]
    async fn test_fan_out_at_first_segment_drops_it() {
        let source = json!([{"b": 1}, {"b": 2}]);
        assert_eq!(resolve_settled(&source, "a.b".into()).await, json!([1, 2]));
    }

    #[tokio::test]
    async fn test_root_restart_keeps_item_index() {
        let root = json!({"xs": [{}, {}], "x": "X"});
        let spec = FieldSpec::builder("$root.x")
            .formatting(Formatter::sync(|value, index| {
                Ok(json!(format!("{}{}", value.as_str().unwrap_or_default(), index.unwrap_or(99))))
            }))
            .build();
        let descriptor = normalize(&spec).unwrap();
        let item = &root["xs"][1];
        match resolve(item, &descriptor, &root, Some(1)).unwrap() {
            Resolution::Settled(outcome) => {
                assert_eq!(outcome.settle().await.unwrap(), Some(json!("X1")))
            }
            other => panic!("expected settled, got {:?}", other),
        }
    }
}
